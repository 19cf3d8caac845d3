//! Escalera Core - DSP foundation for the escalera ladder filter
//!
//! This crate provides the building blocks the filter crate is assembled
//! from, designed for real-time audio processing with zero allocation in
//! the audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for mono sample/block processors
//! - [`Oversampler`] - Block-based 4x anti-aliased up/downsampling for
//!   nonlinear processing
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Runtime parameter discovery
//!   for CLIs, preset systems, and host integration
//!
//! # no_std Support
//!
//! The [`Effect`] trait and parameter types are `no_std` compatible
//! (math goes through `libm`). The [`Oversampler`] allocates its work
//! buffers up front in [`Oversampler::prepare`] and therefore needs
//! `alloc`; nothing allocates per sample or per block.
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations, locks, or I/O in processing paths
//! - **Bounded work**: every per-sample operation has a hard upper bound
//! - **Object-safe traits**: dynamic dispatch when needed

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod effect;
pub mod oversample;
pub mod param_info;

pub use effect::Effect;
pub use oversample::{OVERSAMPLE_FACTOR, Oversampler};
pub use param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};
