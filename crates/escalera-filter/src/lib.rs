//! Escalera Filter - EMS VCS3-style nonlinear ladder lowpass
//!
//! A virtual-analog model of the VCS3's voltage-controlled filter: four
//! tanh-saturating poles in a ladder, trapezoidal integration, and a
//! bounded fixed-point solver for the implicit output feedback. Two user
//! parameters drive it: the bias (cutoff) frequency and the output gain.
//!
//! # Crate layout
//!
//! - [`DiodeLadder`] - the per-sample nonlinear core, meant to run at an
//!   oversampled rate
//! - [`Vcs3Filter`] - the host-facing pipeline: 4x oversampling around the
//!   ladder, per-block parameter snapshots, stereo broadcast output
//! - [`SharedParams`] / [`ParamSnapshot`] - lock-free parameter sharing
//!   between a control thread and the audio thread
//!
//! # Example
//!
//! ```rust
//! use escalera_filter::Vcs3Filter;
//!
//! let mut filter = Vcs3Filter::new();
//! filter.params().set_bias_hz(800.0);
//! filter.prepare(48000.0, 256);
//!
//! let input = vec![0.1f32; 256];
//! let (mut left, mut right) = (vec![0.0f32; 256], vec![0.0f32; 256]);
//! filter.process_block(&input, &mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod ladder;
pub mod params;
pub mod vcs3;

pub use ladder::DiodeLadder;
pub use params::{ParamSnapshot, SharedParams};
pub use vcs3::Vcs3Filter;
