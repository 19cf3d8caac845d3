//! Integration tests for the escalera binary.
//!
//! Tests cover CLI invocation, the parameter listing, and the end-to-end
//! generate/process file workflow.

use std::process::Command;

/// Helper to get the path to the `escalera` binary built by cargo.
fn escalera_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_escalera"))
}

#[test]
fn cli_params_lists_bias_and_gain() {
    let output = escalera_bin()
        .arg("params")
        .output()
        .expect("failed to run escalera params");

    assert!(output.status.success(), "escalera params failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in ["Bias", "Gain", "vcs3_bias", "vcs3_gain", "Hz"] {
        assert!(
            stdout.contains(expected),
            "params listing should contain '{expected}'"
        );
    }
}

#[test]
fn cli_generate_then_process_produces_stereo_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("impulse.wav");
    let filtered = dir.path().join("filtered.wav");

    let generate = escalera_bin()
        .args([
            "generate",
            "impulse",
            input.to_str().unwrap(),
            "--length",
            "1000",
        ])
        .output()
        .expect("failed to run escalera generate");
    assert!(
        generate.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&generate.stderr)
    );

    let process = escalera_bin()
        .args([
            "process",
            input.to_str().unwrap(),
            filtered.to_str().unwrap(),
            "--bias",
            "1000",
            "--gain",
            "1.0",
        ])
        .output()
        .expect("failed to run escalera process");
    assert!(
        process.status.success(),
        "process failed: {}",
        String::from_utf8_lossy(&process.stderr)
    );

    // The render is mono broadcast to two channels, same length and rate
    // as the input.
    let info = escalera_io::read_wav_info(&filtered).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.num_frames, 1000);
    assert_eq!(info.sample_rate, 44100);
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.wav");

    let result = escalera_bin()
        .args([
            "process",
            "/nonexistent/input.wav",
            output.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run escalera process");

    assert!(
        !result.status.success(),
        "process with a missing input should fail"
    );
}
