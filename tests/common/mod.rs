//! Shared helpers for driving the `landscape` binary.

use serde_json::Value;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};

/// Run the binary with an empty config directory so no user config leaks in.
pub fn landscape(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_landscape"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("SAP_LANDSCAPE_API_BASE")
        .env_remove("RUST_LOG")
        .output()
        .expect("run landscape")
}

pub fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "landscape failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse stdout JSON")
}

/// A loopback base URL nothing listens on.
pub fn closed_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
