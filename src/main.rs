//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` locally. `PORT` overrides the default 8000.

use std::env;
use std::process::{Command, ExitCode, Stdio};

fn main() -> ExitCode {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return ExitCode::SUCCESS;
    }
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());

    // Build wasm bundle
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match server {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(st) => {
            eprintln!("http server exited with {st}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("failed to start http server: {e}");
            ExitCode::FAILURE
        }
    }
}
