//! Check that the tool and config are usable.

use std::process::Stdio;
use std::time::Duration;

use devscan_common::config::{config_file_path, AppConfig};

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("devscan System Check");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config file: {}", config_path.display());
    } else {
        println!("[--] Config file: {} (not present, using defaults)", config_path.display());
    }

    let program = &config.tool.program;
    let mut ready = true;
    match which::which(program) {
        Ok(path) => {
            println!("[OK] {} found at {}", program.display(), path.display());
            match tool_version(config).await {
                Some(version) => println!("     {version}"),
                None => println!("[WARN] {} did not report a version", program.display()),
            }
        }
        Err(_) => {
            println!("[FAIL] {} not found in PATH", program.display());
            ready = false;
        }
    }

    if config.tool.backend == "dshow" && !cfg!(windows) {
        println!("[WARN] Backend 'dshow' is only available on Windows builds of ffmpeg");
    } else {
        println!("[OK] Backend: {}", config.tool.backend);
    }

    println!();
    println!("Scan settings:");
    println!("  Timeout: {} ms", config.tool.timeout_ms);
    println!("  Probe concurrency: {}", config.scan.probe_concurrency);
    println!("  Strict line handling: {}", config.scan.strict_lines);

    println!();
    if ready {
        println!("ffmpeg is available. devscan is ready.");
    } else {
        println!("ffmpeg is missing. Install it or set tool.program in the config file.");
    }

    Ok(())
}

/// First line of `<program> -version`, which ffmpeg prints to stdout.
async fn tool_version(config: &AppConfig) -> Option<String> {
    let child = tokio::process::Command::new(&config.tool.program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .ok()?;

    let timeout = Duration::from_millis(config.tool.timeout_ms);
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .ok()?
        .ok()?;
    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|line| line.to_string())
}
