//! Custom cargo commands for booksearch.
//!
//! Usage:
//!   cargo xtask verify        - Run full verification suite
//!   cargo xtask test          - Run all tests (with every feature)
//!   cargo xtask check         - Quick check (check + test + clippy)
//!   cargo xtask bench         - Run benchmarks
//!   cargo xtask wasm          - Build the browser package
//!   cargo xtask fuzz <target> - Run one fuzz target for a minute

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["teaser", "url_parsing", "search_queries", "bundle_parsing"];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("wasm") => wasm()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify          Run full verification suite (tests, clippy, wasm, fuzz build)
  test            Run all Rust tests with every feature
  check           Quick check (cargo check + test + clippy)
  bench           Run benchmarks
  wasm            Build the browser package with wasm-pack
  fuzz <target>   Run a fuzz target for 60s ({})
"#,
        FUZZ_TARGETS.join(", ")
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("booksearch Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Running Rust tests...");
    test()?;
    println!("✓ All Rust tests passed\n");

    println!("[2/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-features", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[3/4] Checking the wasm build...");
    run_cargo(&[
        "check",
        "--quiet",
        "--lib",
        "--target",
        "wasm32-unknown-unknown",
        "--features",
        "wasm",
    ])?;
    println!("✓ wasm build checks\n");

    println!("[4/4] Building fuzz targets...");
    if has_command("cargo-fuzz") {
        run_in(&project_root()?, "cargo", &["+nightly", "fuzz", "build"])?;
        println!("✓ Fuzz targets build\n");
    } else {
        println!("  (cargo-fuzz not installed, skipping)\n");
    }

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test", "--all-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Build `pkg/` for the browser
fn wasm() -> Result<()> {
    if !has_command("wasm-pack") {
        bail!("wasm-pack not found (cargo install wasm-pack)");
    }
    run_in(
        &project_root()?,
        "wasm-pack",
        &["build", "--target", "web", "--release", "--", "--features", "wasm"],
    )
}

/// Run one fuzz target for a minute
fn fuzz(target: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("usage: cargo xtask fuzz <{}>", FUZZ_TARGETS.join("|"));
    };
    if !FUZZ_TARGETS.contains(&target) {
        bail!("unknown fuzz target `{}` (expected one of {})", target, FUZZ_TARGETS.join(", "));
    }
    run_in(
        &project_root()?,
        "cargo",
        &["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"],
    )
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run_in(&project_root()?, "cargo", args)
}

fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {} {:?}", program, args))?;

    if !status.success() {
        bail!("{} {:?} failed", program, args);
    }

    Ok(())
}

fn has_command(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
