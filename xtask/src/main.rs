//! Custom cargo commands for petal.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask features  - Test the feature matrix
//!   cargo xtask wasm      - Build the browser bindings
//!   cargo xtask fuzz      - Run every fuzz target briefly (nightly)
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["normalize_text", "unescape_query", "score_records", "paginator_ops"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("features") => features()?,
        Some("wasm") => wasm()?,
        Some("fuzz") => fuzz()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests, clippy, features, constants)
  test      Run all Rust tests
  check     Quick check (cargo check + test + clippy)
  features  Test with no default features and each feature alone
  wasm      Build for wasm32-unknown-unknown with the wasm feature
  fuzz      Run each fuzz target for 30 seconds (needs cargo-fuzz, nightly)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("petal Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking scoring constants...");
    verify_constants()?;
    println!("✓ Match tiers ordered\n");

    println!("[2/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--all-targets", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Testing feature matrix...");
    features()?;
    println!("✓ Feature matrix passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test"])
}

fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// The normalizer and parallel paths have fallbacks; make sure they build and pass.
fn features() -> Result<()> {
    run_cargo(&["test", "--quiet", "--lib", "--no-default-features"])?;
    for feature in ["parallel", "unicode-normalization", "segmentation"] {
        println!("  --features {}", feature);
        run_cargo(&["test", "--quiet", "--lib", "--no-default-features", "--features", feature])?;
    }
    Ok(())
}

fn wasm() -> Result<()> {
    run_cargo(&[
        "build",
        "--release",
        "--lib",
        "--target",
        "wasm32-unknown-unknown",
        "--no-default-features",
        "--features",
        "wasm,unicode-normalization,segmentation",
    ])
}

fn fuzz() -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");
    for target in FUZZ_TARGETS {
        println!("Fuzzing {}...", target);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=30"])
            .current_dir(&fuzz_dir)
            .status()
            .context("Failed to run cargo fuzz")?;
        if !status.success() {
            bail!("fuzz target {} failed", target);
        }
    }
    Ok(())
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("no current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Exact > prefix > substring, and every bonus smaller than the gap it could close.
fn verify_constants() -> Result<()> {
    let root = project_root()?;
    let core = std::fs::read_to_string(root.join("src/scoring/core.rs"))
        .context("Failed to read src/scoring/core.rs")?;

    let exact = extract_const(&core, "EXACT_SCORE")?;
    let prefix = extract_const(&core, "PREFIX_SCORE")?;
    let substring = extract_const(&core, "SUBSTRING_SCORE")?;
    let ordered = extract_const(&core, "ORDERED_ADJACENCY_BONUS")?;
    let adjacency = extract_const(&core, "ADJACENCY_BONUS")?;

    if !(exact > prefix && prefix > substring && substring > 0.0) {
        bail!(
            "match tiers out of order: exact={} prefix={} substring={}",
            exact, prefix, substring
        );
    }
    if ordered < adjacency {
        bail!(
            "ordered adjacency bonus {} is smaller than plain adjacency {}",
            ordered, adjacency
        );
    }

    Ok(())
}

fn extract_const(content: &str, name: &str) -> Result<f64> {
    // Look for "pub const NAME: f64 = 1.0;"
    let prefix = format!("pub const {}: f64 =", name);
    for line in content.lines() {
        if let Some(rest) = line.trim().strip_prefix(&prefix) {
            let num = rest.trim().trim_end_matches(';').trim();
            return num
                .parse::<f64>()
                .with_context(|| format!("{} is not a number: {:?}", name, num));
        }
    }
    bail!("constant {} not found", name)
}
