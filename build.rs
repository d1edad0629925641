use anyhow::{Context, Result, bail};
use chrono::{DateTime, TimeZone, Utc};
use std::env;
use std::fs;
use std::process::Command;
use vergen_gitcl::{Emitter, GitclBuilder};

const LIBRARY: &str = "i2s";
const LIBRARY_MANIFEST: &str = "i2s/Cargo.toml";

fn main() -> Result<()> {
    let gitcl = GitclBuilder::default()
        .describe(true, true, Some("[0-9]*"))
        .build()?;

    let gitcl_res = Emitter::default()
        .idempotent()
        .fail_on_error()
        .add_instructions(&gitcl)
        .and_then(|emitter| emitter.emit());

    if let Err(e) = gitcl_res {
        eprintln!("git describe unavailable, building without it: {e:?}");
        Emitter::default().idempotent().fail_on_error().emit()?;
    }

    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        build_time()?.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let version = library_version_from_metadata()
        .or_else(|_| library_version_from_manifest())
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=I2S_VERSION={version}");
    println!("cargo:rerun-if-changed={LIBRARY_MANIFEST}");

    Ok(())
}

/// Honors `SOURCE_DATE_EPOCH` for reproducible builds.
fn build_time() -> Result<DateTime<Utc>> {
    match env::var("SOURCE_DATE_EPOCH") {
        Ok(val) => {
            let secs: i64 = val
                .trim()
                .parse()
                .with_context(|| format!("SOURCE_DATE_EPOCH is not an integer: {val:?}"))?;
            Utc.timestamp_opt(secs, 0)
                .single()
                .with_context(|| format!("SOURCE_DATE_EPOCH out of range: {secs}"))
        }
        Err(_) => Ok(Utc::now()),
    }
}

fn library_version_from_metadata() -> Result<String> {
    let output = Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()))
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()?;

    if !output.status.success() {
        bail!("cargo metadata failed");
    }

    let metadata: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let packages = metadata["packages"].as_array().context("no packages in metadata")?;

    packages
        .iter()
        .find(|package| package["name"].as_str() == Some(LIBRARY))
        .and_then(|package| package["version"].as_str())
        .map(str::to_string)
        .with_context(|| format!("{LIBRARY} package not found in metadata"))
}

fn library_version_from_manifest() -> Result<String> {
    let manifest = fs::read_to_string(LIBRARY_MANIFEST)?;

    manifest
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("version"))
        .find_map(|line| line.split_once('='))
        .map(|(_, value)| value.trim().trim_matches('"').trim_matches('\'').to_string())
        .with_context(|| format!("no version in {LIBRARY_MANIFEST}"))
}
