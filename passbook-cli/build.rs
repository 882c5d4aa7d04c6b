//! Stamps `PASSBOOK_BUILD_SHA` for `passbook --version`.
//!
//! Source tarballs have no git metadata, so an externally supplied
//! `PASSBOOK_BUILD_SHA` wins; otherwise `git describe` of the checkout,
//! marked `-dirty` when the tree has local edits.

use std::path::Path;
use std::process::Command;

fn git_describe(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into());
    let repo_root = Path::new(&manifest_dir).join("..");

    let sha = std::env::var("PASSBOOK_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_describe(&repo_root))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PASSBOOK_BUILD_SHA={sha}");
    println!("cargo:rerun-if-env-changed=PASSBOOK_BUILD_SHA");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}
