use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = Path::new(&manifest_dir).join("..");

    let sha = git_short_sha(&repo_root).unwrap_or_else(|| "unknown".to_string());

    for path in git_watch_paths(&repo_root.join(".git")) {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    println!("cargo:rustc-env=WEEKPLAN_BUILD_SHA={sha}");
}

fn git_short_sha(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

/// HEAD, the branch ref it points at, and packed-refs: a new commit on the
/// current branch touches one of them, a checkout touches HEAD.
fn git_watch_paths(git_dir: &Path) -> Vec<PathBuf> {
    let head = git_dir.join("HEAD");
    let mut paths = vec![head.clone(), git_dir.join("packed-refs")];
    if let Some(branch_ref) = std::fs::read_to_string(&head)
        .ok()
        .and_then(|s| s.strip_prefix("ref: ").map(|r| r.trim().to_string()))
    {
        paths.push(git_dir.join(branch_ref));
    }
    // A missing path would rerun the script on every build.
    paths.retain(|p| p.exists());
    paths
}
