use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    println!(
        "cargo:rustc-env=FUZZGATE_BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339()
    );

    // Source tarballs build without git; the health route reports "unknown".
    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"]).is_some();
    let suffix = if dirty && hash != "unknown" { "-dirty" } else { "" };
    println!("cargo:rustc-env=FUZZGATE_GIT_HASH={hash}{suffix}");
}
