use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=PLATFORM_CATALOG_REPO_HINT");

    let Some(raw_hint) = env::var("PLATFORM_CATALOG_REPO_HINT")
        .ok()
        .filter(|hint| !hint.trim().is_empty())
    else {
        return;
    };

    let candidate = PathBuf::from(raw_hint);
    let canonical = candidate.canonicalize().unwrap_or(candidate);

    println!(
        "cargo:rustc-env=PLATFORM_CATALOG_REPO_HINT={}",
        canonical.display()
    );
}
