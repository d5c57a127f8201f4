use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Places the workspace `config.toml` next to the built binaries, where
/// `shared::config::load_config` looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        println!("cargo:warning=config.toml not found at {source_config:?}, using embedded default");
        return;
    }

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=could not locate target profile directory, config.toml not copied");
        return;
    };

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=failed to copy config.toml to {dest_config:?}: {e}");
    }
}

/// OUT_DIR is typically target/<profile>/build/backend-xxx/out
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
