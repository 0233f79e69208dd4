use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../data/inventory_projection.json");

    // Get the output directory where the binary will be placed
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap(); // "debug" or "release"

    // OUT_DIR is typically: target/debug/build/backend-xxx/out
    // We need to go to: target/debug or target/release
    let out_path = Path::new(&out_dir);
    let target_dir = out_path
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    // config.toml and the projection fixture live next to the executable
    for relative in ["config.toml", "data/inventory_projection.json"] {
        let source = workspace_root.join(relative);
        let dest = target_dir.join(relative);

        if !source.exists() {
            println!(
                "cargo:warning={} not found at {:?}, using defaults",
                relative, source
            );
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", parent, e));
        }
        fs::copy(&source, &dest)
            .unwrap_or_else(|e| panic!("Failed to copy {}: {}", relative, e));
    }
}
