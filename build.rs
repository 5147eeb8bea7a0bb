// Embeds the crate version as LALA_VERSION at compile time.
// CI can replace the patch segment by setting LALA_PATCH_VERSION.

use std::env;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set");

    let Some((major_minor, patch)) = version.rsplit_once('.') else {
        panic!("Invalid version format in Cargo.toml: {}", version);
    };
    if major_minor.split('.').count() != 2 {
        panic!("Invalid version format in Cargo.toml: {}", version);
    }

    let patch = env::var("LALA_PATCH_VERSION").unwrap_or_else(|_| patch.to_string());

    println!("cargo:rustc-env=LALA_VERSION={}.{}", major_minor, patch);
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=LALA_PATCH_VERSION");
}
