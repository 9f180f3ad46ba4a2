//! Build script for S1 module firmware
//!
//! Puts `memory.x` on the linker search path for the nRF52811 target.

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-search={}", std::env::var("CARGO_MANIFEST_DIR").unwrap());
}
