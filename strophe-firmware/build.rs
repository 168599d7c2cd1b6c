//! Build script for strophe-firmware
//!
//! Sets up linker search paths for memory.x and rebuilds when the
//! embedded keymap changes.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();

    // knob.toml is embedded with include_str!, so a missing file would
    // otherwise only surface as a confusing rustc error
    println!("cargo:rerun-if-changed=knob.toml");
    if !Path::new("knob.toml").exists() {
        panic!("knob.toml not found - the firmware embeds it as the default keymap");
    }
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
