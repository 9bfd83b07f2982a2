use std::env;

fn main() {
    // The library half of the crate builds for the host (test suite); the
    // linker flag only applies to the firmware image itself.
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=atmega128");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
