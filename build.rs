/// Jumble build script.
///
/// Jumble only moves icons on Windows.  Other targets still build so the
/// layout core and settings can be developed and tested anywhere, but the
/// desktop commands report `Unsupported` at runtime.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=jumble targets Windows (CARGO_CFG_TARGET_OS = {target_os:?}); \
             desktop commands will be unavailable"
        );
    }

    // Only re-run the build script when it changes.
    println!("cargo:rerun-if-changed=build.rs");
}
