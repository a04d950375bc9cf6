use std::env;
use std::process::Command;

// Kernels are selected at runtime, so the build script only needs to know
// which toolchain channel it runs on: the 512-bit kernel relies on target
// features that older stable compilers reject.
struct PlatformDetector;

impl PlatformDetector {
    fn compiler_channel() -> String {
        let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

        // A missing rustc here only costs us the nightly-only kernels.
        let version_info = Command::new(rustc)
            .args(["--version", "--verbose"])
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).into_owned())
            .unwrap_or_default();

        if version_info.contains("nightly") {
            "nightly".to_string()
        } else {
            "stable".to_string()
        }
    }

    fn apply(rustc_channel: &str) {
        // Create a flag for modules that can be used in nightly builds only
        println!("cargo:rustc-cfg=rustc_channel=\"{rustc_channel}\"");

        // Disable flag warnings for build
        println!("cargo::rustc-check-cfg=cfg(rustc_channel, values(\"nightly\", \"stable\"))");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc_channel = PlatformDetector::compiler_channel();
    PlatformDetector::apply(&rustc_channel);
}
