use std::env;
use std::process::Command;

fn main() {
    let minor = rustc_minor_version();
    // rustc-check-cfg is understood since 1.80
    let check_cfg = minor.is_some_and(|v| v >= 80);
    let cfg = |name: &str, enabled: bool| {
        if check_cfg {
            println!("cargo:rustc-check-cfg=cfg({name})");
        }
        if enabled {
            println!("cargo:rustc-cfg={name}");
        }
    };

    // core::error::Error
    cfg("error_in_core", minor.is_some_and(|v| v >= 81));

    println!("cargo::rerun-if-env-changed=TENSOR_VIEW_DENY_WARNINGS");
    let deny_warnings = env::var_os("TENSOR_VIEW_DENY_WARNINGS").is_some_and(|v| v == "1");
    cfg("deny_warnings", deny_warnings);
}

/// The minor version of the compiler, `81` for `rustc 1.81.0`.
fn rustc_minor_version() -> Option<u32> {
    let rustc = env::var_os("RUSTC")?;
    let output = Command::new(rustc).arg("--version").output().ok()?;
    let version = String::from_utf8(output.stdout).ok()?;
    let version = version.strip_prefix("rustc 1.")?;
    version.split('.').next()?.parse().ok()
}
