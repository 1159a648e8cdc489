//! Forwards build metadata from the environment into the compile environment.
//!
//! CI sets these variables (e.g. `DALGEN_BUILD_HASH=$(git rev-parse --short HEAD)`);
//! unset variables stay unset and `BuildInfo::current()` falls back to `"None"`.

use std::env;

const FORWARDED: [&str; 5] = [
    "DALGEN_VERSION",
    "DALGEN_GIT_BRANCH",
    "DALGEN_BUILD_HASH",
    "DALGEN_BUILD_TIME",
    "DALGEN_SERVICE_NAME",
];

fn main() {
    for key in FORWARDED {
        println!("cargo:rerun-if-env-changed={key}");
        if let Ok(value) = env::var(key) {
            if !value.is_empty() {
                println!("cargo:rustc-env={key}={value}");
            }
        }
    }
}
