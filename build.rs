// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

fn main() {
    println!("cargo:rerun-if-env-changed=AXON_PORT_LINKER_SCRIPT");
    if let Ok(script) = std::env::var("AXON_PORT_LINKER_SCRIPT") {
        println!("cargo:rustc-link-arg=-T{script}");
    }
}
