// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! RISC-V bring-up and scheduler bootstrap for the Axon RTOS.
//!
//! This crate is linked into the kernel image as a static library. It owns
//! the boot-stack partitioning, the machine trap-vector install and the
//! one-shot handshake that hands control to the first task, and it defines
//! the tick deadline state the timer interrupt path services afterwards.
//! Host builds compile the full logic against simulated registers
//! (`hal::sim`).

#![cfg_attr(not(test), no_std)]
#![forbid(clippy::unwrap_used)]

pub mod arch;
pub mod boot;
pub mod config;
pub mod diag;
pub mod guard;
pub mod hal;
#[cfg(feature = "panic_handler")]
mod panic;
pub mod stack;
pub mod tick;
pub mod types;
pub mod uart;

pub use boot::{end_scheduler, initialize, start_scheduler, StartError};
pub use config::PortConfig;
pub use stack::InitError;
