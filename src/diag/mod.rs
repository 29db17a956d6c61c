// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics: structured boot logging and the fatal assertion channel.

pub mod assert;
pub mod log;
