// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fatal assertion channel for bring-up invariants.
//!
//! A violation here is a configuration or hardware defect, never a
//! transient condition: the failure is emitted over the raw UART and the
//! hart halts through the panic path. Call sites gate the checks on
//! `PortConfig::diagnostics`.

use core::fmt::{Arguments, Write};

use crate::uart;

/// Emits the failure message and panics; the panic handler parks the hart.
#[cold]
pub fn report_failure(args: Arguments<'_>) -> ! {
    let mut w = uart::raw_writer();
    let _ = w.write_str("FATAL: ");
    let _ = w.write_fmt(args);
    let _ = w.write_str("\n");
    panic!("{}", args);
}

/// Asserts a bring-up invariant.
#[macro_export]
macro_rules! fatal_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::diag::assert::report_failure(format_args!($($arg)+));
        }
    };
}
