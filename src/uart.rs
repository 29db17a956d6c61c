// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Minimal UART support for boot diagnostics.

use core::fmt::{self, Write};
use spin::Mutex;

/// Address of the first UART on the target SoC.
const UART0_BASE: usize = 0x1000_0000;
#[allow(dead_code)]
const UART_TX: usize = 0x0;
#[allow(dead_code)]
const UART_LSR: usize = 0x5;
#[allow(dead_code)]
const LSR_TX_IDLE: u8 = 1 << 5;

/// Global UART writer used for boot logs.
static UART0: Mutex<KernelUart> = Mutex::new(KernelUart::new(UART0_BASE));

/// UART implementation capable of formatted writes.
pub struct KernelUart {
    base: usize,
}

impl KernelUart {
    /// Creates a UART abstraction rooted at `base`.
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    /// Returns a guard for the boot UART singleton.
    pub fn lock() -> spin::MutexGuard<'static, KernelUart> {
        UART0.lock()
    }

    fn put(&self, byte: u8) {
        #[cfg(all(target_arch = "riscv32", target_os = "none"))]
        unsafe {
            while core::ptr::read_volatile((self.base + UART_LSR) as *const u8) & LSR_TX_IDLE == 0 {
            }
            core::ptr::write_volatile((self.base + UART_TX) as *mut u8, byte);
        }
        #[cfg(not(all(target_arch = "riscv32", target_os = "none")))]
        {
            let _ = (self.base, byte);
        }
    }
}

impl Write for KernelUart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' {
                self.put(b'\r');
            }
            self.put(byte);
        }
        Ok(())
    }
}

// Lock-free UART emission for fatal/panic contexts where the mutex may
// already be held.
fn put_raw(byte: u8) {
    #[cfg(all(target_arch = "riscv32", target_os = "none"))]
    unsafe {
        while core::ptr::read_volatile((UART0_BASE + UART_LSR) as *const u8) & LSR_TX_IDLE == 0 {}
        core::ptr::write_volatile((UART0_BASE + UART_TX) as *mut u8, byte);
    }
    #[cfg(not(all(target_arch = "riscv32", target_os = "none")))]
    {
        let _ = byte;
    }
}

pub struct RawUart;

impl Write for RawUart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' {
                put_raw(b'\r');
            }
            put_raw(byte);
        }
        Ok(())
    }
}

pub fn raw_writer() -> RawUart {
    RawUart
}

/// Writes a line terminated by `\n` via the global UART.
pub fn write_line(message: &str) {
    let mut uart = KernelUart::lock();
    let _ = uart.write_str(message);
    let _ = uart.write_str("\n");
}
