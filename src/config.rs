// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Build-time configuration surface for the bring-up layer
//! OWNERS: @kernel-arch-team
//! PUBLIC API: PortConfig plus the `pub const` configuration items
//! DEPENDS_ON: core
//! INVARIANTS: Values are fixed at build time; PortConfig snapshots them so
//! diagnostic and release configurations stay testable from one binary

use static_assertions::const_assert;

/// Core clock feeding the machine timer.
pub const CPU_CLOCK_HZ: u64 = 100_000_000;

/// Scheduler tick rate.
pub const TICK_RATE_HZ: u64 = 1_000;

/// Address units reserved for the ISR stack.
pub const ISR_STACK_LENGTH: usize = 0x100;

/// Base of the core-local interrupt timer block. A zero base means an
/// external interrupt controller routes traps and platform code installs
/// the trap vector before the scheduler starts.
pub const CLINT_BASE: usize = 0x0200_0000;

/// Stack alignment required by the RISC-V psABI.
pub const STACK_ALIGNMENT: usize = 16;

const_assert!(STACK_ALIGNMENT.is_power_of_two());
const_assert!(TICK_RATE_HZ > 0);
const_assert!(ISR_STACK_LENGTH > 0);

/// Snapshot of the build-time configuration.
///
/// Bring-up code takes this by reference instead of reading the consts
/// directly, so tests can exercise alternative configurations without
/// rebuilding.
#[derive(Clone, Copy, Debug)]
pub struct PortConfig {
    pub cpu_clock_hz: u64,
    pub tick_rate_hz: u64,
    pub isr_stack_length: usize,
    pub clint_base: usize,
    pub stack_alignment: usize,
    /// Runtime invariant checking (stack alignment, trap-vector mode).
    pub diagnostics: bool,
    /// Stack overflow checking level; the ISR canary engages at 3.
    pub stack_check_level: u8,
}

impl PortConfig {
    pub const DEFAULT: Self = Self {
        cpu_clock_hz: CPU_CLOCK_HZ,
        tick_rate_hz: TICK_RATE_HZ,
        isr_stack_length: ISR_STACK_LENGTH,
        clint_base: CLINT_BASE,
        stack_alignment: STACK_ALIGNMENT,
        diagnostics: cfg!(feature = "diagnostics"),
        stack_check_level: if cfg!(feature = "stack_guard") { 3 } else { 1 },
    };

    /// Timer increments per scheduler tick (truncating division).
    #[inline]
    pub const fn tick_increment(&self) -> u64 {
        self.cpu_clock_hz / self.tick_rate_hz
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_increment_for_default_clock() {
        assert_eq!(PortConfig::DEFAULT.tick_increment(), 100_000);
    }

    #[test]
    fn tick_increment_truncates() {
        let mut cfg = PortConfig::DEFAULT;
        cfg.cpu_clock_hz = 99_999_999;
        assert_eq!(cfg.tick_increment(), 99_999);
    }
}
