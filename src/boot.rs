// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Bring-up sequence and scheduler bootstrap handshake
//! OWNERS: @kernel-arch-team
//! PUBLIC API: initialize(), start_scheduler(), end_scheduler(), StartError
//! DEPENDS_ON: stack, guard, hal, arch::riscv
//! INVARIANTS: Runs once per boot on a single hart, before any interrupt
//! is enabled; the first dispatch is irreversible except through
//! end_scheduler()

use core::fmt;

use crate::arch::riscv;
use crate::config::PortConfig;
use crate::fatal_assert;
use crate::guard;
use crate::hal::{ContextOps, TrapVector};
#[cfg(feature = "boot_banner")]
use crate::log_info;
use crate::log_warn;
use crate::stack::{self, InitError};
use crate::types::{IsrStackTop, StackTop};

// ——— bring-up ———

/// One-shot bring-up: carves the ISR stack out of the boot stack and, when
/// a core-local timer block is configured, installs the trap vector.
///
/// Returns the new ISR stack top for the portable initialization sequence
/// that runs before the scheduler starts. Fails without side effects when
/// the stack budget cannot cover the requested ISR region.
pub fn initialize(
    ctx: &mut impl ContextOps,
    vector: &impl TrapVector,
    cfg: &PortConfig,
    top_of_stack: StackTop,
) -> Result<IsrStackTop, InitError> {
    #[cfg(feature = "boot_banner")]
    log_info!(
        target: "boot",
        "bring-up: isr stack {} units, clint 0x{:08x}",
        cfg.isr_stack_length,
        cfg.clint_base
    );

    let partition = stack::partition(ctx, cfg, top_of_stack)?;

    if cfg.stack_check_level >= 3 {
        guard::fill(partition.isr_region().first(guard::GUARD_BAND_LENGTH), guard::FILL_BYTE);
    }

    if cfg.clint_base != 0 {
        // Core-local timer present: interrupts branch straight to the
        // kernel trap entry.
        vector.install(riscv::trap_entry());
    } else {
        // No CLINT block; the platform interrupt controller must route to
        // the trap entry before the scheduler starts.
        log_warn!(target: "boot", "no clint configured; trap vector install left to platform code");
    }

    Ok(partition.isr_top())
}

// ——— scheduler handshake ———

/// Failure status for a dispatch that unexpectedly returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartError {
    /// The first-task dispatch primitive returned, meaning the task
    /// environment was not ready. The caller reports a boot failure.
    DispatchReturned,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::DispatchReturned => f.write_str("first-task dispatch returned"),
        }
    }
}

/// Hands control to the first task.
///
/// Never returns on success; the only value a caller can observe is the
/// failure status. In diagnostic configurations the trap-vector mode and
/// the published ISR stack top are re-checked from live state immediately
/// before the dispatch.
pub fn start_scheduler(
    ctx: &mut impl ContextOps,
    vector: &impl TrapVector,
    cfg: &PortConfig,
) -> StartError {
    if cfg.diagnostics {
        fatal_assert!(
            vector.mode_bits() == 0,
            "trap vector mode bits {:#04b}, expected direct mode",
            vector.mode_bits()
        );
        fatal_assert!(
            stack::isr_stack_top().is_aligned_to(cfg.stack_alignment),
            "ISR stack top {} lost {}-unit alignment",
            stack::isr_stack_top(),
            cfg.stack_alignment
        );
    }

    ctx.dispatch_first_task();

    // Only an incomplete dispatch environment lets control reach this line.
    StartError::DispatchReturned
}

/// Scheduler-stop path: restores the context captured before the first
/// dispatch.
///
/// On a correctly functioning system execution resumes after the dispatch
/// site inside [`start_scheduler`] and never reaches the park loop below.
pub fn end_scheduler(ctx: &mut impl ContextOps) -> ! {
    ctx.restore_boot_context();

    loop {
        riscv::wait_for_interrupt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim::{SimContext, SimTrapVector};

    const TOP: StackTop = StackTop::from_raw(0x8001_0000);

    // Tests run against addresses no real memory backs; keep the canary
    // fill out of the picture unless a buffer-backed region is used.
    fn test_cfg() -> PortConfig {
        let mut cfg = PortConfig::DEFAULT;
        cfg.stack_check_level = 1;
        cfg
    }

    #[test]
    fn initialize_installs_vector_and_returns_isr_top() {
        let mut ctx = SimContext::reserving(0x100);
        let vector = SimTrapVector::new();
        let isr_top = initialize(&mut ctx, &vector, &test_cfg(), TOP).expect("initialize");
        assert_eq!(isr_top.as_raw(), 0x8001_0100);
        assert_eq!(vector.installs(), 1);
        assert_eq!(vector.mode_bits(), 0);
    }

    #[test]
    fn failed_partition_skips_the_trap_vector_write() {
        let mut ctx = SimContext::reserving(0);
        let vector = SimTrapVector::new();
        let err = initialize(&mut ctx, &vector, &test_cfg(), TOP).expect_err("must fail");
        assert_eq!(err, InitError::IsrStackUnavailable { requested: 0x100, reserved: 0 });
        assert_eq!(vector.installs(), 0);
    }

    #[test]
    fn zero_clint_base_leaves_the_vector_to_platform_code() {
        let mut cfg = test_cfg();
        cfg.clint_base = 0;
        let mut ctx = SimContext::reserving(0x100);
        let vector = SimTrapVector::new();
        initialize(&mut ctx, &vector, &cfg, TOP).expect("initialize");
        assert_eq!(vector.installs(), 0);
    }

    #[test]
    fn guard_band_is_filled_at_check_level_three() {
        let mut buffer = [0u8; 0x200];
        let base = buffer.as_mut_ptr() as usize;
        let mut cfg = PortConfig::DEFAULT;
        cfg.diagnostics = false; // buffer addresses carry no ABI alignment
        cfg.stack_check_level = 3;

        let mut ctx = SimContext::reserving(0x100);
        let vector = SimTrapVector::new();
        initialize(&mut ctx, &vector, &cfg, StackTop::from_raw(base)).expect("initialize");

        assert!(buffer[..guard::GUARD_BAND_LENGTH].iter().all(|&b| b == guard::FILL_BYTE));
        assert!(buffer[guard::GUARD_BAND_LENGTH..].iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic(expected = "direct mode")]
    fn vectored_mode_is_fatal_with_diagnostics() {
        let mut cfg = PortConfig::DEFAULT;
        cfg.diagnostics = true;
        let mut ctx = SimContext::reserving(0x100);
        let vector = SimTrapVector::new();
        vector.force_bits(0x8000_0001); // vectored encoding
        let _ = start_scheduler(&mut ctx, &vector, &cfg);
    }

    #[test]
    fn vectored_mode_is_not_checked_without_diagnostics() {
        let mut cfg = PortConfig::DEFAULT;
        cfg.diagnostics = false;
        let mut ctx = SimContext::reserving(0x100);
        let vector = SimTrapVector::new();
        vector.force_bits(0x8000_0001);
        let err = start_scheduler(&mut ctx, &vector, &cfg);
        assert_eq!(err, StartError::DispatchReturned);
        assert_eq!(ctx.dispatches, 1);
    }

    #[test]
    fn returning_dispatch_yields_the_documented_failure() {
        // Diagnostics read the process-wide ISR stack top, which sibling
        // tests rewrite concurrently; exercise the dispatch path without
        // them.
        let mut cfg = PortConfig::DEFAULT;
        cfg.diagnostics = false;
        let mut ctx = SimContext::reserving(0x100);
        let vector = SimTrapVector::new();
        vector.install(0x8000_0000);
        let err = start_scheduler(&mut ctx, &vector, &cfg);
        assert_eq!(err, StartError::DispatchReturned);
        assert_eq!(ctx.dispatches, 1);
    }
}
