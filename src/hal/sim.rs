// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Software-simulated register and context implementations for host-side
//! tests.

use core::cell::Cell;

use super::{ContextOps, MachineTimer, TrapVector};
use crate::types::StackTop;

/// Trap-vector register emulated in a `Cell`.
#[derive(Default)]
pub struct SimTrapVector {
    bits: Cell<usize>,
    installs: Cell<usize>,
}

impl SimTrapVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces raw register bits, including vectored-mode encodings a real
    /// install would never produce.
    pub fn force_bits(&self, bits: usize) {
        self.bits.set(bits);
    }

    /// Number of installs performed through the capability.
    pub fn installs(&self) -> usize {
        self.installs.get()
    }
}

impl TrapVector for SimTrapVector {
    fn install(&self, entry: usize) {
        // Direct mode: the low two bits read back as 00.
        self.bits.set(entry & !0x3);
        self.installs.set(self.installs.get() + 1);
    }

    fn mode_bits(&self) -> usize {
        self.bits.get() & 0x3
    }
}

/// Count/compare register pair emulated in `Cell`s.
#[derive(Default)]
pub struct SimTimer {
    count: Cell<u64>,
    compare: Cell<u64>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(count: u64) -> Self {
        let timer = Self::default();
        timer.count.set(count);
        timer
    }

    /// Advances the simulated counter, standing in for hardware.
    pub fn run_for(&self, cycles: u64) {
        self.count.set(self.count.get().wrapping_add(cycles));
    }

    /// Last value programmed into the comparator.
    pub fn compare(&self) -> u64 {
        self.compare.get()
    }
}

impl MachineTimer for SimTimer {
    fn count(&self) -> u64 {
        self.count.get()
    }

    fn set_compare(&self, deadline: u64) {
        self.compare.set(deadline);
    }

    fn count_addr(&self) -> usize {
        self.count.as_ptr() as usize
    }

    fn compare_addr(&self) -> usize {
        self.compare.as_ptr() as usize
    }
}

enum ReserveBehavior {
    /// Reports a fixed unit count regardless of the request.
    Fixed(usize),
    /// Reports the request rounded up to the given alignment.
    RoundUp(usize),
}

/// Context-layer double with a scripted relocation result.
pub struct SimContext {
    behavior: ReserveBehavior,
    pub relocations: usize,
    pub dispatches: usize,
    pub restores: usize,
}

impl SimContext {
    /// Relocation reports exactly `units`; 0 forces the failure path.
    pub fn reserving(units: usize) -> Self {
        Self { behavior: ReserveBehavior::Fixed(units), relocations: 0, dispatches: 0, restores: 0 }
    }

    /// Relocation reports the requested length rounded up to `alignment`.
    pub fn rounding_to(alignment: usize) -> Self {
        Self {
            behavior: ReserveBehavior::RoundUp(alignment),
            relocations: 0,
            dispatches: 0,
            restores: 0,
        }
    }
}

impl ContextOps for SimContext {
    fn relocate_stack(&mut self, _top_of_stack: StackTop, length: usize) -> usize {
        self.relocations += 1;
        match self.behavior {
            ReserveBehavior::Fixed(units) => units,
            ReserveBehavior::RoundUp(alignment) => length.div_ceil(alignment) * alignment,
        }
    }

    fn dispatch_first_task(&mut self) {
        // Returning models an incomplete dispatch environment.
        self.dispatches += 1;
    }

    fn restore_boot_context(&mut self) {
        self.restores += 1;
    }
}
