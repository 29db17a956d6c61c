// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg(test)]
//! CONTEXT: Property-based tests for boot-stack partitioning
//! OWNERS: @kernel-arch-team
//! NOTE: Tests only; no kernel logic.
//!
//! TEST_SCOPE:
//!   - partition() covers every in-budget ISR length with an aligned top
//!   - the failure status is returned for any stack top once the
//!     relocation primitive reports zero units

use proptest::prelude::*;

use super::{partition, InitError};
use crate::config::PortConfig;
use crate::hal::sim::SimContext;
use crate::types::StackTop;

proptest! {
    #[test]
    fn reserves_at_least_the_requested_length(
        length in 1usize..=0x1000,
        top_sel in 1usize..=0x7ff,
    ) {
        let top = StackTop::from_raw(top_sel << 16);
        let mut cfg = PortConfig::DEFAULT;
        cfg.isr_stack_length = length;
        cfg.diagnostics = true;

        let mut ctx = SimContext::rounding_to(cfg.stack_alignment);
        let part = partition(&mut ctx, &cfg, top).expect("in-budget partition");

        prop_assert!(part.isr_top().as_raw() - part.task_stack_base() >= length);
        prop_assert!(part.isr_top().is_aligned_to(cfg.stack_alignment));
        prop_assert_eq!(part.isr_region().base(), top.as_raw());
        prop_assert_eq!(part.isr_top().as_raw(), part.isr_region().top());
    }

    #[test]
    fn zero_reservation_fails_for_any_top(top in any::<usize>()) {
        let mut ctx = SimContext::reserving(0);
        let err = partition(&mut ctx, &PortConfig::DEFAULT, StackTop::from_raw(top));
        prop_assert_eq!(
            err,
            Err(InitError::IsrStackUnavailable { requested: 0x100, reserved: 0 })
        );
        prop_assert_eq!(ctx.relocations, 1);
    }
}
