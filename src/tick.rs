// Copyright 2026 Axon RTOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Tick deadline state shared with the timer interrupt path
//! OWNERS: @kernel-arch-team
//! PUBLIC API: TickDeadline, setup(), install(), advance(), current()
//! DEPENDS_ON: hal::MachineTimer (count/compare register capability)
//! INVARIANTS: deadline[N+1] = deadline[N] + increment, exactly, in 64-bit
//! arithmetic; the increment never changes after construction

use spin::Mutex;

use crate::config::PortConfig;
use crate::hal::MachineTimer;

/// Absolute 64-bit deadline of the next scheduler tick plus the immutable
/// per-tick increment.
///
/// A 32-bit comparator would wrap mid tick period at realistic clock/tick
/// ratios, so the count and compare registers are modelled as 64-bit end
/// to end and every deadline step is a full 64-bit addition.
#[derive(Clone, Copy, Debug)]
pub struct TickDeadline {
    next: u64,
    increment: u64,
}

impl TickDeadline {
    /// Derives the per-tick increment from the clock configuration.
    pub const fn new(cfg: &PortConfig) -> Self {
        Self { next: 0, increment: cfg.tick_increment() }
    }

    /// Seeds the first deadline from the current counter value and programs
    /// the comparator. Runs once at bring-up; enabling the timer interrupt
    /// stays with the kernel.
    pub fn seed(&mut self, timer: &impl MachineTimer) -> u64 {
        self.next = timer.count().wrapping_add(self.increment);
        timer.set_compare(self.next);
        self.next
    }

    /// Advances the deadline by exactly one increment and programs the
    /// comparator. The external tick ISR calls this once per service.
    pub fn advance(&mut self, timer: &impl MachineTimer) -> u64 {
        self.next = self.next.wrapping_add(self.increment);
        timer.set_compare(self.next);
        self.next
    }

    /// Next absolute deadline.
    pub const fn next(&self) -> u64 {
        self.next
    }

    /// Timer increments per tick.
    pub const fn increment(&self) -> u64 {
        self.increment
    }
}

// ——— process-wide instance ———

static NEXT_TICK: Mutex<TickDeadline> = Mutex::new(TickDeadline::new(&PortConfig::DEFAULT));

/// Builds the deadline state from `cfg`, seeds the first deadline and
/// installs it process-wide. Returns the first deadline.
pub fn setup(cfg: &PortConfig, timer: &impl MachineTimer) -> u64 {
    let mut deadline = TickDeadline::new(cfg);
    let first = deadline.seed(timer);
    install(deadline);
    first
}

/// Replaces the process-wide deadline state.
pub fn install(deadline: TickDeadline) {
    *NEXT_TICK.lock() = deadline;
}

/// Advances the process-wide deadline; the tick ISR calls this once per
/// service.
pub fn advance(timer: &impl MachineTimer) -> u64 {
    NEXT_TICK.lock().advance(timer)
}

/// Current absolute deadline value.
pub fn current() -> u64 {
    NEXT_TICK.lock().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim::SimTimer;

    #[test]
    fn increment_matches_clock_over_tick_rate() {
        let deadline = TickDeadline::new(&PortConfig::DEFAULT);
        assert_eq!(deadline.increment(), 100_000);
    }

    #[test]
    fn deadlines_step_exactly_across_the_32_bit_boundary() {
        let timer = SimTimer::with_count(4_294_900_000);
        let mut deadline = TickDeadline::new(&PortConfig::DEFAULT);

        let d0 = deadline.seed(&timer);
        assert_eq!(d0, 4_295_000_000);
        assert!(d0 > u64::from(u32::MAX));
        assert_eq!(timer.compare(), d0);

        for k in 1..=10u64 {
            let next = deadline.advance(&timer);
            assert_eq!(next, d0 + 100_000 * k);
            assert_eq!(timer.compare(), next);
        }
    }

    #[test]
    fn seed_programs_count_plus_increment() {
        let timer = SimTimer::with_count(5_000);
        let mut deadline = TickDeadline::new(&PortConfig::DEFAULT);
        assert_eq!(deadline.seed(&timer), 105_000);
        timer.run_for(42);
        // The deadline only moves on advance, never with the counter.
        assert_eq!(deadline.next(), 105_000);
    }

    #[test]
    fn process_wide_instance_tracks_advances() {
        let timer = SimTimer::with_count(0);
        let mut cfg = PortConfig::DEFAULT;
        cfg.cpu_clock_hz = 32_768;
        cfg.tick_rate_hz = 128;

        let first = setup(&cfg, &timer);
        assert_eq!(first, 256);
        assert_eq!(advance(&timer), 512);
        assert_eq!(current(), 512);
        assert_eq!(timer.compare(), 512);
    }
}
