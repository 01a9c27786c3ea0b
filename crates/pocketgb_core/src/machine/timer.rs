/// Divider and programmable timer.
///
/// Both counters accumulate elapsed T-cycles reported by the scheduler. The
/// register values (TIMA/TMA/TAC) live in the address space; only the
/// accumulators and the decoded clock divisor are kept here.
use super::{io, Interrupt, MemoryBus};

/// The divider accumulator wraps every 256 T-cycles.
const DIVIDER_PERIOD: u32 = 256;
/// TAC bit 2.
const TIMER_ENABLE: u8 = 0x04;
/// Clock divisor selected by TAC = 0 at power-on.
const DEFAULT_CLOCK_SPEED: u32 = 1024;

/// Cycles per TIMA increment for the TAC clock select bits:
/// 0 → 1024, 1 → 16, 2 → 64, 3 → 256.
pub fn clock_speed_for(tac: u8) -> u32 {
    match tac & 0x03 {
        0x00 => 1024,
        0x01 => 16,
        0x02 => 64,
        0x03 => 256,
        _ => unreachable!("clock select is two bits"),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimerState {
    pub(super) divider_counter: u32,
    pub(super) timer_counter: u32,
    pub(super) clock_speed: u32,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self {
            divider_counter: 0,
            timer_counter: 0,
            clock_speed: DEFAULT_CLOCK_SPEED,
        }
    }

    pub fn divider_counter(&self) -> u32 {
        self.divider_counter
    }

    pub fn timer_counter(&self) -> u32 {
        self.timer_counter
    }

    pub fn clock_speed(&self) -> u32 {
        self.clock_speed
    }

    pub(super) fn reset_divider(&mut self) {
        self.divider_counter = 0;
    }

    /// Switch divisors; the accumulator restarts only when the speed changes.
    pub(super) fn select_clock(&mut self, clock_speed: u32) {
        if clock_speed != self.clock_speed {
            self.timer_counter = 0;
            self.clock_speed = clock_speed;
        }
    }
}

impl MemoryBus {
    /// Advance the divider and timer by `cycles` T-cycles.
    pub fn tick_timer(&mut self, cycles: u32) {
        let tac = self.memory[io::TAC as usize];

        self.timer.divider_counter = (self.timer.divider_counter + cycles) % DIVIDER_PERIOD;

        if tac & TIMER_ENABLE == 0 {
            return;
        }

        self.timer.timer_counter += cycles;
        if self.timer.timer_counter >= self.timer.clock_speed {
            self.timer.timer_counter = 0;

            let tima = self.memory[io::TIMA as usize];
            if tima == 0xFF {
                self.memory[io::TIMA as usize] = self.memory[io::TMA as usize];
                self.request_interrupt(Interrupt::Timer);
            } else {
                self.memory[io::TIMA as usize] = tima + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_select_mapping() {
        assert_eq!(clock_speed_for(0x00), 1024);
        assert_eq!(clock_speed_for(0x05), 16);
        assert_eq!(clock_speed_for(0x06), 64);
        assert_eq!(clock_speed_for(0xFF), 256);
    }

    #[test]
    fn selecting_same_speed_keeps_accumulator() {
        let mut timer = TimerState::new();
        timer.timer_counter = 100;
        timer.select_clock(1024);
        assert_eq!(timer.timer_counter(), 100);
        timer.select_clock(16);
        assert_eq!(timer.timer_counter(), 0);
        assert_eq!(timer.clock_speed(), 16);
    }
}
