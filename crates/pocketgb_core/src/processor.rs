//! Processor collaborator boundary.
//!
//! The instruction decoder lives outside this crate. The machine only needs
//! something that can execute the instruction at `PC` and report how long it
//! took; everything else (timer, PPU, interrupts) is driven from that cycle
//! count.
mod regs;

pub use regs::{RegisterPair, Registers};

use crate::machine::{InterruptController, MemoryBus};

/// Result of executing a single instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub opcode: u8,
    /// Elapsed T-cycles.
    pub cycles: u32,
}

/// Architectural processor state shared between the decoder and the machine.
#[derive(Clone, Debug, Default)]
pub struct CpuState {
    pub regs: Registers,
    pub halted: bool,
}

impl CpuState {
    /// Post-boot-ROM register state (PC at the cartridge entry point).
    pub fn reset(&mut self) {
        self.regs = Registers::post_boot();
        self.halted = false;
    }

    /// Push a 16-bit word onto the stack, high byte first.
    pub fn push_word(&mut self, bus: &mut MemoryBus, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write(self.regs.sp, lo);
    }

    /// Pop a 16-bit word pushed by [`CpuState::push_word`].
    pub fn pop_word(&mut self, bus: &mut MemoryBus) -> u16 {
        let lo = bus.read(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_be_bytes([hi, lo])
    }
}

/// Instruction execution collaborator.
///
/// Implementations decode and execute the instruction at `cpu.regs.pc`,
/// routing every memory access through `bus`. `EI`/`DI` must be reported via
/// [`InterruptController::request_enable`] and
/// [`InterruptController::request_disable`] so the one-instruction delay is
/// applied by the machine. The machine never calls `step` while
/// `cpu.halted` is set.
pub trait Processor {
    fn step(
        &mut self,
        cpu: &mut CpuState,
        bus: &mut MemoryBus,
        interrupts: &mut InterruptController,
    ) -> Step;
}

/// Processor that treats every opcode as a 4-cycle no-op.
///
/// Useful for driving the peripherals (timer, PPU, DMA) from a host without
/// an instruction decoder, e.g. for frame dumps of a freshly loaded
/// cartridge.
#[derive(Clone, Debug, Default)]
pub struct NopProcessor;

impl Processor for NopProcessor {
    fn step(
        &mut self,
        cpu: &mut CpuState,
        bus: &mut MemoryBus,
        _interrupts: &mut InterruptController,
    ) -> Step {
        let opcode = bus.read(cpu.regs.pc);
        cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
        Step { opcode, cycles: 4 }
    }
}
