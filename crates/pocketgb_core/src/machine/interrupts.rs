use super::{io, MemoryBus};
use crate::processor::CpuState;

/// Interrupt sources, in priority order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn mask(self) -> u8 {
        1 << self as u8
    }

    /// Dispatch address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }
}

/// Progress of a delayed `EI` or `DI`.
///
/// The request is recorded while the triggering instruction executes, armed
/// once that instruction retires, and applied when the following instruction
/// retires.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ImeTransition {
    #[default]
    Idle,
    Requested,
    Armed,
}

impl ImeTransition {
    /// Advance by one retired instruction; returns `true` when the change
    /// should be applied now.
    fn retire(&mut self) -> bool {
        let (next, apply) = match *self {
            ImeTransition::Idle => (ImeTransition::Idle, false),
            ImeTransition::Requested => (ImeTransition::Armed, false),
            ImeTransition::Armed => (ImeTransition::Idle, true),
        };
        *self = next;
        apply
    }
}

/// Master enable flag plus independent delayed enable and disable requests.
/// The request and enable registers themselves live in the address space
/// (0xFF0F, 0xFFFF).
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    master_enable: bool,
    pending_enable: ImeTransition,
    pending_disable: ImeTransition,
}

impl MemoryBus {
    /// Set the request flag for `interrupt` in IF.
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.memory[io::IF as usize] |= interrupt.mask();
    }

    /// Interrupts both requested and enabled.
    pub fn pending_interrupts(&self) -> u8 {
        self.memory[io::IF as usize] & self.memory[io::IE as usize] & 0x1F
    }
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn master_enable(&self) -> bool {
        self.master_enable
    }

    /// Immediate change, as performed by `RETI`.
    pub fn set_master_enable(&mut self, enabled: bool) {
        self.master_enable = enabled;
    }

    pub fn pending_enable(&self) -> ImeTransition {
        self.pending_enable
    }

    pub fn pending_disable(&self) -> ImeTransition {
        self.pending_disable
    }

    /// `EI`: enable after the next instruction retires.
    pub fn request_enable(&mut self) {
        self.pending_enable = ImeTransition::Requested;
    }

    /// `DI`: disable after the next instruction retires.
    pub fn request_disable(&mut self) {
        self.pending_disable = ImeTransition::Requested;
    }

    /// Advance both pending transitions; called once per completed
    /// instruction. When both land on the same boundary the enable wins.
    pub fn retire_instruction(&mut self) {
        if self.pending_disable.retire() {
            self.master_enable = false;
        }
        if self.pending_enable.retire() {
            self.master_enable = true;
        }
    }

    /// Dispatch the highest-priority pending interrupt, if allowed.
    ///
    /// A halted processor is woken by any pending interrupt even while the
    /// master enable is clear; it then resumes without dispatching.
    pub fn service_due(&mut self, cpu: &mut CpuState, bus: &mut MemoryBus) -> Option<Interrupt> {
        let pending = bus.pending_interrupts();
        if pending == 0 {
            return None;
        }
        if !self.master_enable {
            cpu.halted = false;
            return None;
        }

        let interrupt = Interrupt::ALL
            .into_iter()
            .find(|interrupt| pending & interrupt.mask() != 0)?;

        let pc = cpu.regs.pc;
        cpu.push_word(bus, pc);
        cpu.halted = false;
        self.master_enable = false;
        bus.memory[io::IF as usize] &= !interrupt.mask();
        cpu.regs.pc = interrupt.vector();

        log::debug!(
            "Interrupt {:?}: pc=0x{:04X} -> 0x{:04X} sp=0x{:04X}",
            interrupt,
            pc,
            cpu.regs.pc,
            cpu.regs.sp
        );
        Some(interrupt)
    }
}
