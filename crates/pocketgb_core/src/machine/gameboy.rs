use std::path::Path;

use pocketgb_common::Key;

use super::{Cartridge, Framebuffer, InterruptController, JoypadKey, MemoryBus, Ppu};
use crate::config::MachineConfig;
use crate::error::CartridgeError;
use crate::processor::{CpuState, Processor, Step};

/// Opcode reported for steps spent halted.
const HALT_OPCODE: u8 = 0x76;
/// Cycles charged per step while halted.
const HALT_CYCLES: u32 = 4;

/// Host callbacks driven by [`GameBoy::update`].
pub trait FrameHooks {
    /// Debug breakpoint condition, checked before every instruction while a
    /// pause is pending.
    fn should_pause(&mut self, _cpu: &CpuState) -> bool {
        false
    }

    /// Called once per completed frame.
    fn present(&mut self, _frame: &Framebuffer) {}

    /// Polled once per step; returns a key transition (`true` = pressed).
    fn poll_input(&mut self) -> Option<(JoypadKey, bool)> {
        None
    }
}

impl FrameHooks for () {}

/// Outcome of a [`GameBoy::update`] call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameStatus {
    /// The frame budget was consumed and the frame presented.
    Completed,
    /// Stopped at an instruction boundary because of a debug pause.
    Paused,
    /// The processor reported a zero-cycle step.
    Stalled,
    /// No cartridge loaded.
    Idle,
}

/// High-level Game Boy machine.
///
/// Owns the bus, the peripherals and the processor collaborator, and
/// schedules them one frame at a time.
pub struct GameBoy<P, H = ()> {
    pub cpu: CpuState,
    pub bus: MemoryBus,
    pub interrupts: InterruptController,
    pub ppu: Ppu,
    processor: P,
    hooks: H,
    config: MachineConfig,
    game_loaded: bool,
    paused: bool,
    pause_pending: bool,
    total_opcodes: u64,
    cycles_this_update: u32,
}

impl<P: Processor, H: FrameHooks> GameBoy<P, H> {
    pub fn new(config: MachineConfig, processor: P, hooks: H) -> Self {
        let mut gb = Self {
            cpu: CpuState::default(),
            bus: MemoryBus::default(),
            interrupts: InterruptController::new(),
            ppu: Ppu::new(config.palette),
            processor,
            hooks,
            config,
            game_loaded: false,
            paused: false,
            pause_pending: false,
            total_opcodes: 0,
            cycles_this_update: 0,
        };
        gb.reset_core();
        gb
    }

    /// Load a raw cartridge image, replacing any running game.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), CartridgeError> {
        if self.game_loaded {
            self.stop_game();
        }
        let cartridge = Cartridge::from_bytes(rom)?;
        self.insert_cartridge(cartridge);
        Ok(())
    }

    /// Load a cartridge image from storage, replacing any running game.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<(), CartridgeError> {
        if self.game_loaded {
            self.stop_game();
        }
        let cartridge = Cartridge::from_file(path)?;
        self.insert_cartridge(cartridge);
        Ok(())
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        log::info!(
            "Loading '{}' ({} bytes, {:?}, {} ROM banks, {} RAM banks)",
            cartridge.title(),
            cartridge.len(),
            cartridge.controller(),
            cartridge.declared_rom_banks(),
            cartridge.ram_bank_count()
        );
        self.bus.insert_cartridge(cartridge);
        self.reset_core();
        self.game_loaded = true;
    }

    /// Power-on state for the inserted cartridge.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.reset_core();
    }

    fn reset_core(&mut self) {
        self.cpu.reset();
        self.interrupts = InterruptController::new();
        self.ppu.reset();
        self.paused = false;
        self.pause_pending = false;
        self.total_opcodes = 0;
        self.cycles_this_update = 0;
    }

    /// Eject the cartridge and return to an idle machine.
    pub fn stop_game(&mut self) {
        log::info!("Stopping game after {} opcodes", self.total_opcodes);
        self.bus.insert_cartridge(Cartridge::empty());
        self.reset_core();
        self.game_loaded = false;
    }

    pub fn is_game_loaded(&self) -> bool {
        self.game_loaded
    }

    /// Run one frame's worth of cycles.
    ///
    /// Each step executes one instruction and fans its cycle cost out to the
    /// timer and PPU, polls input, then services interrupts. Pauses are only
    /// honoured at instruction boundaries; a paused frame is not resumed, the
    /// next call starts a fresh budget.
    pub fn update(&mut self) -> FrameStatus {
        if !self.game_loaded {
            return FrameStatus::Idle;
        }

        self.cycles_this_update = 0;
        while self.cycles_this_update < self.config.frame_cycles {
            if self.paused {
                return FrameStatus::Paused;
            }
            if self.pause_pending && self.hooks.should_pause(&self.cpu) {
                log::debug!("Pause condition hit at pc=0x{:04X}", self.cpu.regs.pc);
                self.pause_pending = false;
                self.paused = true;
                return FrameStatus::Paused;
            }

            let step = self.execute_next_opcode();
            if step.cycles == 0 {
                log::warn!(
                    "Processor stalled on opcode 0x{:02X} at pc=0x{:04X}",
                    step.opcode,
                    self.cpu.regs.pc
                );
                return FrameStatus::Stalled;
            }
            self.cycles_this_update += step.cycles;

            self.bus.tick_timer(step.cycles);
            self.ppu.step(&mut self.bus, step.cycles);
            self.poll_input();
            self.interrupts.service_due(&mut self.cpu, &mut self.bus);
        }

        self.hooks.present(self.ppu.framebuffer());
        FrameStatus::Completed
    }

    /// Execute a single instruction, or idle for one step while halted.
    pub fn execute_next_opcode(&mut self) -> Step {
        if self.cpu.halted {
            return Step {
                opcode: HALT_OPCODE,
                cycles: HALT_CYCLES,
            };
        }

        let step = self
            .processor
            .step(&mut self.cpu, &mut self.bus, &mut self.interrupts);
        self.interrupts.retire_instruction();
        self.total_opcodes += 1;
        step
    }

    fn poll_input(&mut self) {
        if let Some((key, pressed)) = self.hooks.poll_input() {
            if pressed {
                self.key_pressed(key);
            } else {
                self.key_released(key);
            }
        }
    }

    pub fn key_pressed(&mut self, key: JoypadKey) {
        self.bus.press_key(key);
    }

    pub fn key_released(&mut self, key: JoypadKey) {
        self.bus.release_key(key);
    }

    /// Update joypad state from a frontend key event. Unmapped keys are
    /// ignored.
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        let Some(key) = JoypadKey::from_host_key(key) else {
            return;
        };
        if pressed {
            self.key_pressed(key);
        } else {
            self.key_released(key);
        }
    }

    pub fn set_pause(&mut self, pause: bool) {
        self.paused = pause;
    }

    /// Arm the pause predicate. Clears any active pause.
    pub fn set_pause_pending(&mut self, pending: bool) {
        self.paused = false;
        self.pause_pending = pending;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn total_opcodes(&self) -> u64 {
        self.total_opcodes
    }

    /// Cycles consumed by the most recent [`GameBoy::update`].
    pub fn cycles_this_update(&self) -> u32 {
        self.cycles_this_update
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.ppu.framebuffer()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }
}
