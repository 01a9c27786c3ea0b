use super::{
    cartridge::Cartridge, io, joypad::ALL_RELEASED, timer::TimerState, MEMORY_SIZE,
};

mod banking;
mod dispatch;
mod dma;
mod init;
mod ram_banks;

pub use banking::{BankingMode, BankingState};
pub use ram_banks::{RamBanks, RAM_BANK_SIZE};

/// Size of the fixed bank 0 plus the first switchable bank, copied into the
/// address space at reset.
const ROM_WINDOW_SIZE: usize = 0x8000;
const ROM_BANK_SIZE: usize = 0x4000;

/// The 64 KiB address space and everything mapped into it.
///
/// Every processor access goes through [`MemoryBus::read`] and
/// [`MemoryBus::write`]. Peripherals inside the machine (timer, PPU,
/// interrupt controller) update the registers they own directly.
pub struct MemoryBus {
    pub(super) memory: [u8; MEMORY_SIZE],
    pub(super) cartridge: Cartridge,
    pub(super) banking: BankingState,
    pub(super) ram_banks: RamBanks,
    pub(super) timer: TimerState,
    /// Joypad state: bit=0 means pressed. Low nibble is the d-pad
    /// (Right, Left, Up, Down), high nibble the buttons (A, B, Select, Start).
    pub(super) joypad: u8,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new(Cartridge::empty())
    }
}

impl std::fmt::Debug for MemoryBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBus")
            .field("cartridge", &self.cartridge)
            .field("banking", &self.banking)
            .field("ram_banks", &self.ram_banks.count())
            .field("timer", &self.timer)
            .field("joypad", &self.joypad)
            .finish()
    }
}

impl MemoryBus {
    pub fn new(cartridge: Cartridge) -> Self {
        let mut bus = Self {
            memory: [0; MEMORY_SIZE],
            banking: BankingState::new(cartridge.controller()),
            cartridge,
            ram_banks: RamBanks::default(),
            timer: TimerState::new(),
            joypad: ALL_RELEASED,
        };
        bus.reset();
        bus
    }

    /// Swap the inserted cartridge and reset the bus around it.
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = cartridge;
        self.reset();
    }

    /// Return the bus to its power-on state for the current cartridge.
    ///
    /// Memory is cleared before the cartridge's first 32 KiB are mirrored
    /// into the ROM window, so nothing from a previous game survives.
    pub fn reset(&mut self) {
        self.memory = [0; MEMORY_SIZE];
        self.memory[..ROM_WINDOW_SIZE].copy_from_slice(&self.cartridge.image()[..ROM_WINDOW_SIZE]);

        self.banking = BankingState::new(self.cartridge.controller());
        self.timer = TimerState::new();
        self.joypad = ALL_RELEASED;
        self.apply_power_on_io_state();

        self.ram_banks = RamBanks::new(
            self.cartridge.ram_bank_count(),
            &self.memory[0xA000..0xC000],
        );

        log::info!(
            "Bus reset: title='{}' controller={:?} ram_banks={}",
            self.cartridge.title(),
            self.cartridge.controller(),
            self.ram_banks.count()
        );
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            // Switchable ROM window.
            0x4000..=0x7FFF => {
                let bank = self.banking.rom_bank() as usize;
                let offset = addr as usize + (bank - 1) * ROM_BANK_SIZE;
                self.cartridge.byte(offset)
            }
            // External RAM. Reads are not gated by the RAM enable flag.
            0xA000..=0xBFFF => {
                self.ram_banks.bank(self.banking.ram_bank())[(addr - 0xA000) as usize]
            }
            io::JOYP => self.joypad_state(),
            _ => self.memory[addr as usize],
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match dispatch::handler_for(addr) {
            Some(handler) => handler(self, addr, value),
            None => self.memory[addr as usize] = value,
        }
    }

    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn banking(&self) -> BankingState {
        self.banking
    }

    pub fn ram_banks(&self) -> &RamBanks {
        &self.ram_banks
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }
}
