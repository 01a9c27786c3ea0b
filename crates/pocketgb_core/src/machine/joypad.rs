use pocketgb_common::Key;

use super::{io, Interrupt, MemoryBus};

/// Every key released (bit = 1 means released).
pub(super) const ALL_RELEASED: u8 = 0xFF;

/// JOYP bit 4 low selects the direction keys.
const SELECT_DIRECTIONS: u8 = 0x10;
/// JOYP bit 5 low selects the action buttons.
const SELECT_BUTTONS: u8 = 0x20;

/// Game Boy buttons, numbered by their bit in the internal joypad byte.
/// Bits 0-3 are the d-pad, bits 4-7 the action buttons.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum JoypadKey {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl JoypadKey {
    #[inline]
    fn mask(self) -> u8 {
        1 << self as u8
    }

    fn is_button(self) -> bool {
        (self as u8) >= 4
    }

    /// Default host keyboard mapping.
    pub fn from_host_key(key: Key) -> Option<Self> {
        match key {
            Key::Right => Some(JoypadKey::Right),
            Key::Left => Some(JoypadKey::Left),
            Key::Up => Some(JoypadKey::Up),
            Key::Down => Some(JoypadKey::Down),
            Key::Z => Some(JoypadKey::A),
            Key::X => Some(JoypadKey::B),
            Key::A => Some(JoypadKey::Select),
            Key::S => Some(JoypadKey::Start),
            _ => None,
        }
    }
}

impl MemoryBus {
    /// JOYP as seen by the processor: the select bits written by the game
    /// (inverted) in the upper nibble, and the active-low keys of every
    /// selected group in the lower nibble.
    pub fn joypad_state(&self) -> u8 {
        let select = self.memory[io::JOYP as usize];
        let mut low = 0x0F;
        if select & SELECT_DIRECTIONS == 0 {
            low &= self.joypad & 0x0F;
        }
        if select & SELECT_BUTTONS == 0 {
            low &= self.joypad >> 4;
        }
        (!select & 0xF0) | low
    }

    pub fn press_key(&mut self, key: JoypadKey) {
        let was_released = self.joypad & key.mask() != 0;
        self.joypad &= !key.mask();

        let select = self.memory[io::JOYP as usize];
        let selected = if key.is_button() {
            select & SELECT_BUTTONS == 0
        } else {
            select & SELECT_DIRECTIONS == 0
        };

        if was_released && selected {
            log::debug!("Joypad interrupt: {:?} pressed", key);
            self.request_interrupt(Interrupt::Joypad);
        }
    }

    pub fn release_key(&mut self, key: JoypadKey) {
        self.joypad |= key.mask();
    }

    pub fn is_key_pressed(&self, key: JoypadKey) -> bool {
        self.joypad & key.mask() == 0
    }
}
