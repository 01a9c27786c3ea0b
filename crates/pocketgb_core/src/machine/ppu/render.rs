use pocketgb_common::Color;

use super::{LcdControl, Ppu};
use crate::machine::{io, MemoryBus};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const OAM_BASE: usize = 0xFE00;
const SPRITE_COUNT: usize = 40;
const BYTES_PER_TILE: u16 = 16;

const ATTR_PRIORITY: u8 = 0x80;
const ATTR_FLIP_Y: u8 = 0x40;
const ATTR_FLIP_X: u8 = 0x20;
const ATTR_PALETTE: u8 = 0x10;

/// 2-bit colour index at column `bit` (7 = leftmost) of a tile row.
#[inline]
fn colour_index(lo: u8, hi: u8, bit: u8) -> u8 {
    (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
}

impl Ppu {
    /// Draw the current LY into the framebuffer.
    pub fn render_scanline(&mut self, bus: &MemoryBus) {
        if bus.memory[io::LY as usize] as usize >= SCREEN_HEIGHT {
            return;
        }
        let lcdc = LcdControl::from_bits_retain(bus.memory[io::LCDC as usize]);

        if lcdc.contains(LcdControl::BG_ENABLE) {
            self.render_tiles(bus, lcdc);
        }
        if lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(bus, lcdc);
        }
    }

    fn shade(&self, palette_register: u8, colour_index: u8) -> Color {
        let value = (palette_register >> (colour_index * 2)) & 0x03;
        self.palette[value as usize]
    }

    fn render_tiles(&mut self, bus: &MemoryBus, lcdc: LcdControl) {
        let mem = &bus.memory;
        let ly = mem[io::LY as usize];
        let scy = mem[io::SCY as usize];
        let scx = mem[io::SCX as usize];
        let wy = mem[io::WY as usize];
        let window_x = mem[io::WX as usize] as i32 - 7;
        let bgp = mem[io::BGP as usize];

        let window_line = lcdc.contains(LcdControl::WINDOW_ENABLE) && ly >= wy;
        let bg_map: u16 = if lcdc.contains(LcdControl::BG_TILE_MAP) { 0x9C00 } else { 0x9800 };
        let window_map: u16 = if lcdc.contains(LcdControl::WINDOW_TILE_MAP) { 0x9C00 } else { 0x9800 };
        let unsigned = lcdc.contains(LcdControl::TILE_DATA_UNSIGNED);

        for x in 0..SCREEN_WIDTH {
            let in_window = window_line && x as i32 >= window_x;

            let (map, map_x, map_y) = if in_window {
                (window_map, (x as i32 - window_x) as u8, ly - wy)
            } else {
                (bg_map, (x as u8).wrapping_add(scx), ly.wrapping_add(scy))
            };

            let tile_row = (map_y / 8) as u16;
            let tile_col = (map_x / 8) as u16;
            let tile_number = mem[(map + tile_row * 32 + tile_col) as usize];

            let tile_addr = if unsigned {
                0x8000u16 + tile_number as u16 * BYTES_PER_TILE
            } else {
                (0x9000i32 + (tile_number as i8) as i32 * BYTES_PER_TILE as i32) as u16
            };

            let row_addr = (tile_addr + (map_y % 8) as u16 * 2) as usize;
            let lo = mem[row_addr];
            let hi = mem[row_addr + 1];
            let index = colour_index(lo, hi, 7 - map_x % 8);

            let color = self.shade(bgp, index);
            self.framebuffer.set_pixel(x, ly as usize, color);
        }
    }

    fn render_sprites(&mut self, bus: &MemoryBus, lcdc: LcdControl) {
        let mem = &bus.memory;
        let ly = mem[io::LY as usize] as i32;
        let height: i32 = if lcdc.contains(LcdControl::OBJ_TALL) { 16 } else { 8 };
        let background = self.palette[0];

        for sprite in 0..SPRITE_COUNT {
            let entry = OAM_BASE + sprite * 4;
            let y = mem[entry] as i32 - 16;
            let x = mem[entry + 1] as i32 - 8;
            let mut tile = mem[entry + 2];
            let attrs = mem[entry + 3];

            if ly < y || ly >= y + height {
                continue;
            }
            if height == 16 {
                tile &= 0xFE;
            }

            let mut line = ly - y;
            if attrs & ATTR_FLIP_Y != 0 {
                line = height - 1 - line;
            }

            let row_addr = 0x8000usize + tile as usize * BYTES_PER_TILE as usize + line as usize * 2;
            let lo = mem[row_addr];
            let hi = mem[row_addr + 1];
            let palette = if attrs & ATTR_PALETTE != 0 {
                mem[io::OBP1 as usize]
            } else {
                mem[io::OBP0 as usize]
            };

            for col in 0..8i32 {
                let px = x + col;
                if !(0..SCREEN_WIDTH as i32).contains(&px) {
                    continue;
                }

                let bit = if attrs & ATTR_FLIP_X != 0 { col } else { 7 - col } as u8;
                let index = colour_index(lo, hi, bit);
                if index == 0 {
                    continue;
                }

                let px = px as usize;
                if attrs & ATTR_PRIORITY != 0
                    && self.framebuffer.pixel(px, ly as usize) != background
                {
                    continue;
                }

                let color = self.shade(palette, index);
                self.framebuffer.set_pixel(px, ly as usize, color);
            }
        }
    }
}
