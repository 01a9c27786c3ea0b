//! Address-range dispatch for writes with side effects.
//!
//! Anything not listed here is plain RAM (or a register without write side
//! effects) and is stored unchanged.
use std::ops::RangeInclusive;

use super::MemoryBus;
use crate::machine::{io, timer};

pub(super) type WriteHandler = fn(&mut MemoryBus, u16, u8);

const WRITE_HANDLERS: [(RangeInclusive<u16>, WriteHandler); 10] = [
    (0x0000..=0x1FFF, write_ram_enable),
    (0x2000..=0x3FFF, write_rom_bank),
    (0x4000..=0x5FFF, write_bank_high),
    (0x6000..=0x7FFF, write_banking_mode),
    (0xA000..=0xBFFF, write_external_ram),
    (0xE000..=0xFDFF, write_echo_ram),
    (0xFEA0..=0xFEFF, write_unusable),
    (io::DIV..=io::DIV, write_divider),
    (io::TAC..=io::TAC, write_timer_control),
    (io::DMA..=io::DMA, write_oam_dma),
];

pub(super) fn handler_for(addr: u16) -> Option<WriteHandler> {
    WRITE_HANDLERS
        .iter()
        .find(|(range, _)| range.contains(&addr))
        .map(|&(_, handler)| handler)
}

fn write_ram_enable(bus: &mut MemoryBus, addr: u16, value: u8) {
    bus.banking = bus.banking.with_ram_enable(addr, value);
}

fn write_rom_bank(bus: &mut MemoryBus, _addr: u16, value: u8) {
    let before = bus.banking.rom_bank();
    bus.banking = bus.banking.with_rom_bank_low(value);
    if bus.banking.rom_bank() != before {
        log::debug!("Changing ROM bank to {}", bus.banking.rom_bank());
    }
}

fn write_bank_high(bus: &mut MemoryBus, _addr: u16, value: u8) {
    let before = bus.banking;
    bus.banking = bus.banking.with_bank_high(value);
    if bus.banking.rom_bank() != before.rom_bank() {
        log::debug!("Changing ROM bank to {}", bus.banking.rom_bank());
    }
    if bus.banking.ram_bank() != before.ram_bank() {
        log::debug!("Changing RAM bank to {}", bus.banking.ram_bank());
    }
}

fn write_banking_mode(bus: &mut MemoryBus, _addr: u16, value: u8) {
    bus.banking = bus.banking.with_banking_mode(value);
}

fn write_external_ram(bus: &mut MemoryBus, addr: u16, value: u8) {
    if bus.banking.ram_writable(addr) {
        let bank = bus.banking.ram_bank();
        bus.ram_banks.bank_mut(bank)[(addr - 0xA000) as usize] = value;
    }
}

/// Echo RAM writes land both here and in the working RAM they mirror.
fn write_echo_ram(bus: &mut MemoryBus, addr: u16, value: u8) {
    bus.memory[addr as usize] = value;
    bus.memory[(addr - 0x2000) as usize] = value;
}

fn write_unusable(_bus: &mut MemoryBus, _addr: u16, _value: u8) {}

/// Any write to DIV clears it along with the divider accumulator.
fn write_divider(bus: &mut MemoryBus, _addr: u16, _value: u8) {
    bus.memory[io::DIV as usize] = 0;
    bus.timer.reset_divider();
}

fn write_timer_control(bus: &mut MemoryBus, _addr: u16, value: u8) {
    bus.memory[io::TAC as usize] = value;
    bus.timer.select_clock(timer::clock_speed_for(value));
}

fn write_oam_dma(bus: &mut MemoryBus, _addr: u16, value: u8) {
    bus.do_oam_dma(value);
}
