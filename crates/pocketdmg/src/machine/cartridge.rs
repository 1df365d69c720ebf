mod header;
mod mbc1;
mod mbc3;
mod mbc5;

pub use header::{CartridgeHeader, MapperKind};

use crate::Result;
use mbc1::Mbc1;
use mbc3::Mbc3;
use mbc5::Mbc5;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// Raw ROM and external RAM, addressed by bank.
///
/// Bank numbers wrap modulo the number of banks present, so a mapper may
/// select any value its registers allow.
struct Storage {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl Storage {
    fn rom_banks(&self) -> usize {
        (self.rom.len() / ROM_BANK_SIZE).max(1)
    }

    fn ram_banks(&self) -> usize {
        self.ram.len() / RAM_BANK_SIZE
    }

    fn read_rom(&self, bank: usize, addr: u16) -> u8 {
        let bank = bank % self.rom_banks();
        let index = bank * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1));
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    fn ram_index(&self, bank: usize, addr: u16) -> Option<usize> {
        let banks = self.ram_banks();
        if banks == 0 {
            return None;
        }
        Some((bank % banks) * RAM_BANK_SIZE + (addr as usize & (RAM_BANK_SIZE - 1)))
    }

    fn read_ram(&self, bank: usize, addr: u16) -> u8 {
        self.ram_index(bank, addr)
            .and_then(|i| self.ram.get(i).copied())
            .unwrap_or(0xFF)
    }

    fn write_ram(&mut self, bank: usize, addr: u16, value: u8) {
        if let Some(slot) = self.ram_index(bank, addr).and_then(|i| self.ram.get_mut(i)) {
            *slot = value;
        }
    }
}

enum Mapper {
    /// Bank 0 at 0x0000, bank 1 at 0x4000, RAM (if any) always enabled.
    Fixed,
    Mbc1(Mbc1),
    Mbc3(Mbc3),
    Mbc5(Mbc5),
}

/// A loaded cartridge: immutable ROM, optional RAM, and mapper registers.
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    storage: Storage,
    mapper: Mapper,
}

impl Cartridge {
    pub(crate) fn load(rom: &[u8]) -> Result<Self> {
        let header = CartridgeHeader::parse(rom)?;

        let expected = CartridgeHeader::compute_header_checksum(rom);
        if expected != header.header_checksum {
            log::warn!(
                "Header checksum mismatch: stored {:#04X}, computed {:#04X}",
                header.header_checksum,
                expected
            );
        }

        let mapper = match header.mapper {
            MapperKind::RomOnly => Mapper::Fixed,
            MapperKind::Mbc1 => Mapper::Mbc1(Mbc1::new()),
            MapperKind::Mbc3 => Mapper::Mbc3(Mbc3::new()),
            MapperKind::Mbc5 => Mapper::Mbc5(Mbc5::new(header.cartridge_type)),
            MapperKind::Unsupported(kind) => {
                log::warn!(
                    "Unsupported cartridge type {:#04X}; running with fixed ROM banks",
                    kind
                );
                Mapper::Fixed
            }
        };

        log::info!(
            "Loaded cartridge '{}': type {:#04X} ({:?}), {} KiB ROM, {} KiB RAM",
            header.title,
            header.cartridge_type,
            header.mapper,
            rom.len() / 1024,
            header.ram_bytes() / 1024
        );

        let storage = Storage {
            rom: rom.to_vec(),
            ram: vec![0xFF; header.ram_bytes()],
        };
        Ok(Self {
            header,
            storage,
            mapper,
        })
    }

    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub(crate) fn read_rom(&self, addr: u16) -> u8 {
        let bank = match &self.mapper {
            Mapper::Fixed => (addr as usize) / ROM_BANK_SIZE,
            Mapper::Mbc1(m) => m.rom_bank(addr),
            Mapper::Mbc3(m) => m.rom_bank(addr),
            Mapper::Mbc5(m) => m.rom_bank(addr),
        };
        self.storage.read_rom(bank, addr)
    }

    /// Writes to ROM space only reach mapper registers.
    pub(crate) fn write_rom(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::Fixed => {}
            Mapper::Mbc1(m) => m.write(addr, value),
            Mapper::Mbc3(m) => m.write(addr, value),
            Mapper::Mbc5(m) => m.write(addr, value),
        }
    }

    /// Selected RAM bank, or `None` while RAM is disabled or unmapped.
    fn ram_bank(&self) -> Option<usize> {
        match &self.mapper {
            Mapper::Fixed => Some(0),
            Mapper::Mbc1(m) => m.ram_enable.then(|| m.ram_bank()),
            Mapper::Mbc3(m) => m.ram_enable.then(|| m.ram_bank()).flatten(),
            Mapper::Mbc5(m) => m.ram_enable.then(|| m.ram_bank()),
        }
    }

    pub(crate) fn read_ram(&self, addr: u16) -> u8 {
        match self.ram_bank() {
            Some(bank) => self.storage.read_ram(bank, addr),
            None => 0xFF,
        }
    }

    pub(crate) fn write_ram(&mut self, addr: u16, value: u8) {
        if let Some(bank) = self.ram_bank() {
            self.storage.write_ram(bank, addr, value);
        }
    }

    pub(crate) fn ram(&self) -> &[u8] {
        &self.storage.ram
    }

    /// Seed external RAM, e.g. from a battery save. Extra bytes are dropped
    /// and a short image leaves the tail untouched.
    pub(crate) fn load_ram(&mut self, data: &[u8]) {
        let len = data.len().min(self.storage.ram.len());
        self.storage.ram[..len].copy_from_slice(&data[..len]);
    }
}
