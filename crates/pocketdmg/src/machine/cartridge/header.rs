use crate::{Error, Result};

/// Header offsets (Pandocs "The Cartridge Header").
const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
const HEADER_CHECKSUM: usize = 0x014D;
const GLOBAL_CHECKSUM: usize = 0x014E;

/// Mapper family selected by the cartridge-type byte at 0x0147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapperKind {
    /// Fixed 32 KiB ROM, optionally with 8 KiB RAM (types 0x00, 0x08, 0x09).
    RomOnly,
    Mbc1,
    Mbc3,
    Mbc5,
    /// Any other type byte. Runs with fixed-bank ROM-only behaviour.
    Unsupported(u8),
}

impl MapperKind {
    pub fn from_cartridge_type(value: u8) -> Self {
        match value {
            0x00 | 0x08 | 0x09 => MapperKind::RomOnly,
            0x01..=0x03 => MapperKind::Mbc1,
            0x0F..=0x13 => MapperKind::Mbc3,
            0x19..=0x1E => MapperKind::Mbc5,
            other => MapperKind::Unsupported(other),
        }
    }
}

/// Metadata decoded from 0x0100..0x0150 of a cartridge image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub mapper: MapperKind,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl CartridgeHeader {
    /// Smallest image that still contains a complete header.
    pub const MIN_LEN: usize = 0x150;

    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < Self::MIN_LEN {
            return Err(Error::InvalidCartridge { len: rom.len() });
        }

        let raw_title = &rom[TITLE];
        let end = raw_title.iter().position(|&b| b == 0).unwrap_or(raw_title.len());
        let title = String::from_utf8_lossy(&raw_title[..end]).trim_end().to_string();

        let cartridge_type = rom[CARTRIDGE_TYPE];
        Ok(Self {
            title,
            cartridge_type,
            mapper: MapperKind::from_cartridge_type(cartridge_type),
            rom_size_code: rom[ROM_SIZE],
            ram_size_code: rom[RAM_SIZE],
            header_checksum: rom[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([rom[GLOBAL_CHECKSUM], rom[GLOBAL_CHECKSUM + 1]]),
        })
    }

    /// Checksum the boot ROM verifies over 0x0134..=0x014C.
    pub fn compute_header_checksum(rom: &[u8]) -> u8 {
        rom.get(0x0134..=0x014C)
            .unwrap_or(&[])
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
    }

    /// External RAM size in bytes. 2 KiB parts are rounded up to one 8 KiB
    /// bank so that banked addressing stays uniform.
    pub fn ram_bytes(&self) -> usize {
        let banks = match self.ram_size_code {
            0x01 | 0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        };
        banks * 0x2000
    }
}
