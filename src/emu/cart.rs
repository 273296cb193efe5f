use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::error::CartError;
use super::header::{self, Header};
use super::validate::{self, ValidationOptions};

/// A fully loaded and validated cartridge. Construction is all-or-nothing:
/// either every pipeline stage passes and the caller gets an owned value, or
/// the first failing stage's error comes back and every buffer allocated so
/// far is dropped.
#[derive(Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    header: Header,
}

impl Cartridge {
    /// Reads a ROM image from disk and runs the full load pipeline.
    pub fn from_file(path: impl AsRef<Path>, opts: ValidationOptions) -> Result<Self, CartError> {
        let rom = read_rom(path.as_ref())?;
        Self::from_rom(rom, opts)
    }

    /// Load pipeline over an in-memory image: parse the header, validate,
    /// resolve the RAM size, allocate external RAM.
    pub fn from_rom(rom: Vec<u8>, opts: ValidationOptions) -> Result<Self, CartError> {
        let header = Header::parse(&rom)?;
        validate::validate(&rom, &header, opts)?;

        let ram_size = header::ram_size_bytes(header.ram_size_code)?;
        let ram = alloc_zeroed(ram_size)?;

        debug!(
            "cartridge loaded: title={:?} rom={} bytes ram={} bytes type={:#04X}",
            header.title,
            rom.len(),
            ram.len(),
            header.cartridge_type,
        );

        Ok(Self { rom, ram, header })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn rom_size(&self) -> usize {
        self.rom.len()
    }

    pub fn ram_size(&self) -> usize {
        self.ram.len()
    }

    /// Byte at `addr` in ROM. Only defined for `addr < rom_size`; the bus
    /// guarantees that by routing only cartridge-space addresses here, and
    /// every valid ROM is at least 32 KiB.
    pub fn read(&self, addr: u16) -> u8 {
        self.rom[addr as usize]
    }

    /// Byte at `offset` into external RAM, or `None` past the end (including
    /// every offset on a cartridge without RAM).
    pub fn read_ram(&self, offset: u16) -> Option<u8> {
        self.ram.get(offset as usize).copied()
    }

    /// Writes into external RAM. Returns false when the offset is out of
    /// range so the bus can apply its open-bus policy.
    pub fn write_ram(&mut self, offset: u16, value: u8) -> bool {
        match self.ram.get_mut(offset as usize) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

// Whole-file read; the buffer reservation is fallible so an oversized image
// surfaces as Alloc instead of aborting.
fn read_rom(path: &Path) -> Result<Vec<u8>, CartError> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len() as usize;

    let mut rom = Vec::new();
    rom.try_reserve_exact(len)
        .map_err(|_| CartError::Alloc { size: len })?;
    file.read_to_end(&mut rom)?;
    Ok(rom)
}

// Zero-length requests still yield an (empty) buffer; "no RAM" is a
// zero-sized buffer, never an absent one.
fn alloc_zeroed(size: usize) -> Result<Vec<u8>, CartError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| CartError::Alloc { size })?;
    buf.resize(size, 0);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::testutil::build_rom;

    #[test]
    fn minimal_rom_loads_with_no_ram() {
        let rom = build_rom(0, 0);
        assert_eq!(rom.len(), 32 * 1024);

        let cart = Cartridge::from_rom(rom, ValidationOptions::default()).unwrap();
        assert_eq!(cart.rom_size(), 32 * 1024);
        assert_eq!(cart.ram_size(), 0);
        assert_eq!(cart.title(), "TEST");
    }

    #[test]
    fn read_returns_the_original_bytes() {
        let mut rom = build_rom(0, 0);
        for (i, byte) in rom.iter_mut().enumerate().skip(0x0150) {
            *byte = (i % 251) as u8;
        }
        let expected = rom.clone();

        let cart = Cartridge::from_rom(rom, ValidationOptions::default()).unwrap();
        for addr in 0..cart.rom_size() as u16 {
            assert_eq!(cart.read(addr), expected[addr as usize]);
        }
    }

    #[test]
    fn one_byte_short_fails_with_size_mismatch() {
        let mut rom = build_rom(0, 0);
        rom.truncate(32 * 1024 - 1);
        assert!(matches!(
            Cartridge::from_rom(rom, ValidationOptions::default()),
            Err(CartError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn flipped_logo_byte_fails() {
        let mut rom = build_rom(0, 0);
        rom[0x0110] ^= 0x40;
        assert!(matches!(
            Cartridge::from_rom(rom, ValidationOptions::default()),
            Err(CartError::InvalidLogo)
        ));
    }

    #[test]
    fn wrong_header_checksum_byte_fails() {
        let mut rom = build_rom(0, 0);
        rom[0x014D] = rom[0x014D].wrapping_add(1);
        assert!(matches!(
            Cartridge::from_rom(rom, ValidationOptions::default()),
            Err(CartError::HeaderChecksumMismatch { .. })
        ));
    }

    #[test]
    fn undefined_ram_code_fails() {
        let rom = build_rom(0, 1);
        assert!(matches!(
            Cartridge::from_rom(rom, ValidationOptions::default()),
            Err(CartError::UnknownSizeCode { code: 1 })
        ));
    }

    #[test]
    fn buffer_without_a_header_fails() {
        let rom = vec![0u8; 100];
        assert!(matches!(
            Cartridge::from_rom(rom, ValidationOptions::default()),
            Err(CartError::TruncatedHeader { len: 100 })
        ));
    }

    #[test]
    fn ram_sizes_follow_the_header_code() {
        let table = [
            (0u8, 0usize),
            (2, 8 * 1024),
            (3, 32 * 1024),
            (4, 128 * 1024),
            (5, 64 * 1024),
        ];
        for (code, size) in table {
            let cart =
                Cartridge::from_rom(build_rom(0, code), ValidationOptions::default()).unwrap();
            assert_eq!(cart.ram_size(), size);
        }
    }

    #[test]
    fn ram_is_zero_initialized_and_writable() {
        let mut cart = Cartridge::from_rom(build_rom(0, 2), ValidationOptions::default()).unwrap();
        assert_eq!(cart.read_ram(0), Some(0));
        assert_eq!(cart.read_ram(8 * 1024 - 1), Some(0));
        assert_eq!(cart.read_ram(8 * 1024), None);

        assert!(cart.write_ram(42, 0x5A));
        assert_eq!(cart.read_ram(42), Some(0x5A));
        assert!(!cart.write_ram(8 * 1024, 0x5A));
    }

    #[test]
    fn every_standard_rom_size_code_round_trips() {
        for code in 0..=8u8 {
            let rom = build_rom(code, 0);
            let cart = Cartridge::from_rom(rom, ValidationOptions::default()).unwrap();
            assert_eq!(cart.rom_size(), 32 * 1024 << code);
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Cartridge::from_file(
            "/nonexistent/definitely-not-a-rom.gb",
            ValidationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CartError::Io(_)));
    }
}
