// emulator module root
mod bus;
mod cart;
mod error;
mod header;
mod validate;

pub use bus::Bus;
pub use cart::Cartridge;
pub use error::CartError;
pub use header::Header;
pub use validate::ValidationOptions;

#[cfg(test)]
pub(crate) mod testutil {
    use super::header::{CHECKSUM_RANGE, GLOBAL_CHECKSUM_OFFSET, LOGO_OFFSET, LOGO_SIZE};
    use super::validate::NINTENDO_LOGO;

    /// Synthetic ROM image of exactly the length the size code declares,
    /// with the boot logo, a short title, and a correct header checksum.
    /// The global checksum bytes are left at zero.
    pub fn build_rom(rom_code: u8, ram_code: u8) -> Vec<u8> {
        let len = 32 * 1024usize << rom_code;
        let mut rom = vec![0u8; len];
        rom[LOGO_OFFSET..LOGO_OFFSET + LOGO_SIZE].copy_from_slice(&NINTENDO_LOGO);
        rom[0x0134..0x0138].copy_from_slice(b"TEST");
        rom[0x0148] = rom_code;
        rom[0x0149] = ram_code;
        stamp_header_checksum(&mut rom);
        rom
    }

    pub fn stamp_header_checksum(rom: &mut [u8]) {
        let mut acc: u8 = 0;
        for addr in CHECKSUM_RANGE {
            acc = acc.wrapping_sub(rom[addr]).wrapping_sub(1);
        }
        rom[0x014D] = acc;
    }

    /// Stores a matching big-endian global checksum at 0x014E/0x014F.
    pub fn stamp_global_checksum(rom: &mut [u8]) {
        rom[GLOBAL_CHECKSUM_OFFSET] = 0;
        rom[GLOBAL_CHECKSUM_OFFSET + 1] = 0;
        let mut acc: u16 = 0;
        for &byte in rom.iter() {
            acc = acc.wrapping_add(byte as u16);
        }
        let bytes = acc.to_be_bytes();
        rom[GLOBAL_CHECKSUM_OFFSET] = bytes[0];
        rom[GLOBAL_CHECKSUM_OFFSET + 1] = bytes[1];
    }
}
