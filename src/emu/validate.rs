use super::error::CartError;
use super::header::{
    self, Header, CHECKSUM_RANGE, GLOBAL_CHECKSUM_OFFSET, LOGO_OFFSET, LOGO_SIZE,
};

/// The boot-logo bitmap the DMG boot ROM compares against the header.
/// Hardware refuses to boot on any mismatch, so the comparison is byte-exact.
pub const NINTENDO_LOGO: [u8; LOGO_SIZE] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00, 0x0D,
    0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD, 0xD9, 0x99,
    0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB, 0xB9, 0x33, 0x3E,
];

/// Knobs for the validation pipeline. The global checksum is off by default
/// because most real-world dumps fail it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    pub check_global_checksum: bool,
}

/// Runs the validation stages in order: logo, header checksum, optional
/// global checksum, then size consistency last. The first failure wins.
pub fn validate(rom: &[u8], header: &Header, opts: ValidationOptions) -> Result<(), CartError> {
    check_logo(rom)?;

    let computed = header_checksum(rom);
    if computed != header.header_checksum {
        return Err(CartError::HeaderChecksumMismatch {
            computed,
            header: header.header_checksum,
        });
    }

    if opts.check_global_checksum {
        let computed = global_checksum(rom);
        if computed != header.global_checksum {
            return Err(CartError::GlobalChecksumMismatch {
                computed,
                header: header.global_checksum,
            });
        }
    }

    let declared = header::rom_size_bytes(header.rom_size_code)?;
    if declared != rom.len() {
        return Err(CartError::SizeMismatch {
            file: rom.len(),
            header: declared,
        });
    }

    Ok(())
}

fn check_logo(rom: &[u8]) -> Result<(), CartError> {
    if rom[LOGO_OFFSET..LOGO_OFFSET + LOGO_SIZE] != NINTENDO_LOGO {
        return Err(CartError::InvalidLogo);
    }
    Ok(())
}

/// 8-bit header checksum: `acc = acc - byte - 1` over 0x0134..=0x014C with
/// wraparound.
pub fn header_checksum(rom: &[u8]) -> u8 {
    let mut acc: u8 = 0;
    for addr in CHECKSUM_RANGE {
        acc = acc.wrapping_sub(rom[addr]).wrapping_sub(1);
    }
    acc
}

/// 16-bit global checksum: wrapping sum of every byte in the file minus the
/// two stored checksum bytes themselves.
pub fn global_checksum(rom: &[u8]) -> u16 {
    let mut acc: u16 = 0;
    for &byte in rom {
        acc = acc.wrapping_add(byte as u16);
    }
    acc.wrapping_sub(rom[GLOBAL_CHECKSUM_OFFSET] as u16)
        .wrapping_sub(rom[GLOBAL_CHECKSUM_OFFSET + 1] as u16)
}
