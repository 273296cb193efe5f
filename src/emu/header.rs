use super::error::CartError;

/// A file shorter than this cannot hold the full header block, which spans
/// 0x0100..=0x014F.
pub const HEADER_SIZE: usize = 0x150;

// fixed header field offsets
mod offset {
    pub const LOGO: usize = 0x0104;
    pub const TITLE: usize = 0x0134;
    pub const NEW_LICENSEE_CODE: usize = 0x0144;
    pub const SGB_FLAG: usize = 0x0146;
    pub const CARTRIDGE_TYPE: usize = 0x0147;
    pub const ROM_SIZE: usize = 0x0148;
    pub const RAM_SIZE: usize = 0x0149;
    pub const DESTINATION_CODE: usize = 0x014A;
    pub const OLD_LICENSEE_CODE: usize = 0x014B;
    pub const ROM_VERSION: usize = 0x014C;
    pub const HEADER_CHECKSUM: usize = 0x014D;
    pub const GLOBAL_CHECKSUM: usize = 0x014E;
}

pub const LOGO_OFFSET: usize = offset::LOGO;
pub const LOGO_SIZE: usize = 48;

pub const TITLE_SIZE: usize = 16;

/// Byte range covered by the header checksum, inclusive on both ends.
pub const CHECKSUM_RANGE: std::ops::RangeInclusive<usize> = offset::TITLE..=offset::ROM_VERSION;
pub const GLOBAL_CHECKSUM_OFFSET: usize = offset::GLOBAL_CHECKSUM;

/// The metadata block every cartridge carries at 0x0100-0x014F. Extraction
/// only copies bytes out of the buffer; all checking happens later in the
/// validation stage.
#[derive(Debug, Clone)]
pub struct Header {
    pub title: String,
    pub new_licensee_code: [u8; 2],
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub destination_code: u8,
    pub old_licensee_code: u8,
    pub rom_version: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl Header {
    /// Extracts the header fields at their fixed offsets. The only
    /// precondition is that the buffer is long enough to hold a header.
    pub fn parse(rom: &[u8]) -> Result<Self, CartError> {
        if rom.len() < HEADER_SIZE {
            return Err(CartError::TruncatedHeader { len: rom.len() });
        }

        Ok(Self {
            title: title_string(&rom[offset::TITLE..offset::TITLE + TITLE_SIZE]),
            new_licensee_code: [
                rom[offset::NEW_LICENSEE_CODE],
                rom[offset::NEW_LICENSEE_CODE + 1],
            ],
            sgb_flag: rom[offset::SGB_FLAG],
            cartridge_type: rom[offset::CARTRIDGE_TYPE],
            rom_size_code: rom[offset::ROM_SIZE],
            ram_size_code: rom[offset::RAM_SIZE],
            destination_code: rom[offset::DESTINATION_CODE],
            old_licensee_code: rom[offset::OLD_LICENSEE_CODE],
            rom_version: rom[offset::ROM_VERSION],
            header_checksum: rom[offset::HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([
                rom[offset::GLOBAL_CHECKSUM],
                rom[offset::GLOBAL_CHECKSUM + 1],
            ]),
        })
    }
}

// 16 bytes, NUL-padded; anything after the first NUL is dropped
fn title_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// ROM byte length declared by a size code: 32 KiB doubling per step.
///
/// The legacy codes 0x52/0x53/0x54 (1.1/1.2/1.5 MiB) are deliberately
/// rejected; they never appear in licensed dumps and no canonical size
/// table defines them.
pub fn rom_size_bytes(code: u8) -> Result<usize, CartError> {
    match code {
        0..=8 => Ok(32 * 1024 << code),
        _ => Err(CartError::UnknownSizeCode { code }),
    }
}

/// External RAM byte length declared by a size code. Code 1 has never been
/// assigned and fails like any other unknown code.
pub fn ram_size_bytes(code: u8) -> Result<usize, CartError> {
    match code {
        0 => Ok(0),
        2 => Ok(8 * 1024),
        3 => Ok(32 * 1024),
        4 => Ok(128 * 1024),
        5 => Ok(64 * 1024),
        _ => Err(CartError::UnknownSizeCode { code }),
    }
}
