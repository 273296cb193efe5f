use thiserror::Error;

/// Everything that can go wrong while loading a cartridge. Each stage of the
/// load pipeline maps to its own variant so callers can tell an I/O problem
/// from a corrupt dump.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("cannot read rom file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot allocate buffer of {size} bytes")]
    Alloc { size: usize },

    #[error("rom is too short to contain a header ({len} bytes)")]
    TruncatedHeader { len: usize },

    #[error("rom does not contain the nintendo logo")]
    InvalidLogo,

    #[error("header checksum mismatch (computed {computed:#04X}, header says {header:#04X})")]
    HeaderChecksumMismatch { computed: u8, header: u8 },

    #[error("global checksum mismatch (computed {computed:#06X}, header says {header:#06X})")]
    GlobalChecksumMismatch { computed: u16, header: u16 },

    #[error("unknown rom/ram size code {code:#04X}")]
    UnknownSizeCode { code: u8 },

    #[error("rom size mismatch (file is {file} bytes, header declares {header})")]
    SizeMismatch { file: usize, header: usize },
}
