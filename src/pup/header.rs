//! PUP file header
use super::error::*;
use crate::ext::io::*;
use int_enum::IntEnum;
use pup_tool_macro::StructUnpack;
use serde::Serialize;

/// PUP header magic (`4F 15 3D 1D` on disk).
pub const PUP_MAGIC: u32 = 0x1D3D154F;
/// Size of the fixed header; the entry table starts right after it.
pub const HEADER_SIZE: usize = 32;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntEnum, Serialize)]
pub enum Endianness {
    Unknown = 0,
    Little = 1,
    Big = 2,
}

impl Endianness {
    pub fn from_raw(code: u8) -> Self {
        Self::try_from(code).unwrap_or(Self::Unknown)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntEnum, Serialize)]
pub enum ContentType {
    Elf = 1,
    Pup = 4,
    Unknown = 0x10,
}

impl ContentType {
    pub fn from_raw(code: u8) -> Self {
        Self::try_from(code).unwrap_or(Self::Unknown)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntEnum, Serialize)]
pub enum ProductType {
    Pup = 0,
    Elf = 8,
    Prx = 9,
    K = 0xC,
    Sm = 0xE,
    Sl = 0xF,
    Unknown = 0x10,
}

impl ProductType {
    pub fn from_raw(code: u8) -> Self {
        Self::try_from(code).unwrap_or(Self::Unknown)
    }
}

/// The fixed 32-byte prefix of a PUP file, little-endian on disk.
#[derive(Debug, Clone, PartialEq, Eq, StructUnpack, Serialize)]
pub struct Header {
    pub magic: u32,
    pub version: u8,
    pub mode: u8,
    pub endianness: u8,
    pub flags: u8,
    pub content_type: u8,
    pub product_type: u8,
    pub padding: u16,
    /// Declared size of the header plus the entry table.
    pub header_size: u16,
    pub hash_size: u16,
    /// Declared size of the whole file.
    pub file_size: u32,
    pub padding2: u32,
    pub entries_count: u16,
    pub flags2: u16,
    pub unk1: u32,
}

impl Header {
    pub fn endianness_kind(&self) -> Endianness {
        Endianness::from_raw(self.endianness)
    }

    pub fn content_type_kind(&self) -> ContentType {
        ContentType::from_raw(self.content_type)
    }

    pub fn product_type_kind(&self) -> ProductType {
        ProductType::from_raw(self.product_type)
    }
}

/// Decodes and validates the header magic.
///
/// Declared sizes are not checked here, see [`validate_sizes`].
pub fn decode_header(data: &[u8]) -> PupResult<Header> {
    if data.len() < HEADER_SIZE {
        return Err(PupError::InvalidHeaderSize(data.len()));
    }
    let mut reader = MemReaderRef::new(&data[..HEADER_SIZE]);
    let header: Header = reader.read_struct(false)?;
    if header.magic != PUP_MAGIC {
        return Err(PupError::InvalidMagic(header.magic));
    }
    tracing::debug!(
        "PUP header: version={}, header_size={:#x}, file_size={:#x}, entries={}",
        header.version,
        header.header_size,
        header.file_size,
        header.entries_count
    );
    Ok(header)
}

/// Rejects headers whose declared sizes exceed the data actually present.
pub fn validate_sizes(header: &Header, data_len: usize) -> PupResult<()> {
    if header.header_size as usize > data_len || header.file_size as u64 > data_len as u64 {
        return Err(PupError::InvalidFileSize {
            header_size: header.header_size,
            file_size: header.file_size,
            actual: data_len,
        });
    }
    Ok(())
}
