use int_enum::IntEnum;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a decode failure.
///
/// Callers match on this to decide remediation, e.g. re-download versus
/// rejecting the file as corrupt.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntEnum)]
pub enum PupErrorKind {
    FileNotFound = 0,
    InvalidHeaderSize = 1,
    InvalidMagic = 2,
    UnknownError = 3,
    InvalidFileSize = 4,
    EntryOutOfBounds = 5,
}

#[derive(Debug, Error)]
pub enum PupError {
    #[error("{} not exists", .0.display())]
    FileNotFound(PathBuf),

    #[error("data is too small to be a valid header: {0} bytes")]
    InvalidHeaderSize(usize),

    #[error("invalid magic value: {0:#x}")]
    InvalidMagic(u32),

    #[error(
        "invalid file size: {actual} bytes, header declares header_size={header_size} file_size={file_size}"
    )]
    InvalidFileSize {
        header_size: u16,
        file_size: u32,
        actual: usize,
    },

    #[error(
        "entry {index} is out of bounds: offset={offset:#x}, size={size:#x}, data length={actual:#x}"
    )]
    EntryOutOfBounds {
        index: usize,
        offset: u64,
        size: u64,
        actual: usize,
    },

    #[error("failed to inflate entry {index}: {source}")]
    Inflate {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl PupError {
    pub fn kind(&self) -> PupErrorKind {
        match self {
            Self::FileNotFound(_) => PupErrorKind::FileNotFound,
            Self::InvalidHeaderSize(_) => PupErrorKind::InvalidHeaderSize,
            Self::InvalidMagic(_) => PupErrorKind::InvalidMagic,
            Self::InvalidFileSize { .. } => PupErrorKind::InvalidFileSize,
            Self::EntryOutOfBounds { .. } => PupErrorKind::EntryOutOfBounds,
            Self::Inflate { .. } | Self::Io(_) => PupErrorKind::UnknownError,
        }
    }
}

pub type PupResult<T> = Result<T, PupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(u8::from(PupErrorKind::FileNotFound), 0);
        assert_eq!(u8::from(PupErrorKind::InvalidFileSize), 4);
        assert_eq!(PupErrorKind::try_from(2u8), Ok(PupErrorKind::InvalidMagic));
        assert!(PupErrorKind::try_from(6u8).is_err());
    }

    #[test]
    fn test_inflate_and_io_are_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt deflate stream");
        let err = PupError::Inflate { index: 3, source: io };
        assert_eq!(err.kind(), PupErrorKind::UnknownError);
        assert!(err.to_string().contains("entry 3"));
        let err = PupError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), PupErrorKind::UnknownError);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PupError::InvalidMagic(0x3D1D4F15).to_string(),
            "invalid magic value: 0x3d1d4f15"
        );
        assert_eq!(
            PupError::FileNotFound(PathBuf::from("/NONEXISTANTFILE")).to_string(),
            "/NONEXISTANTFILE not exists"
        );
    }
}
