//! PS4 system update package (PUP) decoder.
//!
//! A PUP file is a 32-byte [`Header`], a table of 32-byte [`EntryRecord`]s and
//! the payload ranges those records point at. Decoding is all-or-nothing:
//! any failure aborts and no partial [`Pup`] is returned.
pub mod entry;
pub mod error;
pub mod header;
pub mod tables;

pub use entry::{ENTRY_SIZE, Entry, EntryRecord, decode_entries, materialize, read_payload};
pub use error::{PupError, PupErrorKind, PupResult};
pub use header::{
    ContentType, Endianness, HEADER_SIZE, Header, PUP_MAGIC, ProductType, decode_header,
    validate_sizes,
};

use crate::utils::files;
use std::path::Path;

/// Reads a whole PUP file, or stdin when the path is `-`.
///
/// A missing file is reported as [`PupError::FileNotFound`].
pub fn read_pup_file<P: AsRef<Path> + ?Sized>(path: &P) -> PupResult<Vec<u8>> {
    let path = path.as_ref();
    if !files::is_stdin(path) && !path.exists() {
        return Err(PupError::FileNotFound(path.to_path_buf()));
    }
    let data = files::read_file(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PupError::FileNotFound(path.to_path_buf()),
        _ => PupError::Io(e),
    })?;
    tracing::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

#[derive(Debug, Clone)]
/// A fully decoded PUP file.
pub struct Pup {
    header: Header,
    entries: Vec<Entry>,
}

impl Pup {
    /// Decodes a PUP file held in memory.
    pub fn parse(data: &[u8]) -> PupResult<Self> {
        let header = decode_header(data)?;
        validate_sizes(&header, data.len())?;
        let records = decode_entries(data, &header)?;
        let mut entries = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            entries.push(Entry::load(data, index, record)?);
        }
        tracing::debug!("decoded {} entries", entries.len());
        Ok(Self { header, entries })
    }

    /// Reads the whole file and decodes it.
    pub fn from_file<P: AsRef<Path> + ?Sized>(path: &P) -> PupResult<Self> {
        let data = read_pup_file(path)?;
        Self::parse(&data)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Entries in on-disk order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given id.
    pub fn find(&self, entry_id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.entry_id() == entry_id)
    }

    pub fn into_parts(self) -> (Header, Vec<Entry>) {
        (self.header, self.entries)
    }
}
