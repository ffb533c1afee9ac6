//! Entry table and payload extraction
use super::error::*;
use super::header::{HEADER_SIZE, Header};
use super::tables;
use crate::ext::io::*;
use flate2::{Decompress, FlushDecompress, Status};
use pup_tool_macro::StructUnpack;
use serde::Serialize;
use std::io::{Seek, SeekFrom};

/// Size of one entry record in the table.
pub const ENTRY_SIZE: usize = 32;

const FLAG_COMPRESSED: u64 = 0x8;
const FLAG_BLOCKED: u64 = 0x800;
const ENTRY_ID_SHIFT: u32 = 20;
/// Upper bound for the output buffer reserved up front from `memory_size`.
const INITIAL_CAPACITY: usize = 0x1000;

/// One blob descriptor as stored in the entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StructUnpack, Serialize)]
pub struct EntryRecord {
    pub flags: u64,
    /// Absolute offset of the payload in the file.
    pub offset: u64,
    /// Stored size of the payload, compressed size if compressed.
    pub file_size: u64,
    /// Size of the payload once decompressed.
    pub memory_size: u64,
}

impl EntryRecord {
    pub fn entry_id(&self) -> u64 {
        self.flags >> ENTRY_ID_SHIFT
    }

    pub fn compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    /// Payload is split into fixed-size blocks.
    ///
    /// Block tables are not interpreted; blocked payloads are inflated as one stream.
    pub fn blocked(&self) -> bool {
        self.flags & FLAG_BLOCKED != 0
    }

    pub fn file_name(&self) -> &'static str {
        tables::file_name(self.entry_id())
    }

    pub fn device_path(&self) -> &'static str {
        tables::device_path(self.entry_id())
    }
}

/// Reads `header.entries_count` records that follow the header.
///
/// Payload ranges are not touched, so records pointing past the end of
/// `data` still decode.
pub fn decode_entries(data: &[u8], header: &Header) -> PupResult<Vec<EntryRecord>> {
    let count = header.entries_count as usize;
    let table_end = HEADER_SIZE + count * ENTRY_SIZE;
    if table_end > data.len() {
        let index = data.len().saturating_sub(HEADER_SIZE) / ENTRY_SIZE;
        return Err(PupError::EntryOutOfBounds {
            index,
            offset: (HEADER_SIZE + index * ENTRY_SIZE) as u64,
            size: ENTRY_SIZE as u64,
            actual: data.len(),
        });
    }
    let mut reader = MemReaderRef::new(data);
    reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
    let records: Vec<EntryRecord> = reader.read_struct_vec(count, false)?;
    for (index, record) in records.iter().enumerate() {
        tracing::trace!(
            "entry {}: id={:#x} ({}), flags={:#x}, offset={:#x}, size={:#x}/{:#x}",
            index,
            record.entry_id(),
            record.file_name(),
            record.flags,
            record.offset,
            record.file_size,
            record.memory_size
        );
    }
    Ok(records)
}

/// Borrows the stored bytes of an entry, `[offset, offset + file_size)`.
pub fn read_payload<'a>(data: &'a [u8], index: usize, record: &EntryRecord) -> PupResult<&'a [u8]> {
    MemReaderRef::new(data)
        .slice_at(record.offset, record.file_size)
        .ok_or(PupError::EntryOutOfBounds {
            index,
            offset: record.offset,
            size: record.file_size,
            actual: data.len(),
        })
}

/// Turns the stored bytes of an entry into its payload, inflating when compressed.
///
/// `memory_size` only hints the first output buffer; it is not checked against the result.
pub fn materialize(index: usize, record: &EntryRecord, raw: &[u8]) -> PupResult<Vec<u8>> {
    if !record.compressed() {
        return Ok(raw.to_vec());
    }
    let capacity = usize::try_from(record.memory_size)
        .unwrap_or(usize::MAX)
        .min(INITIAL_CAPACITY);
    inflate(index, raw, capacity)
}

fn inflate(index: usize, raw: &[u8], capacity: usize) -> PupResult<Vec<u8>> {
    let mut stream = Decompress::new(true);
    let mut data = Vec::with_capacity(capacity);
    loop {
        if data.len() == data.capacity() {
            data.reserve(data.capacity().max(0x100));
        }
        let in_before = stream.total_in();
        let out_before = stream.total_out();
        let status = stream
            .decompress_vec(&raw[in_before as usize..], &mut data, FlushDecompress::Finish)
            .map_err(|e| PupError::Inflate {
                index,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?;
        match status {
            Status::StreamEnd => {
                data.shrink_to_fit();
                return Ok(data);
            }
            Status::Ok | Status::BufError => {
                // Output space was available, so no progress means the input ran out.
                if stream.total_in() == in_before && stream.total_out() == out_before {
                    return Err(PupError::Inflate {
                        index,
                        source: std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "truncated deflate stream",
                        ),
                    });
                }
            }
        }
    }
}

/// A decoded entry: its table record and the materialized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    record: EntryRecord,
    payload: Vec<u8>,
}

impl Entry {
    /// Reads and materializes the payload of `record`.
    pub(crate) fn load(data: &[u8], index: usize, record: EntryRecord) -> PupResult<Self> {
        let raw = read_payload(data, index, &record)?;
        let payload = materialize(index, &record, raw)?;
        tracing::trace!("entry {}: {} bytes materialized", index, payload.len());
        Ok(Self { record, payload })
    }

    pub fn record(&self) -> &EntryRecord {
        &self.record
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn entry_id(&self) -> u64 {
        self.record.entry_id()
    }

    pub fn compressed(&self) -> bool {
        self.record.compressed()
    }

    pub fn blocked(&self) -> bool {
        self.record.blocked()
    }

    pub fn file_name(&self) -> &'static str {
        self.record.file_name()
    }

    pub fn device_path(&self) -> &'static str {
        self.record.device_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn record(flags: u64, offset: u64, file_size: u64, memory_size: u64) -> EntryRecord {
        EntryRecord {
            flags,
            offset,
            file_size,
            memory_size,
        }
    }

    #[test]
    fn test_flag_decomposition() {
        let r = record(0x10106C0E, 0, 0, 0);
        assert_eq!(r.entry_id(), 0x101);
        assert!(r.compressed());
        assert!(r.blocked());
        assert_eq!(r.file_name(), "eula.xml");

        let r = record(0x101 << 20, 0, 0, 0);
        assert_eq!(r.entry_id(), 0x101);
        assert!(!r.compressed());
        assert!(!r.blocked());

        let r = record(0x8, 0, 0, 0);
        assert_eq!(r.entry_id(), 0);
        assert!(r.compressed());
        assert!(!r.blocked());
        assert_eq!(r.file_name(), tables::UNKNOWN);

        let r = record(0x800, 0, 0, 0);
        assert!(!r.compressed());
        assert!(r.blocked());
    }

    #[test]
    fn test_entry_id_keeps_high_bits() {
        let r = record(u64::MAX, 0, 0, 0);
        assert_eq!(r.entry_id(), u64::MAX >> 20);
        assert_eq!(r.file_name(), tables::UNKNOWN);
        assert_eq!(r.device_path(), tables::UNKNOWN);
    }

    #[test]
    fn test_read_payload_bounds() {
        let data = [0u8; 64];
        assert_eq!(read_payload(&data, 0, &record(0, 60, 4, 4)).unwrap().len(), 4);
        let err = read_payload(&data, 2, &record(0, 60, 5, 5)).unwrap_err();
        assert!(matches!(err, PupError::EntryOutOfBounds { index: 2, .. }));
        let err = read_payload(&data, 0, &record(0, u64::MAX, 2, 2)).unwrap_err();
        assert_eq!(err.kind(), PupErrorKind::EntryOutOfBounds);
    }

    #[test]
    fn test_materialize_raw() {
        let raw = b"plain payload";
        let out = materialize(0, &record(0x6 << 20, 0, 13, 13), raw).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn test_materialize_compressed() {
        let payload: Vec<u8> = (0..20000u32).map(|i| (i % 251) as u8).collect();
        let raw = zlib(&payload);
        let r = record(0x101 << 20 | 0x8, 0, raw.len() as u64, payload.len() as u64);
        let out = materialize(0, &r, &raw).unwrap();
        assert_eq!(out.len() as u64, r.memory_size);
        assert_eq!(out, payload);
    }

    #[test]
    fn test_materialize_ignores_memory_size() {
        let payload = vec![0x42u8; 5000];
        let raw = zlib(&payload);
        let r = record(0x8, 0, raw.len() as u64, 1);
        assert_eq!(materialize(0, &r, &raw).unwrap(), payload);
        let r = record(0x8, 0, raw.len() as u64, u64::MAX);
        assert_eq!(materialize(0, &r, &raw).unwrap(), payload);
    }

    #[test]
    fn test_materialize_capacity_follows_output() {
        let raw = zlib(b"x");
        for memory_size in [0, 1, 0x10_0000, u64::MAX] {
            let r = record(0x8, 0, raw.len() as u64, memory_size);
            let out = materialize(0, &r, &raw).unwrap();
            assert_eq!(out, b"x");
            assert!(out.capacity() < 0x100);
        }
        let payload = vec![0x5Au8; 3 * INITIAL_CAPACITY + 7];
        let raw = zlib(&payload);
        let r = record(0x8, 0, raw.len() as u64, 0);
        assert_eq!(materialize(0, &r, &raw).unwrap(), payload);
    }

    #[test]
    fn test_materialize_trailing_garbage() {
        let mut raw = zlib(b"hello");
        raw.extend_from_slice(b"GARBAGE");
        let r = record(0x8, 0, raw.len() as u64, 5);
        assert_eq!(materialize(0, &r, &raw).unwrap(), b"hello");
    }

    #[test]
    fn test_materialize_corrupt_stream() {
        let r = record(0x8, 0, 8, 8);
        let err = materialize(4, &r, b"notzlib!").unwrap_err();
        assert!(matches!(err, PupError::Inflate { index: 4, .. }));
        assert_eq!(err.kind(), PupErrorKind::UnknownError);
    }

    #[test]
    fn test_materialize_truncated_stream() {
        let payload: Vec<u8> = (0..4096u32).map(|i| (i * 7) as u8).collect();
        let raw = zlib(&payload);
        let r = record(0x8, 0, raw.len() as u64 / 2, payload.len() as u64);
        let err = materialize(0, &r, &raw[..raw.len() / 2]).unwrap_err();
        assert_eq!(err.kind(), PupErrorKind::UnknownError);
    }

    #[test]
    fn test_materialize_empty_compressed_input() {
        let err = materialize(0, &record(0x8, 0, 0, 0), &[]).unwrap_err();
        assert_eq!(err.kind(), PupErrorKind::UnknownError);
    }
}
