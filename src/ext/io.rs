use crate::utils::struct_pack::StructUnpack;
use std::io::*;

pub trait ReadExt {
    fn read_struct<T: StructUnpack>(&mut self, big: bool) -> Result<T>;
    fn read_struct_vec<T: StructUnpack>(&mut self, count: usize, big: bool) -> Result<Vec<T>> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.read_struct(big)?);
        }
        Ok(vec)
    }
}

impl<T: Read + Seek> ReadExt for T {
    fn read_struct<S: StructUnpack>(&mut self, big: bool) -> Result<S> {
        S::unpack(self, big)
    }
}

/// Seekable reader over a borrowed byte buffer.
pub struct MemReaderRef<'a> {
    data: &'a [u8],
    pos: usize,
}

impl std::fmt::Debug for MemReaderRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemReaderRef")
            .field("pos", &self.pos)
            .field("data_length", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl<'a> MemReaderRef<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        MemReaderRef { data, pos: 0 }
    }

    /// Borrows `len` bytes starting at absolute `offset` without moving the cursor.
    ///
    /// Returns `None` when the range overflows or runs past the end of the buffer.
    pub fn slice_at(&self, offset: u64, len: u64) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        if end > self.data.len() as u64 {
            return None;
        }
        Some(&self.data[offset as usize..end as usize])
    }
}

impl<'a> Read for MemReaderRef<'a> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.pos >= self.data.len() {
            return Ok(0);
        }
        let bytes_to_read = buf.len().min(self.data.len() - self.pos);
        buf[..bytes_to_read].copy_from_slice(&self.data[self.pos..self.pos + bytes_to_read]);
        self.pos += bytes_to_read;
        Ok(bytes_to_read)
    }
}

impl<'a> Seek for MemReaderRef<'a> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match pos {
            SeekFrom::Start(offset) => {
                if offset > self.data.len() as u64 {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        "Seek position is beyond the end of the data",
                    ));
                }
                self.pos = offset as usize;
            }
            SeekFrom::End(offset) => {
                let end_pos = self.data.len() as i64 + offset;
                if end_pos < 0 || end_pos as usize > self.data.len() {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        "Seek from end is outside of the data",
                    ));
                }
                self.pos = end_pos as usize;
            }
            SeekFrom::Current(offset) => {
                let new_pos = self.pos as i64 + offset;
                if new_pos < 0 || new_pos as usize > self.data.len() {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        "Seek position is outside of the data",
                    ));
                }
                self.pos = new_pos as usize;
            }
        }
        Ok(self.pos as u64)
    }

    fn stream_position(&mut self) -> Result<u64> {
        Ok(self.pos as u64)
    }
}
