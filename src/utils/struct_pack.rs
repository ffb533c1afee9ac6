use pup_tool_macro::struct_unpack_impl_for_num;
use std::io::{Read, Result, Seek};

/// Fixed-layout value that can be read from a seekable stream.
pub trait StructUnpack: Sized {
    fn unpack<R: Read + Seek>(reader: R, big: bool) -> Result<Self>;
}

struct_unpack_impl_for_num!(u8);
struct_unpack_impl_for_num!(u16);
struct_unpack_impl_for_num!(u32);
struct_unpack_impl_for_num!(u64);
