//! Extensions for standard library types.
pub mod io;
