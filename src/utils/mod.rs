//! Utilities
pub mod counter;
pub mod files;
pub mod struct_pack;
