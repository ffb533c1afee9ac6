//! A Rust library for decoding PS4 system update packages (PUP).
//!
//! See [`pup::Pup`] for the entry point.
pub mod ext;
pub mod pup;
pub mod types;
pub mod utils;
