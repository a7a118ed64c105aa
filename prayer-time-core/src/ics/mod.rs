//! ICS document generation.
//!
//! Output follows RFC 5545 with CRLF line endings.

mod generate;

pub use generate::generate_calendar;
