//! Schedule provider backed by the waktusholat.org city search and the
//! pray.zone times API.

mod client;
mod types;

pub use client::{WaktuSholatClient, WaktuSholatConfig};
