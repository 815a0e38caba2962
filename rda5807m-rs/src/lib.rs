//! Driver for the RDA5807M single-chip FM receiver over I²C.
//!
//! The chip holds all state. Every query is a bus read and every setter is a
//! read-modify-write of one register word, so nothing is cached here.

#![cfg_attr(not(test), no_std)]

pub mod rda5807m;
pub mod read_write;
pub mod registers;
pub mod settings;

pub use rda5807m::{Rda5807m, Rda5807mError};
