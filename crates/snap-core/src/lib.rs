#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the snap template compiler and its reader.
//!
//! - [`StringRef`]: an `(offset, length)` view into the interned string bytes
//! - [`Interner`]: deduplicating string table, first-occurrence order
//! - [`Colors`]: ANSI palette for terminal dumps

mod colors;
mod interner;
mod string_ref;

#[cfg(test)]
mod interner_tests;
#[cfg(test)]
mod string_ref_tests;

pub use colors::Colors;
pub use interner::{Interner, StringTableOverflow};
pub use string_ref::StringRef;
