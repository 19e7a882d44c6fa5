//! A growable array of plain-data elements that grows in fixed chunks, with pluggable
//! compare/swap/move strategies and two built-in sorts.
//!
//! ```rust
//! use chunkvec::DynArray;
//!
//! let mut da: DynArray<f32> = DynArray::new();
//! da.push_back(1.123);
//! assert_eq!(da.len(), 1);
//! assert_eq!(da.at(0), 1.123);
//! assert_eq!(da.capacity(), chunkvec::DEFAULT_CHUNK);
//! ```
//!
//! # Preconditions
//!
//! Structural checks run at the start of every operation when `debug_assertions` are on, or with
//! the `validate` feature in release builds. Misuse that would touch memory out of bounds
//! (indexing past the end, popping an empty array, a missing strategy) panics in every build.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![no_std]
extern crate alloc;

// Module with internal macros used by other modules (needs to be included before other modules).
#[macro_use]
mod macros;

pub mod allocator;
pub mod array;
mod raw_array;
pub mod sort;
pub mod strategy;

pub use crate::allocator::{Global, RawAlloc};
pub use crate::array::{copy, DynArray, DEFAULT_CHUNK};
pub use crate::raw_array::{chunk_capacity, TryReserveError, MAX_CAPACITY};
pub use crate::sort::DEFAULT_QUICK_SORT_LEVELS;
pub use crate::strategy::Strategies;
