//! A set of utilities primarily designed for memory management and low level performance optimizations.

mod any_buffer;
mod bit_field;

pub use bit_field::*;

pub(crate) use any_buffer::*;
