//! Test-only utilities (spec.md §6 "minimal in-memory `StateView`"), gated
//! behind the `util` feature so embedders never pull them into a release
//! build.

pub mod bytecode;
pub mod mock;

pub use bytecode::{Bytecode, CallInstruction};
