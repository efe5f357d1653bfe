#![doc = include_str!("../README.md")]

pub use common::{Account, Log, Message, MessageKind, Output, Revision, StatusCode};
pub use config::Config;
pub use eei::Eei;
pub use interpreter::AnalyzedCode;
pub use opcode::OpCode;
pub use state::{ExecutionState, Stack};
pub use state_view::{CheckpointId, StateView};

/// Maximum allowed EVM bytecode size (EIP-170).
pub const MAX_CODE_SIZE: usize = 0x6000;

mod common;
pub mod config;
pub mod eei;
pub mod executor;
#[doc(hidden)]
pub mod instructions;
mod interpreter;
pub mod observer;
pub mod opcode;
pub mod ovm;
pub mod precompiles;
mod state;
pub mod state_view;

#[cfg(feature = "util")]
pub mod util;
