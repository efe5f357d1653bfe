//! Step/message observer (spec.md §6 "Global step event / logging"). Each
//! hook defaults to a no-op so instrumenting a run costs nothing unless a
//! caller actually overrides a method.

use crate::{common::Message, opcode::OpCode, state::ExecutionState, Output};
use ethereum_types::Address;

pub trait Observer {
    /// Called once per instruction, before gas/stack pre-validation.
    fn step(&mut self, _pc: usize, _op: OpCode, _state: &ExecutionState) {}
    /// Called before a message (top-level or recursive) starts executing.
    fn before_message(&mut self, _message: &Message) {}
    /// Called after a message finishes executing, with its result.
    fn after_message(&mut self, _output: &Output) {}
    /// Called when a CREATE/CREATE2 assigns a new contract address.
    fn new_contract(&mut self, _address: Address) {}
}

/// The default observer: observes nothing.
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards every event to `tracing`, at `trace` level for steps and `debug`
/// for message boundaries.
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn step(&mut self, pc: usize, op: OpCode, state: &ExecutionState) {
        tracing::trace!(pc, ?op, gas_left = state.gas_left, "step");
    }

    fn before_message(&mut self, message: &Message) {
        tracing::debug!(depth = message.depth, kind = ?message.kind, "message start");
    }

    fn after_message(&mut self, output: &Output) {
        tracing::debug!(success = output.is_success(), gas_left = output.gas_left, "message end");
    }

    fn new_contract(&mut self, address: Address) {
        tracing::debug!(?address, "contract created");
    }
}
