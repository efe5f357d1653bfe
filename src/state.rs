use crate::{
    common::{Message, Revision, StatusCode},
    opcode::OpCode,
};
use arrayvec::ArrayVec;
use bytes::Bytes;
use ethereum_types::U256;
use getset::{Getters, MutGetters};
use std::sync::Arc;

const SIZE: usize = 1024;

/// Fixed-capacity LIFO of 256-bit words (spec.md §3 "RunState"/§8 invariants:
/// capacity 1024, overflow/underflow are typed errors at the call site that
/// pre-validates height — see `interpreter::check_requirements`).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stack(pub ArrayVec<U256, SIZE>);

impl Stack {
    pub const fn limit() -> usize {
        SIZE
    }

    fn get_pos(&self, pos: usize) -> usize {
        self.len() - 1 - pos
    }

    pub fn get(&self, pos: usize) -> &U256 {
        &self.0[self.get_pos(pos)]
    }

    pub fn get_mut(&mut self, pos: usize) -> &mut U256 {
        let pos = self.get_pos(pos);
        &mut self.0[pos]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity is pre-validated by `check_requirements` before any handler
    /// that can push runs; a panic here indicates an opcode-table bug, not
    /// attacker-controlled input.
    pub fn push(&mut self, v: U256) {
        unsafe { self.0.push_unchecked(v) }
    }

    /// Height is pre-validated by `check_requirements`; see `push`.
    pub fn pop(&mut self) -> U256 {
        self.0.pop().expect("stack underflow despite pre-check")
    }

    pub fn swap_top(&mut self, pos: usize) {
        let top = self.0.len() - 1;
        let pos = self.get_pos(pos);
        self.0.swap(top, pos);
    }
}

/// Dynamically-grown byte array (spec.md §3 "Memory").
pub type Memory = Vec<u8>;

/// Pre-scanned set of valid JUMP/JUMPI targets (spec.md §4.2 "Pre-scan").
/// Every offset recorded here is a `JUMPDEST` byte that does not fall inside
/// a PUSH immediate.
#[derive(Clone, Debug)]
pub struct JumpdestMap(pub(crate) Vec<bool>);

impl JumpdestMap {
    pub fn contains(&self, dst: U256) -> bool {
        dst < self.0.len().into() && self.0[dst.as_usize()]
    }
}

/// The mutable interpreter state driven by the program-counter loop
/// (spec.md §3 "RunState"). The back-pointers to the fork configuration,
/// state view and EEI named in the spec are threaded as a separate `&mut
/// impl Eei` argument to every instruction handler rather than stored here —
/// the idiomatic Rust shape for what the spec's source language expressed as
/// object fields (see DESIGN.md).
#[derive(Clone, Debug, Getters, MutGetters)]
pub struct ExecutionState {
    pub(crate) program_counter: usize,
    pub(crate) op_code: OpCode,
    #[getset(get = "pub", get_mut = "pub")]
    pub(crate) gas_left: i64,
    #[getset(get = "pub", get_mut = "pub")]
    pub(crate) stack: Stack,
    #[getset(get = "pub", get_mut = "pub")]
    pub(crate) memory: Memory,
    /// Number of 32-byte words memory has been expanded to.
    pub(crate) memory_word_count: i64,
    /// Highest cumulative memory-expansion cost charged so far this run.
    /// Monotonically non-decreasing (spec.md §8 invariant).
    pub(crate) highest_mem_cost: i64,
    pub(crate) code: Bytes,
    pub(crate) valid_jumps: Arc<JumpdestMap>,
    pub(crate) message: Message,
    pub(crate) evm_revision: Revision,
    #[getset(get = "pub", get_mut = "pub")]
    pub(crate) return_data: Bytes,
    pub(crate) output_data: Bytes,
}

impl ExecutionState {
    pub fn new(
        message: Message,
        evm_revision: Revision,
        code: Bytes,
        valid_jumps: Arc<JumpdestMap>,
    ) -> Self {
        let gas_left = message.gas_limit_i64();
        Self {
            program_counter: 0,
            op_code: OpCode::STOP,
            gas_left,
            stack: Default::default(),
            memory: Memory::with_capacity(4 * 1024),
            memory_word_count: 0,
            highest_mem_cost: 0,
            code,
            valid_jumps,
            message,
            evm_revision,
            return_data: Default::default(),
            output_data: Bytes::new(),
        }
    }

    /// `useGas` from the EEI gas surface (spec.md §4.3).
    pub fn use_gas(&mut self, amount: i64) -> Result<(), StatusCode> {
        self.gas_left -= amount;
        if self.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
        Ok(())
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack() {
        let mut stack = Stack::default();

        let items = [0xde, 0xad, 0xbe, 0xef];

        for (i, item) in items.iter().copied().enumerate() {
            stack.push(item.into());
            assert_eq!(stack.len(), i + 1);
        }

        assert_eq!(*stack.get(2), 0xad.into());

        assert_eq!(stack.pop(), 0xef.into());

        assert_eq!(*stack.get(2), 0xde.into());
    }

    #[test]
    fn jumpdest_map_rejects_push_immediates() {
        // PUSH1 0x5b (looks like JUMPDEST, but it's data) ; JUMPDEST
        let map = crate::interpreter::AnalyzedCode::analyze(&[0x60, 0x5b, 0x5b][..]);
        assert!(!map.valid_jumps().contains(1.into()));
        assert!(map.valid_jumps().contains(2.into()));
    }
}
