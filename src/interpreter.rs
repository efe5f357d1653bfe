//! The byte-code interpreter (spec.md §4.2): a PC-driven step loop over
//! pre-analyzed code, decoding one instruction per iteration and dispatching
//! to the handlers in [`crate::instructions`]. Suspending instructions call
//! straight through to an `&mut impl Eei` with `.await` rather than yielding
//! through a resumable continuation (see DESIGN.md).

use crate::{
    common::{Message, Revision, StatusCode},
    eei::Eei,
    instructions::{
        arithmetic, bitwise, boolean,
        call::{self},
        control::{calldataload, calldatasize, op_jump, ret},
        external, memory,
        stack_manip::{dup, push, swap},
        instruction_table::get_baseline_instruction_table,
    },
    opcode::OpCode,
    state::{ExecutionState, JumpdestMap, Stack},
    Output,
};
use bytes::Bytes;
use std::sync::Arc;

fn check_requirements(
    instruction_table: &crate::instructions::instruction_table::InstructionTable,
    state: &mut ExecutionState,
    op: OpCode,
) -> Result<(), StatusCode> {
    let metrics = instruction_table[op.to_usize()].ok_or(StatusCode::InvalidOpcode)?;

    state.gas_left -= metrics.gas_cost as i64;
    if state.gas_left < 0 {
        return Err(StatusCode::OutOfGas);
    }

    let stack_size = state.stack.len();
    if stack_size == Stack::limit() {
        if metrics.can_overflow_stack {
            return Err(StatusCode::StackOverflow);
        }
    } else if stack_size < metrics.stack_height_required.into() {
        return Err(StatusCode::StackUnderflow);
    }

    Ok(())
}

/// Code with its JUMPDEST pre-scan attached (spec.md §4.2 "Pre-scan").
#[derive(Clone, Debug)]
pub struct AnalyzedCode {
    jumpdest_map: Arc<JumpdestMap>,
    code: Bytes,
}

impl AnalyzedCode {
    /// Analyze code and prepare it for execution. A trailing `STOP` is
    /// appended so the step loop never reads past the end of the buffer.
    pub fn analyze(code: impl AsRef<[u8]>) -> Self {
        let code = code.as_ref();
        let mut jumpdest_map = vec![false; code.len()];

        let mut i = 0;
        while i < code.len() {
            let opcode = OpCode(code[i]);
            i += match opcode {
                OpCode::JUMPDEST => {
                    jumpdest_map[i] = true;
                    1
                }
                op if (OpCode::PUSH1.to_usize()..=OpCode::PUSH32.to_usize())
                    .contains(&op.to_usize()) =>
                {
                    op.to_usize() - OpCode::PUSH1.to_usize() + 2
                }
                _ => 1,
            }
        }

        let mut padded_code = vec![0_u8; i + 1];
        padded_code[..code.len()].copy_from_slice(code);
        padded_code[i] = OpCode::STOP.to_u8();

        Self {
            jumpdest_map: Arc::new(JumpdestMap(jumpdest_map)),
            code: padded_code.into(),
        }
    }

    pub fn valid_jumps(&self) -> &JumpdestMap {
        &self.jumpdest_map
    }

    pub fn code(&self) -> &Bytes {
        &self.code
    }

    /// Execute analyzed EVM bytecode to completion.
    pub async fn execute(
        &self,
        eei: &mut impl Eei,
        message: Message,
        revision: Revision,
    ) -> Output {
        let mut state =
            ExecutionState::new(message, revision, self.code.clone(), self.jumpdest_map.clone());

        match run(eei, &mut state, self).await {
            Ok(reverted) => Output {
                status_code: if reverted { Some(StatusCode::Revert) } else { None },
                gas_left: state.gas_left,
                gas_refund: 0,
                output_data: state.output_data.clone(),
                create_address: None,
                logs: Vec::new(),
                selfdestruct: Default::default(),
            },
            Err(status_code) => Output {
                status_code: Some(status_code),
                gas_left: 0,
                gas_refund: 0,
                output_data: Bytes::new(),
                create_address: None,
                logs: Vec::new(),
                selfdestruct: Default::default(),
            },
        }
    }
}

/// Runs the step loop. Returns `Ok(reverted)` on clean termination (`STOP`,
/// `RETURN` or `REVERT`) or `Err` on any other typed failure.
async fn run(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
    code: &AnalyzedCode,
) -> Result<bool, StatusCode> {
    let instruction_table = get_baseline_instruction_table(state.evm_revision);

    let mut reverted = false;
    let mut pc = 0usize;

    loop {
        let op = OpCode(code.code[pc]);

        eei.on_step(pc, op, state);

        check_requirements(instruction_table, state, op)?;

        match op {
            OpCode::STOP => break,
            OpCode::ADD => arithmetic::add(&mut state.stack),
            OpCode::MUL => arithmetic::mul(&mut state.stack),
            OpCode::SUB => arithmetic::sub(&mut state.stack),
            OpCode::DIV => arithmetic::div(&mut state.stack),
            OpCode::SDIV => arithmetic::sdiv(&mut state.stack),
            OpCode::MOD => arithmetic::modulo(&mut state.stack),
            OpCode::SMOD => arithmetic::smod(&mut state.stack),
            OpCode::ADDMOD => arithmetic::addmod(&mut state.stack),
            OpCode::MULMOD => arithmetic::mulmod(&mut state.stack),
            OpCode::EXP => arithmetic::exp(state)?,
            OpCode::SIGNEXTEND => arithmetic::signextend(&mut state.stack),

            OpCode::LT => boolean::lt(&mut state.stack),
            OpCode::GT => boolean::gt(&mut state.stack),
            OpCode::SLT => boolean::slt(&mut state.stack),
            OpCode::SGT => boolean::sgt(&mut state.stack),
            OpCode::EQ => boolean::eq(&mut state.stack),
            OpCode::ISZERO => boolean::iszero(&mut state.stack),
            OpCode::AND => boolean::and(&mut state.stack),
            OpCode::OR => boolean::or(&mut state.stack),
            OpCode::XOR => boolean::xor(&mut state.stack),
            OpCode::NOT => boolean::not(&mut state.stack),
            OpCode::BYTE => bitwise::byte(&mut state.stack),
            OpCode::SHL => bitwise::shl(&mut state.stack),
            OpCode::SHR => bitwise::shr(&mut state.stack),
            OpCode::SAR => bitwise::sar(&mut state.stack),

            OpCode::KECCAK256 => memory::keccak256(state)?,
            OpCode::ADDRESS => external::address(state),
            OpCode::BALANCE => external::balance(eei, state).await?,
            OpCode::CALLER => external::caller(state),
            OpCode::CALLVALUE => external::callvalue(state),
            OpCode::CALLDATALOAD => calldataload(state),
            OpCode::CALLDATASIZE => calldatasize(state),
            OpCode::CALLDATACOPY => memory::calldatacopy(state)?,
            OpCode::CODESIZE => memory::codesize(&mut state.stack, &code.code),
            OpCode::CODECOPY => memory::codecopy(state, &code.code)?,
            OpCode::EXTCODESIZE => external::extcodesize(eei, state).await?,
            OpCode::EXTCODECOPY => memory::extcodecopy(eei, state).await?,
            OpCode::RETURNDATASIZE => memory::returndatasize(state),
            OpCode::RETURNDATACOPY => memory::returndatacopy(state)?,
            OpCode::EXTCODEHASH => memory::extcodehash(eei, state).await?,
            OpCode::BLOCKHASH => external::blockhash(eei, state).await?,

            OpCode::ORIGIN => external::push_txcontext(eei, state, external::origin_accessor).await?,
            OpCode::COINBASE => {
                external::push_txcontext(eei, state, external::coinbase_accessor).await?
            }
            OpCode::GASPRICE => {
                external::push_txcontext(eei, state, external::gasprice_accessor).await?
            }
            OpCode::TIMESTAMP => {
                external::push_txcontext(eei, state, external::timestamp_accessor).await?
            }
            OpCode::NUMBER => external::push_txcontext(eei, state, external::number_accessor).await?,
            OpCode::DIFFICULTY => {
                external::push_txcontext(eei, state, external::difficulty_accessor).await?
            }
            OpCode::GASLIMIT => {
                external::push_txcontext(eei, state, external::gaslimit_accessor).await?
            }
            OpCode::CHAINID => external::push_txcontext(eei, state, external::chainid_accessor).await?,
            OpCode::BASEFEE => external::push_txcontext(eei, state, external::basefee_accessor).await?,
            OpCode::SELFBALANCE => external::selfbalance(eei, state).await?,

            OpCode::POP => crate::instructions::stack_manip::pop(&mut state.stack),
            OpCode::MLOAD => memory::mload(state)?,
            OpCode::MSTORE => memory::mstore(state)?,
            OpCode::MSTORE8 => memory::mstore8(state)?,
            OpCode::JUMP => {
                let valid_jumps = state.valid_jumps.clone();
                pc = op_jump(state, &valid_jumps)?;
                continue;
            }
            OpCode::JUMPI => {
                if !state.stack.get(1).is_zero() {
                    let valid_jumps = state.valid_jumps.clone();
                    pc = op_jump(state, &valid_jumps)?;
                    state.stack.pop();
                    continue;
                } else {
                    state.stack.pop();
                    state.stack.pop();
                }
            }
            OpCode::PC => state.stack.push(pc.into()),
            OpCode::MSIZE => memory::msize(state),
            OpCode::SLOAD => external::sload(eei, state).await?,
            OpCode::SSTORE => external::sstore(eei, state).await?,
            OpCode::GAS => state.stack.push(state.gas_left.into()),
            OpCode::JUMPDEST => {}

            op if (OpCode::PUSH1.to_usize()..=OpCode::PUSH32.to_usize()).contains(&op.to_usize()) => {
                pc += push(
                    &mut state.stack,
                    &code.code[pc + 1..],
                    op.to_usize() - OpCode::PUSH1.to_usize() + 1,
                );
            }
            op if (OpCode::DUP1.to_usize()..=OpCode::DUP16.to_usize()).contains(&op.to_usize()) => {
                dup(&mut state.stack, op.to_usize() - OpCode::DUP1.to_usize() + 1);
            }
            op if (OpCode::SWAP1.to_usize()..=OpCode::SWAP16.to_usize()).contains(&op.to_usize()) => {
                swap(&mut state.stack, op.to_usize() - OpCode::SWAP1.to_usize() + 1);
            }
            op if (OpCode::LOG0.to_usize()..=OpCode::LOG4.to_usize()).contains(&op.to_usize()) => {
                external::log(eei, state, op.to_usize() - OpCode::LOG0.to_usize()).await?;
            }

            OpCode::CREATE | OpCode::CREATE2 => {
                call::create(eei, state, op == OpCode::CREATE2).await?;
            }
            OpCode::CALL | OpCode::CALLCODE | OpCode::DELEGATECALL | OpCode::STATICCALL => {
                let kind = match op {
                    OpCode::CALL | OpCode::STATICCALL => crate::common::MessageKind::Call,
                    OpCode::CALLCODE => crate::common::MessageKind::CallCode,
                    OpCode::DELEGATECALL => crate::common::MessageKind::DelegateCall,
                    _ => unreachable!(),
                };
                call::call(eei, state, kind, op == OpCode::STATICCALL).await?;
            }
            OpCode::RETURN | OpCode::REVERT => {
                ret(state)?;
                reverted = op == OpCode::REVERT;
                break;
            }
            OpCode::INVALID => return Err(StatusCode::InvalidOpcode),
            OpCode::SELFDESTRUCT => {
                external::selfdestruct(eei, state).await?;
                break;
            }
            other => unreachable!("unhandled opcode: {:?}", other),
        }

        pc += 1;
    }

    Ok(reverted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eei::DummyEei;

    fn msg(depth: u32, data: bytes::Bytes) -> Message {
        Message {
            kind: crate::common::MessageKind::Call,
            caller: Default::default(),
            to: Some(Default::default()),
            code_address: Default::default(),
            value: Default::default(),
            data,
            code: None,
            gas_limit: 1_000_000.into(),
            depth,
            is_static: false,
            salt: None,
            original_target_address: None,
            is_ovm_target_candidate: false,
            is_eoa_wrapper_message: false,
            selfdestruct: Default::default(),
        }
    }

    #[tokio::test]
    async fn stop_returns_success() {
        let code = AnalyzedCode::analyze(&[0x00][..]);
        let output = code
            .execute(&mut DummyEei, msg(0, Default::default()), Revision::London)
            .await;
        assert!(output.is_success());
    }

    #[tokio::test]
    async fn push_add_stop() {
        // PUSH1 1, PUSH1 2, ADD, STOP
        let code = AnalyzedCode::analyze(&hex_literal::hex!("600160020100")[..]);
        let output = code
            .execute(&mut DummyEei, msg(0, Default::default()), Revision::London)
            .await;
        assert!(output.is_success());
    }

    #[tokio::test]
    async fn jump_to_non_jumpdest_fails() {
        // PUSH1 3, JUMP, STOP (offset 3 is STOP, not JUMPDEST)
        let code = AnalyzedCode::analyze(&hex_literal::hex!("6003565b00")[..]);
        let output = code
            .execute(&mut DummyEei, msg(0, Default::default()), Revision::London)
            .await;
        assert_eq!(output.status_code, Some(StatusCode::InvalidJump));
    }
}
