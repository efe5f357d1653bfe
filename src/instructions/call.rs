use crate::{
    common::{address_to_u256, u256_to_address, Message, MessageKind, Revision},
    eei::{AccessStatus, Eei},
    instructions::{
        memory::{self, MemoryRegion},
        properties::ADDITIONAL_COLD_ACCOUNT_ACCESS_COST,
    },
    state::ExecutionState,
    StatusCode,
};
use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use std::{cmp::min, collections::BTreeMap};

fn region_bytes(state: &ExecutionState, region: Option<&MemoryRegion>) -> Bytes {
    region
        .map(|MemoryRegion { offset, size }| state.memory[*offset..*offset + size.get()].to_vec())
        .unwrap_or_default()
        .into()
}

/// CALL/CALLCODE/DELEGATECALL/STATICCALL (spec.md §4.1 "_executeCall").
pub(crate) async fn call(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
    kind: MessageKind,
    is_static: bool,
) -> Result<(), StatusCode> {
    let gas = state.stack.pop();
    let dst = u256_to_address(state.stack.pop());
    let value = if is_static || matches!(kind, MessageKind::DelegateCall) {
        U256::zero()
    } else {
        state.stack.pop()
    };
    let has_value = !value.is_zero();
    let input_offset = state.stack.pop();
    let input_size = state.stack.pop();
    let output_offset = state.stack.pop();
    let output_size = state.stack.pop();

    state.stack.push(U256::zero()); // assume failure

    if state.evm_revision >= Revision::Berlin
        && eei
            .access_account(dst)
            .await
            .map_err(|_| StatusCode::InternalError)?
            == AccessStatus::Cold
    {
        state.gas_left -= i64::from(ADDITIONAL_COLD_ACCOUNT_ACCESS_COST);
        if state.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
    }

    let input_region =
        memory::verify_memory_region(state, input_offset, input_size).map_err(|_| StatusCode::OutOfGas)?;
    let output_region =
        memory::verify_memory_region(state, output_offset, output_size).map_err(|_| StatusCode::OutOfGas)?;

    let is_delegate = matches!(kind, MessageKind::DelegateCall);

    let caller = if is_delegate {
        state.message.caller
    } else {
        state.message.execution_address()
    };
    let msg_value = if is_delegate {
        state.message.value
    } else {
        value
    };
    let to = if is_delegate {
        state.message.execution_address()
    } else {
        dst
    };

    let mut cost: i64 = if has_value { 9000 } else { 0 };

    if matches!(kind, MessageKind::Call) {
        if has_value && state.message.is_static {
            return Err(StatusCode::StaticStateChange);
        }

        if (has_value || state.evm_revision < Revision::Spurious)
            && !eei
                .account_exists(dst)
                .await
                .map_err(|_| StatusCode::InternalError)?
        {
            cost += 25000;
        }
    }
    state.gas_left -= cost;
    if state.gas_left < 0 {
        return Err(StatusCode::OutOfGas);
    }

    let mut msg_gas: i64 = state.gas_left;
    if gas < U256::from(i64::MAX) {
        msg_gas = gas.as_u64() as i64;
    }

    if state.evm_revision >= Revision::Tangerine {
        msg_gas = min(msg_gas, state.gas_left - state.gas_left / 64);
    } else if msg_gas > state.gas_left {
        return Err(StatusCode::OutOfGas);
    }

    if has_value {
        msg_gas += 2300;
        state.gas_left += 2300;
    }

    state.return_data = Bytes::new();

    let depth = state.message.depth + 1;
    let self_balance_ok = depth as u32 <= 1024
        && !(has_value
            && eei
                .get_balance(state.message.execution_address())
                .await
                .map_err(|_| StatusCode::InternalError)?
                < value);

    if self_balance_ok {
        let msg = Message {
            kind,
            caller,
            to: Some(to),
            code_address: dst,
            value: msg_value,
            data: region_bytes(state, input_region.as_ref()),
            code: None,
            gas_limit: U256::from(msg_gas.max(0) as u64),
            depth,
            is_static: is_static || state.message.is_static,
            salt: None,
            original_target_address: None,
            is_ovm_target_candidate: false,
            is_eoa_wrapper_message: false,
            selfdestruct: BTreeMap::new(),
        };

        let result = eei.call(&msg).await.map_err(|_| StatusCode::InternalError)?;
        state.return_data = result.output_data.clone();
        *state.stack.get_mut(0) = if result.is_success() {
            U256::one()
        } else {
            U256::zero()
        };

        if let Some(MemoryRegion { offset, size }) = output_region {
            let copy_size = min(size.get(), result.output_data.len());
            if copy_size > 0 {
                state.memory[offset..offset + copy_size]
                    .copy_from_slice(&result.output_data[..copy_size]);
            }
        }

        let gas_used = msg_gas - result.gas_left;
        state.gas_left -= gas_used;
        eei.refund_gas(result.gas_refund);
    }

    Ok(())
}

/// CREATE/CREATE2 (spec.md §4.1 "_executeCreate").
pub(crate) async fn create(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
    create2: bool,
) -> Result<(), StatusCode> {
    if state.message.is_static {
        return Err(StatusCode::StaticStateChange);
    }

    let endowment = state.stack.pop();
    let init_code_offset = state.stack.pop();
    let init_code_size = state.stack.pop();

    let region = memory::verify_memory_region(state, init_code_offset, init_code_size)
        .map_err(|_| StatusCode::OutOfGas)?;

    let (kind, salt) = if create2 {
        let salt = state.stack.pop();

        if let Some(region) = &region {
            let salt_cost = memory::num_words(region.size.get()) * 6;
            state.gas_left -= salt_cost;
            if state.gas_left < 0 {
                return Err(StatusCode::OutOfGas);
            }
        }

        (MessageKind::Create2 { salt: H256(salt.into()) }, Some(H256(salt.into())))
    } else {
        (MessageKind::Create, None)
    };

    state.stack.push(U256::zero());
    state.return_data = Bytes::new();

    let depth = state.message.depth + 1;
    let creator = state.message.execution_address();
    let balance_ok = depth as u32 <= 1024
        && !(!endowment.is_zero()
            && eei
                .get_balance(creator)
                .await
                .map_err(|_| StatusCode::InternalError)?
                < endowment);

    if balance_ok {
        let msg_gas = if state.evm_revision >= Revision::Tangerine {
            state.gas_left - state.gas_left / 64
        } else {
            state.gas_left
        };

        let data = if !init_code_size.is_zero() {
            state.memory[init_code_offset.as_usize()
                ..init_code_offset.as_usize() + init_code_size.as_usize()]
                .to_vec()
                .into()
        } else {
            Bytes::new()
        };

        let msg = Message {
            kind,
            caller: creator,
            to: None,
            code_address: Address::zero(),
            value: endowment,
            data,
            code: None,
            gas_limit: U256::from(msg_gas.max(0) as u64),
            depth,
            is_static: false,
            salt,
            original_target_address: None,
            is_ovm_target_candidate: false,
            is_eoa_wrapper_message: false,
            selfdestruct: BTreeMap::new(),
        };

        let result = eei.call(&msg).await.map_err(|_| StatusCode::InternalError)?;
        state.gas_left -= msg_gas - result.gas_left;
        eei.refund_gas(result.gas_refund);

        state.return_data = result.output_data;
        if result.is_success() {
            *state.stack.get_mut(0) = result
                .create_address
                .map(address_to_u256)
                .expect("successful create returns an address");
        }
    }

    Ok(())
}
