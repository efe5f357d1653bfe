use crate::{
    common::{address_to_u256, Revision},
    eei::{AccessStatus, Eei, TxContext},
    instructions::properties::ADDITIONAL_COLD_ACCOUNT_ACCESS_COST,
    state::ExecutionState,
    StatusCode,
};
use ethereum_types::{H256, U256};

pub(crate) fn address(state: &mut ExecutionState) {
    state
        .stack
        .push(address_to_u256(state.message.execution_address()));
}

pub(crate) fn caller(state: &mut ExecutionState) {
    state.stack.push(address_to_u256(state.message.caller));
}

pub(crate) fn callvalue(state: &mut ExecutionState) {
    state.stack.push(state.message.value);
}

/// Charges the EIP-2929 cold-access surcharge if `address` has not been
/// touched yet this transaction.
async fn charge_cold_account_access(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
    address: ethereum_types::Address,
) -> Result<(), StatusCode> {
    if state.evm_revision >= Revision::Berlin
        && eei
            .access_account(address)
            .await
            .map_err(|_| StatusCode::InternalError)?
            == AccessStatus::Cold
    {
        state.gas_left -= i64::from(ADDITIONAL_COLD_ACCOUNT_ACCESS_COST);
        if state.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
    }
    Ok(())
}

pub(crate) async fn balance(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    let address = crate::common::u256_to_address(state.stack.pop());

    charge_cold_account_access(eei, state, address).await?;

    let balance = eei
        .get_balance(address)
        .await
        .map_err(|_| StatusCode::InternalError)?;
    state.stack.push(balance);

    Ok(())
}

pub(crate) async fn extcodesize(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    let address = crate::common::u256_to_address(state.stack.pop());

    charge_cold_account_access(eei, state, address).await?;

    let code_size = eei
        .get_code_size(address)
        .await
        .map_err(|_| StatusCode::InternalError)?;
    state.stack.push(code_size);

    Ok(())
}

pub(crate) async fn push_txcontext(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
    accessor: fn(&TxContext) -> U256,
) -> Result<(), StatusCode> {
    let tx_context = eei
        .get_tx_context()
        .await
        .map_err(|_| StatusCode::InternalError)?;
    state.stack.push(accessor(&tx_context));
    Ok(())
}

pub(crate) fn origin_accessor(tx_context: &TxContext) -> U256 {
    address_to_u256(tx_context.tx_origin)
}

pub(crate) fn coinbase_accessor(tx_context: &TxContext) -> U256 {
    address_to_u256(tx_context.block_coinbase)
}

pub(crate) fn gasprice_accessor(tx_context: &TxContext) -> U256 {
    tx_context.tx_gas_price
}

pub(crate) fn timestamp_accessor(tx_context: &TxContext) -> U256 {
    tx_context.block_timestamp.into()
}

pub(crate) fn number_accessor(tx_context: &TxContext) -> U256 {
    tx_context.block_number.into()
}

pub(crate) fn gaslimit_accessor(tx_context: &TxContext) -> U256 {
    tx_context.block_gas_limit.into()
}

pub(crate) fn difficulty_accessor(tx_context: &TxContext) -> U256 {
    tx_context.block_difficulty
}

pub(crate) fn chainid_accessor(tx_context: &TxContext) -> U256 {
    tx_context.chain_id
}

pub(crate) fn basefee_accessor(tx_context: &TxContext) -> U256 {
    tx_context.block_base_fee
}

pub(crate) async fn selfbalance(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    let balance = eei
        .get_balance(state.message.execution_address())
        .await
        .map_err(|_| StatusCode::InternalError)?;
    state.stack.push(balance);
    Ok(())
}

pub(crate) async fn blockhash(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    let number = state.stack.pop();

    let upper_bound = eei
        .get_tx_context()
        .await
        .map_err(|_| StatusCode::InternalError)?
        .block_number;
    let lower_bound = upper_bound.saturating_sub(256);

    let mut header = H256::zero();
    if number <= u64::MAX.into() {
        let n = number.as_u64();
        if (lower_bound..upper_bound).contains(&n) {
            header = eei
                .get_block_hash(n)
                .await
                .map_err(|_| StatusCode::InternalError)?;
        }
    }

    state.stack.push(U256::from_big_endian(&header.0));
    Ok(())
}

pub(crate) async fn log(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
    num_topics: usize,
) -> Result<(), StatusCode> {
    use arrayvec::ArrayVec;

    if state.message.is_static {
        return Err(StatusCode::StaticStateChange);
    }

    let offset = state.stack.pop();
    let size = state.stack.pop();

    let region = super::memory::verify_memory_region(state, offset, size)
        .map_err(|_| StatusCode::OutOfGas)?;

    if let Some(region) = &region {
        let cost = region.size.get() as i64 * 8;
        state.gas_left -= cost;
        if state.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
    }

    let mut topics = ArrayVec::<H256, 4>::new();
    for _ in 0..num_topics {
        topics.push(H256(state.stack.pop().into()));
    }

    let data = if let Some(region) = region {
        state.memory[region.offset..region.offset + region.size.get()].to_vec()
    } else {
        Vec::new()
    };

    eei.emit_log(state.message.execution_address(), &data, &topics)
        .await
        .map_err(|_| StatusCode::InternalError)?;

    Ok(())
}

pub(crate) async fn sload(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    use crate::instructions::properties::{COLD_SLOAD_COST, WARM_STORAGE_READ_COST};

    let key = H256(state.stack.pop().into());
    let address = state.message.execution_address();

    if state.evm_revision >= Revision::Berlin
        && eei
            .access_storage(address, key)
            .await
            .map_err(|_| StatusCode::InternalError)?
            == AccessStatus::Cold
    {
        const ADDITIONAL_COLD_SLOAD_COST: u16 = COLD_SLOAD_COST - WARM_STORAGE_READ_COST;
        state.gas_left -= i64::from(ADDITIONAL_COLD_SLOAD_COST);
        if state.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
    }

    let value = eei
        .get_storage(address, key)
        .await
        .map_err(|_| StatusCode::InternalError)?;
    state.stack.push(U256::from_big_endian(value.as_bytes()));

    Ok(())
}

pub(crate) async fn sstore(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    use crate::{
        config::Config,
        eei::StorageStatus,
        instructions::properties::{COLD_SLOAD_COST, WARM_STORAGE_READ_COST},
    };

    if state.message.is_static {
        return Err(StatusCode::StaticStateChange);
    }

    let cfg = Config::from(state.evm_revision);

    // EIP-1706: forbid SSTORE once gas drops to the call stipend.
    if cfg.sstore_revert_under_stipend && state.gas_left <= 2300 {
        return Err(StatusCode::OutOfGas);
    }

    let key = H256(state.stack.pop().into());
    let value = H256(state.stack.pop().into());
    let address = state.message.execution_address();

    let mut cost: i64 = 0;
    if state.evm_revision >= Revision::Berlin
        && eei
            .access_storage(address, key)
            .await
            .map_err(|_| StatusCode::InternalError)?
            == AccessStatus::Cold
    {
        cost = COLD_SLOAD_COST as i64;
    }

    let status = eei
        .set_storage(address, key, value)
        .await
        .map_err(|_| StatusCode::InternalError)?;

    cost += if cfg.sstore_gas_metering {
        match status {
            StorageStatus::Unchanged | StorageStatus::ModifiedAgain => {
                if state.evm_revision >= Revision::Berlin {
                    WARM_STORAGE_READ_COST as i64
                } else {
                    cfg.gas_sload as i64
                }
            }
            StorageStatus::Modified | StorageStatus::Deleted => {
                if state.evm_revision >= Revision::Berlin {
                    cfg.gas_sstore_reset as i64 - COLD_SLOAD_COST as i64
                } else {
                    cfg.gas_sstore_reset as i64
                }
            }
            StorageStatus::Added => cfg.gas_sstore_set as i64,
        }
    } else {
        match status {
            StorageStatus::Added => cfg.gas_sstore_set as i64,
            _ => cfg.gas_sstore_reset as i64,
        }
    };

    state.gas_left -= cost;
    if state.gas_left < 0 {
        return Err(StatusCode::OutOfGas);
    }

    // EIP-2200/1283 net-gas refunds.
    if cfg.sstore_gas_metering {
        match status {
            StorageStatus::Deleted => eei.refund_gas(cfg.refund_sstore_clears),
            StorageStatus::Modified if value.is_zero() => {
                eei.refund_gas(cfg.refund_sstore_clears)
            }
            _ => {}
        }
    } else if status == StorageStatus::Deleted {
        eei.refund_gas(cfg.refund_sstore_clears);
    }

    Ok(())
}

pub(crate) async fn selfdestruct(
    eei: &mut impl Eei,
    state: &mut ExecutionState,
) -> Result<(), StatusCode> {
    use crate::{
        config::Config,
        instructions::properties::COLD_ACCOUNT_ACCESS_COST,
    };

    if state.message.is_static {
        return Err(StatusCode::StaticStateChange);
    }

    let beneficiary = crate::common::u256_to_address(state.stack.pop());
    let cfg = Config::from(state.evm_revision);
    let address = state.message.execution_address();

    if state.evm_revision >= Revision::Berlin
        && eei
            .access_account(beneficiary)
            .await
            .map_err(|_| StatusCode::InternalError)?
            == AccessStatus::Cold
    {
        state.gas_left -= i64::from(COLD_ACCOUNT_ACCESS_COST);
        if state.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
    }

    if state.evm_revision >= Revision::Tangerine
        && (state.evm_revision == Revision::Tangerine
            || !eei
                .get_balance(address)
                .await
                .map_err(|_| StatusCode::InternalError)?
                .is_zero())
        && !eei
            .account_exists(beneficiary)
            .await
            .map_err(|_| StatusCode::InternalError)?
    {
        state.gas_left -= cfg.gas_suicide_new_account as i64;
        if state.gas_left < 0 {
            return Err(StatusCode::OutOfGas);
        }
    }

    if cfg.refund_selfdestruct > 0 {
        eei.refund_gas(cfg.refund_selfdestruct);
    }

    eei.selfdestruct(address, beneficiary)
        .await
        .map_err(|_| StatusCode::InternalError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::common::u256_to_address;
    use ethereum_types::Address;
    use hex_literal::hex;

    #[test]
    fn u256_to_address_conversion() {
        assert_eq!(
            u256_to_address(0x42.into()),
            Address::from(hex!("0000000000000000000000000000000000000042"))
        );
    }
}
