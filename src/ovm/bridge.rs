//! The OVM State-Manager bridge (spec.md §4.5): decodes calls routed to the
//! StateManager pseudo-address by 4-byte selector and serves them directly
//! out of the state view instead of interpreting byte-code.

use crate::state_view::StateView;
use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use sha3::{Digest, Keccak256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("state manager call data too short: {0} bytes")]
    Truncated(usize),
    #[error("unknown state manager selector: {0:02x?}")]
    UnknownSelector([u8; 4]),
    #[error(transparent)]
    State(#[from] anyhow::Error),
}

fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

fn read_address(word: &[u8]) -> Address {
    Address::from_slice(&word[12..32])
}

fn read_h256(word: &[u8]) -> H256 {
    H256::from_slice(&word[0..32])
}

fn encode_address(address: Address) -> Bytes {
    let mut out = [0u8; 32];
    out[12..32].copy_from_slice(address.as_bytes());
    Bytes::copy_from_slice(&out)
}

fn encode_h256(value: H256) -> Bytes {
    Bytes::copy_from_slice(value.as_bytes())
}

fn encode_u256(value: U256) -> Bytes {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    Bytes::copy_from_slice(&out)
}

/// ABI-encodes a single dynamic `bytes` return value: 32-byte offset (always
/// `0x20`), 32-byte length, then the data right-padded to a word boundary.
fn encode_bytes(data: &[u8]) -> Bytes {
    let mut out = Vec::with_capacity(64 + data.len() + 31);
    out.extend_from_slice(&encode_u256(U256::from(32)));
    out.extend_from_slice(&encode_u256(U256::from(data.len())));
    out.extend_from_slice(data);
    let padding = (32 - data.len() % 32) % 32;
    out.extend(std::iter::repeat(0u8).take(padding));
    out.into()
}

/// Handles one call to the StateManager pseudo-address. `data` is the full
/// call data including the 4-byte selector.
pub async fn handle_call(
    state: &mut impl StateView,
    data: &[u8],
) -> Result<Bytes, BridgeError> {
    if data.len() < 4 {
        return Err(BridgeError::Truncated(data.len()));
    }
    let (sel, args) = data.split_at(4);

    if sel == selector("setStorage(address,bytes32,bytes32)") {
        let addr = read_address(&args[0..32]);
        let slot = read_h256(&args[32..64]);
        let value = read_h256(&args[64..96]);
        state.put_storage(addr, slot, value).await?;
        return Ok(Bytes::new());
    }

    if sel == selector("getStorage(address,bytes32)")
        || sel == selector("getStorageView(address,bytes32)")
    {
        let addr = read_address(&args[0..32]);
        let slot = read_h256(&args[32..64]);
        let value = state.get_storage(addr, slot).await?;
        return Ok(encode_h256(value));
    }

    if sel == selector("getOvmContractNonce(address)") {
        let addr = read_address(&args[0..32]);
        let account = state.get_account(addr).await?;
        return Ok(encode_u256(account.nonce));
    }

    if sel == selector("getCodeContractBytecode(address)") {
        let addr = read_address(&args[0..32]);
        let account = state.get_account(addr).await?;
        let code = state.get_code(account.code_hash).await?;
        return Ok(encode_bytes(&code));
    }

    if sel == selector("incrementOvmContractNonce(address)") {
        let addr = read_address(&args[0..32]);
        let mut account = state.get_account(addr).await?;
        account.nonce += U256::one();
        state.put_account(addr, account).await?;
        return Ok(Bytes::new());
    }

    if sel == selector("registerCreatedContract(address)") {
        return Ok(Bytes::new());
    }

    if sel == selector("associateCodeContract(address,address)") {
        return Ok(Bytes::new());
    }

    if sel == selector("getCodeContractAddressFromOvmAddress(address)") {
        let addr = read_address(&args[0..32]);
        return Ok(encode_address(addr));
    }

    Err(BridgeError::UnknownSelector([sel[0], sel[1], sel[2], sel[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::mock::InMemoryStateView;

    fn word_address(addr: Address) -> [u8; 32] {
        let mut w = [0u8; 32];
        w[12..32].copy_from_slice(addr.as_bytes());
        w
    }

    #[tokio::test]
    async fn set_then_get_storage_round_trips() {
        let mut state = InMemoryStateView::default();
        let addr = Address::repeat_byte(0x11);
        let slot = H256::repeat_byte(0x22);
        let value = H256::repeat_byte(0x33);

        let mut set_data = selector("setStorage(address,bytes32,bytes32)").to_vec();
        set_data.extend_from_slice(&word_address(addr));
        set_data.extend_from_slice(slot.as_bytes());
        set_data.extend_from_slice(value.as_bytes());
        handle_call(&mut state, &set_data).await.unwrap();

        let mut get_data = selector("getStorage(address,bytes32)").to_vec();
        get_data.extend_from_slice(&word_address(addr));
        get_data.extend_from_slice(slot.as_bytes());
        let result = handle_call(&mut state, &get_data).await.unwrap();
        assert_eq!(result.as_ref(), value.as_bytes());
    }

    #[tokio::test]
    async fn unknown_selector_is_an_error() {
        let mut state = InMemoryStateView::default();
        let err = handle_call(&mut state, &[0xff, 0xff, 0xff, 0xff])
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::UnknownSelector(_)));
    }
}
