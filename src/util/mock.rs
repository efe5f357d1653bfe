//! An in-memory [`StateView`] backed by plain hash maps (spec.md §6: "a
//! minimal in-memory `StateView`, for tests only"). Checkpoints are
//! implemented by snapshotting the whole map set rather than diffing, which
//! is simple and correct as long as `checkpoint`/`commit`/`revert` nest
//! properly (spec.md §8 invariant) — good enough for a test double, not for
//! a production trie-backed implementation.

use crate::{
    common::Account,
    state_view::{CheckpointId, StateView},
};
use async_trait::async_trait;
use bytes::Bytes;
use ethereum_types::{Address, H256};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;

#[derive(Clone, Default)]
pub struct InMemoryStateView {
    accounts: HashMap<Address, Account>,
    code: HashMap<H256, Bytes>,
    storage: HashMap<(Address, H256), H256>,
    checkpoints: Vec<(
        HashMap<Address, Account>,
        HashMap<H256, Bytes>,
        HashMap<(Address, H256), H256>,
    )>,
}

#[async_trait]
impl StateView for InMemoryStateView {
    async fn get_account(&self, address: Address) -> anyhow::Result<Account> {
        Ok(self.accounts.get(&address).copied().unwrap_or_default())
    }

    async fn put_account(&mut self, address: Address, account: Account) -> anyhow::Result<()> {
        self.accounts.insert(address, account);
        Ok(())
    }

    async fn get_code(&self, code_hash: H256) -> anyhow::Result<Bytes> {
        Ok(self.code.get(&code_hash).cloned().unwrap_or_default())
    }

    async fn put_code(&mut self, code: Bytes) -> anyhow::Result<H256> {
        let hash = H256::from_slice(&Keccak256::digest(&code));
        self.code.entry(hash).or_insert(code);
        Ok(hash)
    }

    async fn get_storage(&self, address: Address, key: H256) -> anyhow::Result<H256> {
        Ok(self
            .storage
            .get(&(address, key))
            .copied()
            .unwrap_or_default())
    }

    async fn put_storage(
        &mut self,
        address: Address,
        key: H256,
        value: H256,
    ) -> anyhow::Result<()> {
        if value.is_zero() {
            self.storage.remove(&(address, key));
        } else {
            self.storage.insert((address, key), value);
        }
        Ok(())
    }

    async fn clear_storage(&mut self, address: Address) -> anyhow::Result<()> {
        self.storage.retain(|(a, _), _| *a != address);
        Ok(())
    }

    fn checkpoint(&mut self) -> CheckpointId {
        let id = CheckpointId(self.checkpoints.len() as u64);
        self.checkpoints
            .push((self.accounts.clone(), self.code.clone(), self.storage.clone()));
        id
    }

    fn commit(&mut self, _checkpoint: CheckpointId) {
        self.checkpoints.pop();
    }

    fn revert(&mut self, _checkpoint: CheckpointId) {
        if let Some((accounts, code, storage)) = self.checkpoints.pop() {
            self.accounts = accounts;
            self.code = code;
            self.storage = storage;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revert_undoes_account_changes() {
        let mut state = InMemoryStateView::default();
        let addr = Address::repeat_byte(1);

        let checkpoint = state.checkpoint();
        state
            .put_account(
                addr,
                Account {
                    nonce: 1.into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        state.revert(checkpoint);

        assert_eq!(state.get_account(addr).await.unwrap(), Account::default());
    }

    #[tokio::test]
    async fn commit_keeps_account_changes() {
        let mut state = InMemoryStateView::default();
        let addr = Address::repeat_byte(1);

        let checkpoint = state.checkpoint();
        state
            .put_account(
                addr,
                Account {
                    nonce: 1.into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        state.commit(checkpoint);

        assert_eq!(state.get_account(addr).await.unwrap().nonce, 1.into());
    }

    #[tokio::test]
    async fn clear_storage_drops_only_target_address() {
        let mut state = InMemoryStateView::default();
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        let slot = H256::repeat_byte(7);

        state.put_storage(a, slot, H256::repeat_byte(9)).await.unwrap();
        state.put_storage(b, slot, H256::repeat_byte(9)).await.unwrap();
        state.clear_storage(a).await.unwrap();

        assert_eq!(state.get_storage(a, slot).await.unwrap(), H256::zero());
        assert_eq!(state.get_storage(b, slot).await.unwrap(), H256::repeat_byte(9));
    }
}
