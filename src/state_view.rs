//! The state-access collaborator (spec.md §6 "StateView"): checkpointed
//! account/storage/code storage, external to the executor itself so a real
//! implementation can back it with a merkle trie, a database, or (in tests)
//! a plain in-memory map.

use crate::common::Account;
use async_trait::async_trait;
use bytes::Bytes;
use ethereum_types::{Address, H256};

/// Opaque checkpoint handle returned by [`StateView::checkpoint`]. Only
/// meaningful as an argument to `commit`/`revert` on the same `StateView`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckpointId(pub u64);

#[async_trait]
pub trait StateView {
    async fn get_account(&self, address: Address) -> anyhow::Result<Account>;
    async fn put_account(&mut self, address: Address, account: Account) -> anyhow::Result<()>;

    async fn get_code(&self, code_hash: H256) -> anyhow::Result<Bytes>;
    async fn put_code(&mut self, code: Bytes) -> anyhow::Result<H256>;

    async fn get_storage(&self, address: Address, key: H256) -> anyhow::Result<H256>;
    async fn put_storage(&mut self, address: Address, key: H256, value: H256) -> anyhow::Result<()>;
    /// `clearContractStorage` (spec.md §6): drops every slot for `address`,
    /// used by CREATE/CREATE2 to wipe a prospective account's storage before
    /// running its init code (spec.md §4.1 "_executeCreate").
    async fn clear_storage(&mut self, address: Address) -> anyhow::Result<()>;

    /// Opens a checkpoint (spec.md §4.1 "checkpoint/commit/revert"). Every
    /// `checkpoint()` must be balanced by exactly one `commit()` or
    /// `revert()` (spec.md §8 invariant).
    fn checkpoint(&mut self) -> CheckpointId;
    fn commit(&mut self, checkpoint: CheckpointId);
    fn revert(&mut self, checkpoint: CheckpointId);
}
