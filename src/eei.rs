//! The Execution Environment Interface (spec.md §4.3): the only surface
//! through which an opcode handler reaches the host. Implemented by
//! [`crate::executor::Executor`].

use crate::{
    common::{Message, Output},
    opcode::OpCode,
    state::ExecutionState,
};
use anyhow::bail;
use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};

/// State access status (EIP-2929).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AccessStatus {
    #[default]
    Cold,
    Warm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageStatus {
    /// 0 -> 0 or X -> X.
    Unchanged,
    /// X -> Y, where X was the value at the start of this transaction.
    Modified,
    /// X -> Y -> Z within the same transaction.
    ModifiedAgain,
    /// 0 -> X.
    Added,
    /// X -> 0.
    Deleted,
}

/// Transaction and block context (spec.md §3 "env").
#[derive(Clone, Debug)]
pub struct TxContext {
    pub tx_gas_price: U256,
    pub tx_origin: Address,
    pub block_coinbase: Address,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub block_gas_limit: u64,
    pub block_difficulty: U256,
    pub chain_id: U256,
    pub block_base_fee: U256,
}

/// The EEI (spec.md §4.3). Asynchronous so a real `StateView` can do network
/// or disk I/O; the interpreter drives it with direct `.await`s rather than a
/// resumable continuation (see DESIGN.md).
#[async_trait]
pub trait Eei {
    /// Gas.
    fn gas_left(&self) -> i64;
    fn use_gas(&mut self, amount: i64) -> Result<(), crate::StatusCode>;
    /// Adds to the per-transaction refund counter (e.g. SSTORE clearing a slot).
    fn refund_gas(&mut self, amount: i64);
    /// Subtracts from the per-transaction refund counter, floored at zero
    /// (spec.md §8 invariant: "Refund counter is strictly non-negative").
    fn sub_refund(&mut self, amount: i64);

    /// Account.
    async fn account_exists(&self, address: Address) -> anyhow::Result<bool>;
    /// `isAccountEmpty`, fork-aware: pre-Spurious-Dragon forks never report an
    /// account as "empty" for gas-surcharge purposes (EIP-161 did not exist yet).
    async fn is_account_empty(&self, address: Address) -> anyhow::Result<bool>;
    async fn get_balance(&self, address: Address) -> anyhow::Result<U256>;
    async fn get_code_size(&self, address: Address) -> anyhow::Result<U256>;
    async fn get_code_hash(&self, address: Address) -> anyhow::Result<H256>;
    async fn copy_code(
        &self,
        address: Address,
        offset: usize,
        buffer: &mut [u8],
    ) -> anyhow::Result<usize>;

    /// Storage.
    async fn get_storage(&self, address: Address, key: H256) -> anyhow::Result<H256>;
    async fn set_storage(
        &mut self,
        address: Address,
        key: H256,
        value: H256,
    ) -> anyhow::Result<StorageStatus>;

    /// Call/Create: recursively invokes the executor with a child `Message`.
    /// `msg.kind` discriminates CALL/DELEGATECALL/CALLCODE from CREATE/CREATE2.
    async fn call(&mut self, msg: &Message) -> anyhow::Result<Output>;

    /// Logging.
    async fn emit_log(
        &mut self,
        address: Address,
        data: &[u8],
        topics: &[H256],
    ) -> anyhow::Result<()>;

    /// Self-destruct: records the beneficiary and credits its balance.
    async fn selfdestruct(&mut self, address: Address, beneficiary: Address) -> anyhow::Result<()>;

    /// Environment.
    async fn get_tx_context(&self) -> anyhow::Result<TxContext>;
    async fn get_block_hash(&self, block_number: u64) -> anyhow::Result<H256>;

    /// EIP-2929 warm/cold access tracking.
    async fn access_account(&mut self, address: Address) -> anyhow::Result<AccessStatus>;
    async fn access_storage(&mut self, address: Address, key: H256)
        -> anyhow::Result<AccessStatus>;

    /// Per-instruction observer hook (spec.md §4.2 step 2, §6 "step" event).
    /// Folded into the EEI itself, rather than threaded as a second
    /// `&mut impl Observer` parameter throughout the step loop, since both
    /// ultimately borrow the same executor state (see DESIGN.md). Default
    /// no-op.
    fn on_step(&mut self, _pc: usize, _op: OpCode, _state: &ExecutionState) {}
}

/// An `Eei` that supports no operations; useful as a placeholder in tests
/// that never reach a suspending instruction.
pub struct DummyEei;

#[async_trait]
impl Eei for DummyEei {
    fn gas_left(&self) -> i64 {
        0
    }

    fn use_gas(&mut self, _: i64) -> Result<(), crate::StatusCode> {
        Err(crate::StatusCode::InternalError)
    }

    fn refund_gas(&mut self, _: i64) {}
    fn sub_refund(&mut self, _: i64) {}

    async fn account_exists(&self, _: Address) -> anyhow::Result<bool> {
        bail!("unsupported")
    }

    async fn is_account_empty(&self, _: Address) -> anyhow::Result<bool> {
        bail!("unsupported")
    }

    async fn get_storage(&self, _: Address, _: H256) -> anyhow::Result<H256> {
        bail!("unsupported")
    }

    async fn set_storage(&mut self, _: Address, _: H256, _: H256) -> anyhow::Result<StorageStatus> {
        bail!("unsupported")
    }

    async fn get_balance(&self, _: Address) -> anyhow::Result<U256> {
        bail!("unsupported")
    }

    async fn get_code_size(&self, _: Address) -> anyhow::Result<U256> {
        bail!("unsupported")
    }

    async fn get_code_hash(&self, _: Address) -> anyhow::Result<H256> {
        bail!("unsupported")
    }

    async fn copy_code(&self, _: Address, _: usize, _: &mut [u8]) -> anyhow::Result<usize> {
        bail!("unsupported")
    }

    async fn selfdestruct(&mut self, _: Address, _: Address) -> anyhow::Result<()> {
        bail!("unsupported")
    }

    async fn call(&mut self, _: &Message) -> anyhow::Result<Output> {
        bail!("unsupported")
    }

    async fn get_tx_context(&self) -> anyhow::Result<TxContext> {
        bail!("unsupported")
    }

    async fn get_block_hash(&self, _: u64) -> anyhow::Result<H256> {
        bail!("unsupported")
    }

    async fn emit_log(&mut self, _: Address, _: &[u8], _: &[H256]) -> anyhow::Result<()> {
        bail!("unsupported")
    }

    async fn access_account(&mut self, _: Address) -> anyhow::Result<AccessStatus> {
        bail!("unsupported")
    }

    async fn access_storage(&mut self, _: Address, _: H256) -> anyhow::Result<AccessStatus> {
        bail!("unsupported")
    }
}
