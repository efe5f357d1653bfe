use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use std::collections::BTreeMap;
use strum_macros::Display;

/// EVM/OVM hard-fork revision.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord)]
pub enum Revision {
    /// The Frontier revision. The one Ethereum launched with.
    Frontier = 0,
    /// [The Homestead revision.](https://eips.ethereum.org/EIPS/eip-606)
    Homestead = 1,
    /// [The Tangerine Whistle revision.](https://eips.ethereum.org/EIPS/eip-608)
    Tangerine = 2,
    /// [The Spurious Dragon revision.](https://eips.ethereum.org/EIPS/eip-607)
    Spurious = 3,
    /// [The Byzantium revision.](https://eips.ethereum.org/EIPS/eip-609)
    Byzantium = 4,
    /// [The Constantinople revision.](https://eips.ethereum.org/EIPS/eip-1013)
    Constantinople = 5,
    /// [The Petersburg revision.](https://eips.ethereum.org/EIPS/eip-1716)
    Petersburg = 6,
    /// [The Istanbul revision.](https://eips.ethereum.org/EIPS/eip-1679)
    Istanbul = 7,
    /// [The Berlin revision.](https://github.com/ethereum/eth1.0-specs/blob/master/network-upgrades/mainnet-upgrades/berlin.md)
    Berlin = 8,
    /// [The London revision.](https://github.com/ethereum/eth1.0-specs/blob/master/network-upgrades/mainnet-upgrades/london.md)
    London = 9,
}

impl Revision {
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Self::Frontier,
            Self::Homestead,
            Self::Tangerine,
            Self::Spurious,
            Self::Byzantium,
            Self::Constantinople,
            Self::Petersburg,
            Self::Istanbul,
            Self::Berlin,
            Self::London,
        ]
        .into_iter()
    }

    pub const fn len() -> usize {
        Self::London as usize + 1
    }

    pub const fn latest() -> Self {
        Self::London
    }

    /// `gteHardfork` from the fork-configuration external interface (spec.md §6).
    pub fn gte_hardfork(self, other: Self) -> bool {
        self >= other
    }
}

/// Typed failure surfaced on `exceptionError` (spec.md §7). `STOP` is
/// deliberately absent: it is a clean loop termination, not an error
/// (spec.md §4.2 "Termination").
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum StatusCode {
    /// REVERT opcode: remaining gas is returned to the caller.
    #[strum(serialize = "revert")]
    Revert,
    #[strum(serialize = "out of gas")]
    OutOfGas,
    #[strum(serialize = "invalid instruction")]
    InvalidOpcode,
    #[strum(serialize = "stack underflow")]
    StackUnderflow,
    #[strum(serialize = "stack overflow")]
    StackOverflow,
    #[strum(serialize = "bad jump destination")]
    InvalidJump,
    #[strum(serialize = "static mode violation")]
    StaticStateChange,
    #[strum(serialize = "create collision")]
    CreateCollision,
    #[strum(serialize = "value overflow")]
    ValueOverflow,
    #[strum(serialize = "internal error")]
    InternalError,
    #[strum(serialize = "bls12-381 invalid input length")]
    Bls12381InvalidInputLength,
    #[strum(serialize = "bls12-381 point not on curve")]
    Bls12381PointNotOnCurve,
    #[strum(serialize = "ovm error")]
    OvmError,
}

/// The kind of call-like or create-like instruction a [`Message`] originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Call,
    DelegateCall,
    CallCode,
    Create,
    Create2 { salt: H256 },
}

/// One unit of execution (spec.md §3 "Message").
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub caller: Address,
    /// Absent iff this message creates a contract.
    pub to: Option<Address>,
    /// Address whose code is being executed. Differs from `to` under
    /// DELEGATECALL/CALLCODE, where the callee's code runs but storage,
    /// balance and identity stay with the caller's own frame (`to`).
    pub code_address: Address,
    pub value: U256,
    pub data: Bytes,
    /// Lazily loaded; `None` until code loading (spec.md §4.4) resolves it.
    pub code: Option<Bytes>,
    pub gas_limit: U256,
    pub depth: u32,
    pub is_static: bool,
    pub salt: Option<H256>,
    /// Set by the OVM entry rewrite (spec.md §4.1 step 2) once this message
    /// has been re-targeted at the Execution Manager.
    pub original_target_address: Option<Address>,
    /// Explicit sentinel marking this message as a candidate for the
    /// target-message latch, set by the entry rewrite (spec.md §9 — replaces
    /// the original's ad hoc depth/caller heuristic with an explicit flag).
    pub is_ovm_target_candidate: bool,
    /// Explicit sentinel marking this message as the depth-1 EOA wrapper
    /// invocation, consulted by the deploy-exception heuristic (spec.md §4.1
    /// step 7).
    pub is_eoa_wrapper_message: bool,
    /// Addresses marked for destruction as observed at the time this message
    /// was dispatched (spec.md §3 "Message").
    pub selfdestruct: BTreeMap<Address, Address>,
}

impl Message {
    /// Gas limit clamped into the interpreter's native `i64` gas counter. The
    /// boundary conversion happens exactly once, here, per spec.md §9 ("never
    /// mix [U256] with native integers at boundaries").
    pub fn gas_limit_i64(&self) -> i64 {
        if self.gas_limit > U256::from(i64::MAX) {
            i64::MAX
        } else {
            self.gas_limit.as_u64() as i64
        }
    }

    pub fn is_delegate_or_callcode(&self) -> bool {
        matches!(self.kind, MessageKind::DelegateCall | MessageKind::CallCode)
    }

    pub fn is_create(&self) -> bool {
        matches!(self.kind, MessageKind::Create | MessageKind::Create2 { .. })
    }

    /// The address whose storage/balance/identity this message executes
    /// against. By the time the interpreter runs, `to` has always been
    /// resolved (CREATE/CREATE2 compute the new contract's address before
    /// code starts running).
    pub fn execution_address(&self) -> Address {
        self.to.expect("execution address resolved before interpretation")
    }
}

/// `keccak256("")`, the code hash of an account with no code.
pub const EMPTY_CODE_HASH: H256 = H256([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// On-chain account (spec.md §3 "Account"). Balance and nonce are
/// big-integer valued per spec, unlike real Ethereum's `u64` nonce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Account {
    pub nonce: U256,
    pub balance: U256,
    pub code_hash: H256,
    pub storage_root: H256,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            nonce: U256::zero(),
            balance: U256::zero(),
            code_hash: EMPTY_CODE_HASH,
            storage_root: H256::zero(),
        }
    }
}

impl Account {
    /// `isAccountEmpty` per EIP-161: no balance, no nonce, no code.
    pub fn is_empty(&self) -> bool {
        self.nonce.is_zero() && self.balance.is_zero() && self.code_hash == EMPTY_CODE_HASH
    }
}

/// One emitted LOG0..LOG4 event (spec.md §3 "EEI state" `result.logs`).
#[derive(Clone, Debug, PartialEq)]
pub struct Log {
    pub address: Address,
    pub topics: arrayvec::ArrayVec<H256, 4>,
    pub data: Bytes,
}

/// Output of a child `Eei::call` invocation (also used as the executor's
/// own top-level result, spec.md §4.1 "Result").
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Absent on success.
    pub status_code: Option<StatusCode>,
    pub gas_left: i64,
    pub gas_refund: i64,
    pub output_data: Bytes,
    pub create_address: Option<Address>,
    /// Cleared on failure (spec.md §4.7). Populated by the executor, not the
    /// interpreter (see DESIGN.md — mirrors the `gas_refund` deferral).
    pub logs: Vec<Log>,
    /// Addresses marked for destruction, keyed by beneficiary (spec.md §3
    /// "EEI state" `result.selfdestruct`). Cleared on failure like `logs`.
    pub selfdestruct: BTreeMap<Address, Address>,
}

impl Output {
    pub fn is_success(&self) -> bool {
        self.status_code.is_none()
    }
}

#[inline]
pub(crate) fn u256_to_address(v: U256) -> Address {
    H256(v.into()).into()
}

#[inline]
pub(crate) fn address_to_u256(v: Address) -> U256 {
    U256::from_big_endian(&v.0)
}
