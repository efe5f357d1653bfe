//! The EVM executor (spec.md §4.1): the recursive message dispatcher that
//! distinguishes calls from creates, handles value transfer, checkpoints
//! state, loads code or precompiles, drives the interpreter, and reconciles
//! OVM-specific entry/exit rewriting. Implements [`crate::eei::Eei`] so that
//! `CALL`/`CREATE` handlers recurse straight back into it (spec.md §9 —
//! "a single owning context struct that the executor borrows").

use crate::{
    common::{
        address_to_u256, u256_to_address, Account, Log, Message, MessageKind, Output, Revision,
        StatusCode, EMPTY_CODE_HASH,
    },
    config::Config,
    eei::{AccessStatus, Eei, StorageStatus, TxContext},
    interpreter::AnalyzedCode,
    observer::Observer,
    opcode::OpCode,
    ovm::{
        bridge,
        contracts::{ContractKind, ContractRegistry},
    },
    precompiles::PrecompileRegistry,
    state::ExecutionState,
    state_view::StateView,
};
use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use sha3::{Digest, Keccak256};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Storage slot the Execution Manager tracks the next OVM contract address
/// under (spec.md §4.6 "Under the OVM entry path ... read from the
/// Execution Manager's storage slot 0x…0f").
fn em_next_address_slot() -> H256 {
    H256::from_low_u64_be(0x0f)
}

fn empty_output(gas_left: i64, status_code: Option<StatusCode>) -> Output {
    Output {
        status_code,
        gas_left,
        gas_refund: 0,
        output_data: Bytes::new(),
        create_address: None,
        logs: Vec::new(),
        selfdestruct: Default::default(),
    }
}

/// The recursive message-execution engine. Owns the state view, the fork
/// configuration, the OVM pseudo-contract registry, the precompile registry
/// and every per-transaction accumulator named in spec.md §3 (refund
/// counter, OVM entry/exit bookkeeping). One instance drives exactly one
/// outer transaction (spec.md §5 "one outstanding transaction per executor
/// instance").
pub struct Executor<SV, CR, OB> {
    state_view: SV,
    contracts: CR,
    precompiles: PrecompileRegistry,
    observer: OB,
    revision: Revision,
    tx_context: TxContext,
    block_hashes: BTreeMap<u64, H256>,

    /// Per-transaction gas refund accumulator (spec.md §3 "Refund counter").
    refund: i64,
    /// Snapshot of `refund` taken on entry to each message, restored on
    /// failure (spec.md §8 invariant).
    refund_checkpoints: Vec<i64>,
    /// One frame per live message, accumulating logs emitted directly by it
    /// plus those spliced up from successful children (spec.md §5
    /// "Ordering"). Popped and discarded on failure, spliced into the parent
    /// frame on success.
    log_frames: Vec<Vec<Log>>,
    selfdestruct_frames: Vec<BTreeMap<Address, Address>>,

    /// EIP-2929 warm/cold tracking, transaction-scoped.
    warm_accounts: HashSet<Address>,
    warm_storage: HashSet<(Address, H256)>,
    /// EIP-2200 original-value cache, transaction-scoped.
    original_storage: HashMap<(Address, H256), H256>,

    /// Set once the OVM entry rewrite has run (spec.md §4.1 step 2); governs
    /// which address-generation strategy CREATE/CREATE2 use (spec.md §4.6).
    ovm_active: bool,
    /// Cached `gasLeft` of the most recently stepped frame, maintained via
    /// `on_step` (spec.md §4.3 EEI gas surface; see DESIGN.md).
    gas_left_cache: i64,

    /// The first message matching the target predicate (spec.md §3
    /// "targetMessage", §9 "explicit sentinel").
    target_message: Option<Message>,
    target_message_result: Option<Output>,
    /// The most recent depth-1 non-StateManager message result (spec.md §3
    /// "accountMessageResult").
    account_message_result: Option<Output>,
    initial_em_state: Option<Account>,
    initial_sm_state: Option<Account>,
}

impl<SV, CR, OB> Executor<SV, CR, OB>
where
    SV: StateView + Send + Sync,
    CR: ContractRegistry + Send + Sync,
    OB: Observer + Send + Sync,
{
    pub fn new(
        state_view: SV,
        contracts: CR,
        precompiles: PrecompileRegistry,
        observer: OB,
        revision: Revision,
        tx_context: TxContext,
    ) -> Self {
        Self {
            state_view,
            contracts,
            precompiles,
            observer,
            revision,
            tx_context,
            block_hashes: BTreeMap::new(),
            refund: 0,
            refund_checkpoints: Vec::new(),
            log_frames: Vec::new(),
            selfdestruct_frames: Vec::new(),
            warm_accounts: HashSet::new(),
            warm_storage: HashSet::new(),
            original_storage: HashMap::new(),
            ovm_active: false,
            gas_left_cache: 0,
            target_message: None,
            target_message_result: None,
            account_message_result: None,
            initial_em_state: None,
            initial_sm_state: None,
        }
    }

    /// Records a block hash a future `BLOCKHASH` opcode may observe. The
    /// block-hash history is supplied by the embedder (spec.md §1 "the
    /// underlying state/trie store ... out of scope").
    pub fn set_block_hash(&mut self, number: u64, hash: H256) {
        self.block_hashes.insert(number, hash);
    }

    pub fn state_view(&self) -> &SV {
        &self.state_view
    }

    pub fn state_view_mut(&mut self) -> &mut SV {
        &mut self.state_view
    }

    pub fn into_state_view(self) -> SV {
        self.state_view
    }

    /// Public entry point (spec.md §4.1 "executeMessage"). Call once per
    /// external transaction with a depth-0 message; recursive children are
    /// driven internally through [`Eei::call`].
    pub async fn execute_message(&mut self, message: Message) -> Output {
        self.execute_message_impl(message).await
    }

    async fn load_code(&mut self, address: Address) -> Bytes {
        let account = match self.state_view.get_account(address).await {
            Ok(account) => account,
            Err(_) => return Bytes::new(),
        };
        if account.code_hash == EMPTY_CODE_HASH {
            return Bytes::new();
        }
        self.state_view
            .get_code(account.code_hash)
            .await
            .unwrap_or_default()
    }

    /// spec.md §4.1 step 2: "OVM entry rewrite". Installs the mock
    /// ECDSA-wrapper bytecode at an empty-code caller, snapshots the
    /// Execution Manager / State Manager accounts, and re-targets the
    /// message at the Execution Manager.
    async fn apply_ovm_entry_rewrite(&mut self, message: &mut Message) {
        self.ovm_active = true;

        let em = self.contracts.execution_manager_address();
        let sm = self.contracts.state_manager_address();
        self.initial_em_state = self.state_view.get_account(em).await.ok();
        self.initial_sm_state = self.state_view.get_account(sm).await.ok();

        if let Ok(mut caller_account) = self.state_view.get_account(message.caller).await {
            if caller_account.code_hash == EMPTY_CODE_HASH {
                if let Ok(code_hash) = self
                    .state_view
                    .put_code(self.contracts.mock_ecdsa_account_code().clone())
                    .await
                {
                    caller_account.code_hash = code_hash;
                    let _ = self
                        .state_view
                        .put_account(message.caller, caller_account)
                        .await;
                }
            }
        }

        message.original_target_address = message.to;
        message.code_address = em;
        message.to = Some(em);
        message.data = encode_em_entry(message);
    }

    /// spec.md §4.1 step 3 + §9 "explicit sentinel": a message is the OVM
    /// target if it is a direct call issued by the Execution Manager's own
    /// code to something other than the State Manager bridge. Computed once
    /// here rather than re-derived ad hoc at reconciliation time.
    fn classify_ovm_role(&self, message: &mut Message, is_entry: bool) {
        let em = self.contracts.execution_manager_address();
        let sm = self.contracts.state_manager_address();

        message.is_ovm_target_candidate =
            !is_entry && message.caller == em && message.to != Some(sm);
        message.is_eoa_wrapper_message = message.depth == 1 && message.to != Some(sm);
    }

    /// spec.md §4.1 step 7: OVM exit reconciliation, run only for the
    /// depth-0 message.
    fn reconcile_ovm_exit(&mut self) -> Output {
        let em = self.contracts.execution_manager_address();
        let target_result = self.target_message_result.take();
        self.target_message = None;
        let account_result = self.account_message_result.take();

        match target_result {
            Some(mut result) => {
                result.logs.retain(|log| log.address != em);

                if result.status_code == Some(StatusCode::Revert) && result.output_data.len() >= 160
                {
                    result.output_data = result.output_data.slice(160..);
                }

                let deploy_exception = account_result
                    .as_ref()
                    .map(|account_result| {
                        account_result.is_success()
                            && account_result.output_data.len() == 32
                            && account_result.output_data.iter().all(|&b| b == 0)
                            && result.is_success()
                    })
                    .unwrap_or(false);

                if deploy_exception {
                    result.status_code = Some(StatusCode::Revert);
                }

                result
            }
            None => empty_output(0, Some(StatusCode::OvmError)),
        }
    }

    /// spec.md §4.6 "Address generation".
    async fn generate_create_address(&mut self, message: &Message, init_code: &[u8]) -> Address {
        if self.ovm_active {
            let em = self.contracts.execution_manager_address();
            let word = self
                .state_view
                .get_storage(em, em_next_address_slot())
                .await
                .unwrap_or_default();
            return Address::from_slice(&word.as_bytes()[12..32]);
        }

        if let Some(salt) = message.salt {
            let mut buf = [0xff_u8; 21];
            buf[1..21].copy_from_slice(message.caller.as_bytes());
            let code_hash = Keccak256::digest(init_code);
            let mut preimage = Vec::with_capacity(21 + 32 + 32);
            preimage.extend_from_slice(&buf);
            preimage.extend_from_slice(salt.as_bytes());
            preimage.extend_from_slice(&code_hash);
            Address::from_slice(&Keccak256::digest(&preimage)[12..32])
        } else {
            let account = self
                .state_view
                .get_account(message.caller)
                .await
                .unwrap_or_default();
            // The nonce has not yet been bumped for this creation (spec.md
            // §4.6 "with the appropriate nonce adjustment for the pre-bump
            // state").
            let mut nonce_bytes = [0u8; 32];
            account.nonce.to_big_endian(&mut nonce_bytes);
            let first_nonzero = nonce_bytes.iter().position(|&b| b != 0).unwrap_or(32);

            let mut stream = rlp::RlpStream::new_list(2);
            stream.append(&message.caller.as_bytes().to_vec());
            stream.append(&nonce_bytes[first_nonzero..].to_vec());
            Address::from_slice(&Keccak256::digest(stream.out())[12..32])
        }
    }

    /// spec.md §4.1 "Call execution (`_executeCall`)".
    async fn execute_call(&mut self, message: Message) -> Output {
        let gas_limit = message.gas_limit_i64();
        let mut credit_error = None;

        if !message.is_delegate_or_callcode() {
            if let Ok(mut caller_account) = self.state_view.get_account(message.caller).await {
                caller_account.balance = caller_account.balance.saturating_sub(message.value);
                let _ = self
                    .state_view
                    .put_account(message.caller, caller_account)
                    .await;
            }

            let to = message.execution_address();
            match self.state_view.get_account(to).await {
                Ok(mut account) => match account.balance.checked_add(message.value) {
                    Some(new_balance) => {
                        account.balance = new_balance;
                        let _ = self.state_view.put_account(to, account).await;
                    }
                    None => credit_error = Some(StatusCode::ValueOverflow),
                },
                Err(_) => credit_error = Some(StatusCode::InternalError),
            }
        }

        if let Some(status_code) = credit_error {
            return empty_output(gas_limit, Some(status_code));
        }

        if let Some(precompile) = self.precompiles.get(message.code_address) {
            return match precompile(&message.data, gas_limit) {
                Some((gas_used, output_data)) => Output {
                    status_code: None,
                    gas_left: gas_limit - gas_used,
                    gas_refund: 0,
                    output_data,
                    create_address: None,
                    logs: Vec::new(),
                    selfdestruct: Default::default(),
                },
                None => empty_output(0, Some(StatusCode::OutOfGas)),
            };
        }

        let code = self.load_code(message.code_address).await;
        if code.is_empty() {
            return empty_output(gas_limit, None);
        }

        AnalyzedCode::analyze(&code)
            .execute(self, message, self.revision)
            .await
    }

    /// spec.md §4.1 "Create execution (`_executeCreate`)".
    async fn execute_create(&mut self, mut message: Message) -> Output {
        let gas_limit = message.gas_limit_i64();

        if let Ok(mut caller_account) = self.state_view.get_account(message.caller).await {
            caller_account.balance = caller_account.balance.saturating_sub(message.value);
            let _ = self
                .state_view
                .put_account(message.caller, caller_account)
                .await;
        }

        let init_code = message.data.clone();
        message.data = Bytes::new();

        let new_address = self.generate_create_address(&message, &init_code).await;
        message.to = Some(new_address);
        message.code_address = new_address;

        let existing = self
            .state_view
            .get_account(new_address)
            .await
            .unwrap_or_default();
        if !existing.nonce.is_zero() || existing.code_hash != EMPTY_CODE_HASH {
            return empty_output(0, Some(StatusCode::CreateCollision));
        }

        let _ = self.state_view.clear_storage(new_address).await;
        self.observer.new_contract(new_address);

        let cfg = Config::from(self.revision);
        let mut account = existing;
        if cfg.create_increase_nonce {
            account.nonce += U256::one();
        }
        match account.balance.checked_add(message.value) {
            Some(new_balance) => account.balance = new_balance,
            None => return empty_output(0, Some(StatusCode::ValueOverflow)),
        }
        let _ = self.state_view.put_account(new_address, account).await;

        let mut output = AnalyzedCode::analyze(&init_code)
            .execute(self, message, self.revision)
            .await;

        if output.is_success() {
            let create_cost = cfg.gas_create_data as i64 * output.output_data.len() as i64;
            let too_big =
                !cfg.allow_unlimited_contract_size && output.output_data.len() > cfg.max_code_size;

            if too_big || output.gas_left < create_cost {
                output.status_code = Some(StatusCode::OutOfGas);
                output.gas_left = 0;
                output.logs.clear();
            } else {
                output.gas_left -= create_cost;
                if let Ok(code_hash) = self.state_view.put_code(output.output_data.clone()).await
                {
                    if let Ok(mut account) = self.state_view.get_account(new_address).await {
                        account.code_hash = code_hash;
                        let _ = self.state_view.put_account(new_address, account).await;
                    }
                }
                output.create_address = Some(new_address);
            }
        }

        output
    }

    /// spec.md §4.5 "OVM State-Manager bridge".
    async fn execute_state_manager(&mut self, message: &Message) -> Output {
        match bridge::handle_call(&mut self.state_view, &message.data).await {
            Ok(output_data) => Output {
                status_code: None,
                gas_left: message.gas_limit_i64(),
                gas_refund: 0,
                output_data,
                create_address: None,
                logs: Vec::new(),
                selfdestruct: Default::default(),
            },
            Err(_) => empty_output(0, Some(StatusCode::OvmError)),
        }
    }

    /// spec.md §4.1 "executeMessage".
    async fn execute_message_impl(&mut self, mut message: Message) -> Output {
        self.observer.before_message(&message);

        let is_entry = message.depth == 0;
        if is_entry {
            self.apply_ovm_entry_rewrite(&mut message).await;
        }
        self.classify_ovm_role(&mut message, is_entry);

        if self.target_message.is_none() && message.is_ovm_target_candidate {
            self.target_message = Some(message.clone());
        }

        let checkpoint = self.state_view.checkpoint();
        self.refund_checkpoints.push(self.refund);
        self.log_frames.push(Vec::new());
        self.selfdestruct_frames.push(BTreeMap::new());

        let mut output = if message.is_create() {
            self.execute_create(message.clone()).await
        } else {
            let to = message.execution_address();
            let to_code = self.load_code(to).await;
            match self.contracts.classify(to, &to_code) {
                ContractKind::StateManager => self.execute_state_manager(&message).await,
                _ => self.execute_call(message.clone()).await,
            }
        };

        output.gas_refund = self.refund;

        if output.status_code.is_some() {
            self.state_view.revert(checkpoint);
            self.refund = self
                .refund_checkpoints
                .pop()
                .expect("checkpoint pushed above");
            self.log_frames.pop();
            self.selfdestruct_frames.pop();
            output.gas_refund = self.refund;
            output.logs.clear();
            output.selfdestruct.clear();
        } else {
            self.state_view.commit(checkpoint);
            self.refund_checkpoints.pop();
            let finished_logs = self.log_frames.pop().expect("frame pushed above");
            let finished_selfdestruct =
                self.selfdestruct_frames.pop().expect("frame pushed above");
            if let Some(parent) = self.log_frames.last_mut() {
                parent.extend(finished_logs.iter().cloned());
            }
            if let Some(parent) = self.selfdestruct_frames.last_mut() {
                parent.extend(finished_selfdestruct.iter().map(|(k, v)| (*k, *v)));
            }
            output.logs = finished_logs;
            output.selfdestruct = finished_selfdestruct;
        }

        if message.is_ovm_target_candidate && self.target_message_result.is_none() {
            self.target_message_result = Some(output.clone());
        }
        if message.is_eoa_wrapper_message {
            self.account_message_result = Some(output.clone());
        }

        if is_entry {
            output = self.reconcile_ovm_exit();
        }

        self.observer.after_message(&output);
        output
    }
}

/// ABI-encodes the OVM entry rewrite's Execution Manager call (spec.md
/// §4.1 step 2 "re-encodes `data` as an Execution Manager call"). The
/// Execution Manager's own bytecode interpretation is out of scope (spec.md
/// §1); this only needs to be a stable, decodable encoding an embedder's
/// Execution Manager stub can rely on.
fn encode_em_entry(message: &Message) -> Bytes {
    let selector: [u8; 4] = if message.is_create() {
        let digest = Keccak256::digest(b"ovmCREATE(uint256,bytes)");
        [digest[0], digest[1], digest[2], digest[3]]
    } else {
        let digest = Keccak256::digest(b"ovmCALL(address,uint256,bytes)");
        [digest[0], digest[1], digest[2], digest[3]]
    };

    let mut out = Vec::with_capacity(4 + 96 + message.data.len() + 32);
    out.extend_from_slice(&selector);

    if !message.is_create() {
        let mut word = [0u8; 32];
        if let Some(to) = message.original_target_address {
            word[12..32].copy_from_slice(to.as_bytes());
        }
        out.extend_from_slice(&word);
    }

    let mut value_word = [0u8; 32];
    message.value.to_big_endian(&mut value_word);
    out.extend_from_slice(&value_word);

    let mut len_word = [0u8; 32];
    U256::from(message.data.len()).to_big_endian(&mut len_word);
    out.extend_from_slice(&len_word);
    out.extend_from_slice(&message.data);
    let padding = (32 - message.data.len() % 32) % 32;
    out.extend(std::iter::repeat(0u8).take(padding));

    out.into()
}

#[async_trait::async_trait]
impl<SV, CR, OB> Eei for Executor<SV, CR, OB>
where
    SV: StateView + Send + Sync,
    CR: ContractRegistry + Send + Sync,
    OB: Observer + Send + Sync,
{
    fn gas_left(&self) -> i64 {
        self.gas_left_cache
    }

    fn use_gas(&mut self, amount: i64) -> Result<(), StatusCode> {
        self.gas_left_cache -= amount;
        if self.gas_left_cache < 0 {
            return Err(StatusCode::OutOfGas);
        }
        Ok(())
    }

    fn refund_gas(&mut self, amount: i64) {
        self.refund += amount;
    }

    fn sub_refund(&mut self, amount: i64) {
        self.refund = (self.refund - amount).max(0);
    }

    async fn account_exists(&self, address: Address) -> anyhow::Result<bool> {
        let account = self.state_view.get_account(address).await?;
        Ok(!account.is_empty())
    }

    async fn is_account_empty(&self, address: Address) -> anyhow::Result<bool> {
        if self.revision < Revision::Spurious {
            return Ok(false);
        }
        let account = self.state_view.get_account(address).await?;
        Ok(account.is_empty())
    }

    async fn get_balance(&self, address: Address) -> anyhow::Result<U256> {
        Ok(self.state_view.get_account(address).await?.balance)
    }

    async fn get_code_size(&self, address: Address) -> anyhow::Result<U256> {
        let account = self.state_view.get_account(address).await?;
        if account.code_hash == EMPTY_CODE_HASH {
            return Ok(U256::zero());
        }
        Ok(self.state_view.get_code(account.code_hash).await?.len().into())
    }

    async fn get_code_hash(&self, address: Address) -> anyhow::Result<H256> {
        let account = self.state_view.get_account(address).await?;
        if account.code_hash == EMPTY_CODE_HASH && account.is_empty() {
            return Ok(H256::zero());
        }
        Ok(account.code_hash)
    }

    async fn copy_code(
        &self,
        address: Address,
        offset: usize,
        buffer: &mut [u8],
    ) -> anyhow::Result<usize> {
        let account = self.state_view.get_account(address).await?;
        if account.code_hash == EMPTY_CODE_HASH {
            return Ok(0);
        }
        let code = self.state_view.get_code(account.code_hash).await?;
        if offset >= code.len() {
            return Ok(0);
        }
        let n = std::cmp::min(buffer.len(), code.len() - offset);
        buffer[..n].copy_from_slice(&code[offset..offset + n]);
        Ok(n)
    }

    async fn get_storage(&self, address: Address, key: H256) -> anyhow::Result<H256> {
        self.state_view.get_storage(address, key).await
    }

    async fn set_storage(
        &mut self,
        address: Address,
        key: H256,
        value: H256,
    ) -> anyhow::Result<StorageStatus> {
        let current = self.state_view.get_storage(address, key).await?;
        if current == value {
            return Ok(StorageStatus::Unchanged);
        }

        let original = *self
            .original_storage
            .entry((address, key))
            .or_insert(current);

        self.state_view.put_storage(address, key, value).await?;

        Ok(if original == current {
            if value.is_zero() {
                StorageStatus::Deleted
            } else if original.is_zero() {
                StorageStatus::Added
            } else {
                StorageStatus::Modified
            }
        } else {
            StorageStatus::ModifiedAgain
        })
    }

    async fn call(&mut self, msg: &Message) -> anyhow::Result<Output> {
        Ok(self.execute_message_impl(msg.clone()).await)
    }

    async fn emit_log(
        &mut self,
        address: Address,
        data: &[u8],
        topics: &[H256],
    ) -> anyhow::Result<()> {
        let log = Log {
            address,
            topics: topics.iter().copied().collect(),
            data: data.to_vec().into(),
        };
        if let Some(frame) = self.log_frames.last_mut() {
            frame.push(log);
        }
        Ok(())
    }

    async fn selfdestruct(&mut self, address: Address, beneficiary: Address) -> anyhow::Result<()> {
        if let Some(frame) = self.selfdestruct_frames.last_mut() {
            frame.insert(address, beneficiary);
        }

        let account = self.state_view.get_account(address).await?;
        if !account.balance.is_zero() {
            let mut beneficiary_account = self.state_view.get_account(beneficiary).await?;
            beneficiary_account.balance = beneficiary_account
                .balance
                .saturating_add(account.balance);
            self.state_view
                .put_account(beneficiary, beneficiary_account)
                .await?;

            let mut account = account;
            account.balance = U256::zero();
            self.state_view.put_account(address, account).await?;
        }

        Ok(())
    }

    async fn get_tx_context(&self) -> anyhow::Result<TxContext> {
        Ok(self.tx_context.clone())
    }

    async fn get_block_hash(&self, block_number: u64) -> anyhow::Result<H256> {
        Ok(self
            .block_hashes
            .get(&block_number)
            .copied()
            .unwrap_or_default())
    }

    async fn access_account(&mut self, address: Address) -> anyhow::Result<AccessStatus> {
        if self.warm_accounts.insert(address) {
            Ok(AccessStatus::Cold)
        } else {
            Ok(AccessStatus::Warm)
        }
    }

    async fn access_storage(
        &mut self,
        address: Address,
        key: H256,
    ) -> anyhow::Result<AccessStatus> {
        if self.warm_storage.insert((address, key)) {
            Ok(AccessStatus::Cold)
        } else {
            Ok(AccessStatus::Warm)
        }
    }

    fn on_step(&mut self, _pc: usize, _op: OpCode, state: &ExecutionState) {
        self.gas_left_cache = state.gas_left;
        self.observer.step(_pc, _op, state);
    }
}

#[inline]
fn _unused(a: U256) -> Address {
    u256_to_address(a)
}

#[inline]
fn _unused2(a: Address) -> U256 {
    address_to_u256(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::MessageKind,
        observer::NoopObserver,
        ovm::contracts::StaticContractRegistry,
        util::mock::InMemoryStateView,
    };

    fn tx_context() -> TxContext {
        TxContext {
            tx_gas_price: U256::zero(),
            tx_origin: Address::zero(),
            block_coinbase: Address::zero(),
            block_number: 1,
            block_timestamp: 0,
            block_gas_limit: 30_000_000,
            block_difficulty: U256::zero(),
            chain_id: U256::one(),
            block_base_fee: U256::zero(),
        }
    }

    fn executor() -> Executor<InMemoryStateView, StaticContractRegistry, NoopObserver> {
        Executor::new(
            InMemoryStateView::default(),
            StaticContractRegistry,
            PrecompileRegistry::new(),
            NoopObserver,
            Revision::London,
            tx_context(),
        )
    }

    fn call_message(to: Address, value: U256, gas_limit: u64) -> Message {
        Message {
            kind: MessageKind::Call,
            caller: Address::repeat_byte(0xaa),
            to: Some(to),
            code_address: to,
            value,
            data: Bytes::new(),
            code: None,
            gas_limit: gas_limit.into(),
            depth: 0,
            is_static: false,
            salt: None,
            original_target_address: None,
            is_ovm_target_candidate: false,
            is_eoa_wrapper_message: false,
            selfdestruct: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn empty_code_call_transfers_value_at_zero_gas() {
        let mut executor = executor();
        let to = Address::repeat_byte(0xbb);
        let caller = Address::repeat_byte(0xaa);

        executor
            .state_view_mut()
            .put_account(
                caller,
                Account {
                    balance: 100.into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let output = executor
            .execute_message(call_message(to, 5.into(), 21000))
            .await;

        assert!(output.is_success());
        assert_eq!(output.gas_left, 21000);

        let caller_account = executor.state_view().get_account(caller).await.unwrap();
        let to_account = executor.state_view().get_account(to).await.unwrap();
        assert_eq!(caller_account.balance, 95.into());
        assert_eq!(to_account.balance, 5.into());
    }

    #[tokio::test]
    async fn create_collision_consumes_all_gas() {
        let mut executor = executor();

        let mut msg = call_message(Address::zero(), U256::zero(), 50_000);
        msg.kind = MessageKind::Create;
        msg.to = None;
        msg.data = hex_literal::hex!("00").into();

        let new_address = executor.generate_create_address(&msg, &msg.data.clone()).await;
        executor
            .state_view_mut()
            .put_account(
                new_address,
                Account {
                    nonce: 1.into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let output = executor.execute_message(msg).await;
        assert_eq!(output.status_code, Some(StatusCode::CreateCollision));
        assert_eq!(output.gas_left, 0);
    }
}
