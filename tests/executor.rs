//! End-to-end scenarios from spec.md §8 "Testable properties", driven
//! against the real [`Executor`] and [`InMemoryStateView`].

use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use ovm_evm::{
    eei::TxContext,
    executor::Executor,
    observer::NoopObserver,
    ovm::contracts::{ContractRegistry, StaticContractRegistry},
    precompiles::PrecompileRegistry,
    util::mock::InMemoryStateView,
    Account, Message, MessageKind, Revision, StateView, StatusCode,
};
use sha3::{Digest, Keccak256};
use std::collections::BTreeMap;

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

/// Base template for a depth-1 call message, bypassing the depth-0-only OVM
/// entry rewrite so these scenarios exercise plain call/create mechanics
/// (spec.md §8's six scenarios concern the EVM core, not the OVM boundary).
fn call_message(caller: Address, to: Address, value: U256, gas_limit: u64, data: Bytes) -> Message {
    Message {
        kind: MessageKind::Call,
        caller,
        to: Some(to),
        code_address: to,
        value,
        data,
        code: None,
        gas_limit: gas_limit.into(),
        depth: 1,
        is_static: false,
        salt: None,
        original_target_address: None,
        is_ovm_target_candidate: false,
        is_eoa_wrapper_message: false,
        selfdestruct: BTreeMap::new(),
    }
}

fn create_message(caller: Address, value: U256, gas_limit: u64, init_code: Bytes, salt: Option<H256>) -> Message {
    Message {
        kind: salt.map(|salt| MessageKind::Create2 { salt }).unwrap_or(MessageKind::Create),
        caller,
        to: None,
        code_address: Address::zero(),
        value,
        data: init_code,
        code: None,
        gas_limit: gas_limit.into(),
        depth: 1,
        is_static: false,
        salt,
        original_target_address: None,
        is_ovm_target_candidate: false,
        is_eoa_wrapper_message: false,
        selfdestruct: BTreeMap::new(),
    }
}

/// Scenario 1: empty code call transfers value at zero gas used.
#[tokio::test]
async fn empty_code_call() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    executor
        .state_view_mut()
        .put_account(caller, Account { balance: 100.into(), ..Default::default() })
        .await
        .unwrap();

    let output = executor
        .execute_message(call_message(caller, to, 5.into(), 21000, Bytes::new()))
        .await;

    assert!(output.is_success());
    assert_eq!(output.gas_left, 21000, "gasUsed == 0 means all of gasLimit survives");
    assert!(output.output_data.is_empty());

    assert_eq!(
        executor.state_view().get_account(caller).await.unwrap().balance,
        95.into()
    );
    assert_eq!(
        executor.state_view().get_account(to).await.unwrap().balance,
        5.into()
    );
}

/// Scenario 2: PUSH1 1; PUSH1 2; ADD; STOP terminates cleanly.
#[tokio::test]
async fn push_add_stop() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    let code: Bytes = hex_literal::hex!("600160020100").to_vec().into();
    let code_hash = executor.state_view_mut().put_code(code).await.unwrap();
    executor
        .state_view_mut()
        .put_account(to, Account { code_hash, ..Default::default() })
        .await
        .unwrap();

    let output = executor
        .execute_message(call_message(caller, to, U256::zero(), 100_000, Bytes::new()))
        .await;

    assert!(output.is_success());
    assert!(output.output_data.is_empty());
}

/// Scenario 3: PUSH1 3; JUMP; STOP; JUMPDEST — offset 3 is STOP, not
/// JUMPDEST, so this must fail with INVALID_JUMP and consume the whole
/// gas limit.
#[tokio::test]
async fn jump_to_non_jumpdest_consumes_all_gas() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    let code: Bytes = hex_literal::hex!("6003565b00").to_vec().into();
    let code_hash = executor.state_view_mut().put_code(code).await.unwrap();
    executor
        .state_view_mut()
        .put_account(to, Account { code_hash, ..Default::default() })
        .await
        .unwrap();

    let output = executor
        .execute_message(call_message(caller, to, U256::zero(), 100_000, Bytes::new()))
        .await;

    assert_eq!(output.status_code, Some(StatusCode::InvalidJump));
    assert_eq!(output.gas_left, 0);
}

/// Scenario 4: PUSH1 0; PUSH1 0; REVERT refunds the unused gas.
#[tokio::test]
async fn revert_refunds_unused_gas() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    let code: Bytes = hex_literal::hex!("60006000FD").to_vec().into();
    let code_hash = executor.state_view_mut().put_code(code).await.unwrap();
    executor
        .state_view_mut()
        .put_account(to, Account { code_hash, ..Default::default() })
        .await
        .unwrap();

    let output = executor
        .execute_message(call_message(caller, to, U256::zero(), 100_000, Bytes::new()))
        .await;

    assert_eq!(output.status_code, Some(StatusCode::Revert));
    assert!(output.gas_left > 0);
    assert!(output.output_data.is_empty());
}

/// Scenario 5: creating at an address whose account already has a nonzero
/// nonce fails with CREATE_COLLISION and consumes the full gas limit.
#[tokio::test]
async fn create_collision_consumes_all_gas() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let salt = H256::repeat_byte(0x01);
    let init_code: Bytes = hex_literal::hex!("00").to_vec().into();

    // CREATE2 address derivation, duplicated here only to pre-seed a
    // colliding account (mirrors Executor::generate_create_address).
    let code_hash = Keccak256::digest(&init_code);
    let mut preimage = Vec::with_capacity(85);
    preimage.push(0xff);
    preimage.extend_from_slice(caller.as_bytes());
    preimage.extend_from_slice(salt.as_bytes());
    preimage.extend_from_slice(&code_hash);
    let predicted = Address::from_slice(&Keccak256::digest(&preimage)[12..32]);

    executor
        .state_view_mut()
        .put_account(predicted, Account { nonce: 1.into(), ..Default::default() })
        .await
        .unwrap();

    let output = executor
        .execute_message(create_message(caller, U256::zero(), 100_000, init_code, Some(salt)))
        .await;

    assert_eq!(output.status_code, Some(StatusCode::CreateCollision));
    assert_eq!(output.gas_left, 0);
}

/// Scenario 6: a call to the StateManager pseudo-address dispatches to the
/// bridge instead of being interpreted, and a subsequent read observes the
/// write.
#[tokio::test]
async fn state_manager_dispatch_round_trips() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let registry = StaticContractRegistry;
    let state_manager = registry.state_manager_address();
    let target = Address::repeat_byte(0x55);
    let slot = H256::repeat_byte(0x07);
    let value = H256::repeat_byte(0x09);

    fn selector(sig: &str) -> [u8; 4] {
        let digest = Keccak256::digest(sig.as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }
    fn word_address(a: Address) -> [u8; 32] {
        let mut w = [0u8; 32];
        w[12..32].copy_from_slice(a.as_bytes());
        w
    }

    let mut set_data = selector("setStorage(address,bytes32,bytes32)").to_vec();
    set_data.extend_from_slice(&word_address(target));
    set_data.extend_from_slice(slot.as_bytes());
    set_data.extend_from_slice(value.as_bytes());

    let output = executor
        .execute_message(call_message(caller, state_manager, U256::zero(), 100_000, set_data.into()))
        .await;
    assert!(output.is_success());

    let mut get_data = selector("getStorage(address,bytes32)").to_vec();
    get_data.extend_from_slice(&word_address(target));
    get_data.extend_from_slice(slot.as_bytes());

    let output = executor
        .execute_message(call_message(caller, state_manager, U256::zero(), 100_000, get_data.into()))
        .await;
    assert!(output.is_success());
    assert_eq!(output.output_data.as_ref(), value.as_bytes());
}

/// spec.md §8 invariant: `checkpoint; revert` is a no-op on observable
/// state — a reverted message leaves the caller/callee balances untouched.
#[tokio::test]
async fn reverted_call_leaves_balances_untouched() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let to = Address::repeat_byte(0xbb);

    executor
        .state_view_mut()
        .put_account(caller, Account { balance: 100.into(), ..Default::default() })
        .await
        .unwrap();

    let code: Bytes = hex_literal::hex!("60006000FD").to_vec().into();
    let code_hash = executor.state_view_mut().put_code(code).await.unwrap();
    executor
        .state_view_mut()
        .put_account(to, Account { code_hash, ..Default::default() })
        .await
        .unwrap();

    let output = executor
        .execute_message(call_message(caller, to, 10.into(), 100_000, Bytes::new()))
        .await;
    assert_eq!(output.status_code, Some(StatusCode::Revert));

    // The balance debit applied at the start of `_executeCall` is undone by
    // the checkpoint revert, same as every other state mutation.
    assert_eq!(
        executor.state_view().get_account(caller).await.unwrap().balance,
        100.into()
    );
    assert_eq!(
        executor.state_view().get_account(to).await.unwrap().balance,
        U256::zero()
    );
}

/// The OVM entry rewrite (spec.md §4.1 step 2) only fires at depth 0: it
/// installs the mock ECDSA-wrapper bytecode at an empty-code caller and
/// re-targets the message at the Execution Manager. With no Execution
/// Manager bytecode configured in this harness, no target is ever latched,
/// so the exit reconciliation surfaces a generic OVM error rather than
/// silently succeeding.
#[tokio::test]
async fn entry_rewrite_installs_wrapper_and_retargets_to_execution_manager() {
    let mut executor = executor();
    let caller = Address::repeat_byte(0xaa);
    let registry = StaticContractRegistry;

    let message = Message {
        kind: MessageKind::Call,
        caller,
        to: Some(Address::repeat_byte(0x99)),
        code_address: Address::repeat_byte(0x99),
        value: U256::zero(),
        data: Bytes::new(),
        code: None,
        gas_limit: 100_000.into(),
        depth: 0,
        is_static: false,
        salt: None,
        original_target_address: None,
        is_ovm_target_candidate: false,
        is_eoa_wrapper_message: false,
        selfdestruct: BTreeMap::new(),
    };

    let output = executor.execute_message(message).await;
    assert_eq!(output.status_code, Some(StatusCode::OvmError));

    let empty_code_hash = H256::from_slice(&Keccak256::digest(Bytes::new()));
    let caller_account = executor.state_view().get_account(caller).await.unwrap();
    assert_ne!(caller_account.code_hash, empty_code_hash, "wrapper bytecode installed");
    let _ = registry.execution_manager_address();
}
