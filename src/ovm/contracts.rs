//! Well-known OVM pseudo-contract addresses and the registry that classifies
//! a call target against them (spec.md §6 "Contract registry").

use bytes::Bytes;
use ethereum_types::Address;
use once_cell::sync::Lazy;

/// What a call target turned out to be, for dispatch purposes
/// (spec.md §4.1 step 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    /// Intercepted by the OVM state bridge (spec.md §4.5) instead of being
    /// interpreted.
    StateManager,
    /// Forwarded: the entry rewrite re-targets depth-0 messages here: see
    /// [`crate::executor`].
    ExecutionManager,
    /// The mock ECDSA contract account installed at an EOA's address by the
    /// entry rewrite (spec.md §4.1 step 2).
    MockEcdsaAccount,
    /// Any other deployed contract.
    Other,
}

/// Looks up which of the OVM's well-known pseudo-contracts an address/code
/// pair corresponds to.
pub trait ContractRegistry {
    fn execution_manager_address(&self) -> Address;
    fn state_manager_address(&self) -> Address;
    /// Bytecode installed at an EOA caller with no code by the entry rewrite.
    fn mock_ecdsa_account_code(&self) -> &Bytes;

    fn classify(&self, address: Address, code: &[u8]) -> ContractKind {
        if address == self.execution_manager_address() {
            ContractKind::ExecutionManager
        } else if address == self.state_manager_address() {
            ContractKind::StateManager
        } else if !code.is_empty() && code == self.mock_ecdsa_account_code().as_ref() {
            ContractKind::MockEcdsaAccount
        } else {
            ContractKind::Other
        }
    }
}

fn well_known_address(last_byte: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[18] = 0x42;
    bytes[19] = last_byte;
    Address::from(bytes)
}

static MOCK_ECDSA_ACCOUNT_CODE: Lazy<Bytes> = Lazy::new(|| {
    // Placeholder bytecode: a STOP-terminated stub. Only ever compared for
    // equality against itself by `ContractRegistry::classify` — it is never
    // interpreted, since the entry rewrite forwards wrapper calls straight
    // to the Execution Manager rather than running this code.
    Bytes::from_static(&[0x00])
});

/// Default registry: fixed well-known addresses, no external configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticContractRegistry;

impl ContractRegistry for StaticContractRegistry {
    fn execution_manager_address(&self) -> Address {
        well_known_address(0x01)
    }

    fn state_manager_address(&self) -> Address {
        well_known_address(0x02)
    }

    fn mock_ecdsa_account_code(&self) -> &Bytes {
        &MOCK_ECDSA_ACCOUNT_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_well_known_addresses() {
        let registry = StaticContractRegistry;
        assert_eq!(
            registry.classify(registry.execution_manager_address(), &[]),
            ContractKind::ExecutionManager
        );
        assert_eq!(
            registry.classify(registry.state_manager_address(), &[]),
            ContractKind::StateManager
        );
        assert_eq!(
            registry.classify(Address::repeat_byte(9), &[0x60, 0x00]),
            ContractKind::Other
        );
    }
}
