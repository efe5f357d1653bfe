//! Fork configuration: the "External Interfaces / Fork configuration" surface
//! from spec.md §6 (`param(category, name) -> integer`, `gteHardfork`).

use crate::{instructions::properties::WARM_STORAGE_READ_COST, Revision};

/// Runtime configuration for one hard fork.
#[derive(Clone, Debug)]
pub struct Config {
    pub gas_ext_code: u64,
    pub gas_ext_code_copy: u64,
    pub gas_ext_code_hash: u64,
    pub gas_sstore_set: u64,
    pub gas_sstore_reset: u64,
    pub refund_sstore_clears: i64,
    pub gas_balance: u64,
    pub gas_sload: u64,
    pub gas_suicide: u64,
    pub gas_suicide_new_account: u64,
    pub gas_call: u64,
    pub gas_expbyte: u64,
    pub gas_transaction_create: u64,
    pub gas_transaction_call: u64,
    pub gas_transaction_zero_data: u64,
    pub gas_transaction_non_zero_data: u64,
    pub gas_create_data: u64,
    /// SELFDESTRUCT refund. Zeroed from London onward (EIP-3529).
    pub refund_selfdestruct: i64,
    /// EIP-1283/2200 net-gas SSTORE metering.
    pub sstore_gas_metering: bool,
    /// EIP-1706.
    pub sstore_revert_under_stipend: bool,
    pub create_increase_nonce: bool,
    pub stack_limit: usize,
    pub max_code_size: usize,
    pub allow_unlimited_contract_size: bool,
    pub call_stack_limit: u32,
    pub call_stipend: u64,
    pub has_delegate_call: bool,
    pub has_create2: bool,
    pub has_revert: bool,
    pub has_static_call: bool,
    pub has_bitwise_shifting: bool,
    pub has_chain_id: bool,
    pub has_self_balance: bool,
    pub has_ext_code_hash: bool,
    pub has_access_list: bool,
    pub has_base_fee: bool,
}

impl Config {
    pub const fn frontier() -> Self {
        Self {
            gas_ext_code: 20,
            gas_ext_code_copy: 20,
            gas_ext_code_hash: 20,
            gas_balance: 20,
            gas_sload: 50,
            gas_sstore_set: 20000,
            gas_sstore_reset: 5000,
            refund_sstore_clears: 15000,
            gas_suicide: 0,
            gas_suicide_new_account: 0,
            gas_call: 40,
            gas_expbyte: 10,
            gas_transaction_create: 21000,
            gas_transaction_call: 21000,
            gas_transaction_zero_data: 4,
            gas_transaction_non_zero_data: 68,
            gas_create_data: 200,
            refund_selfdestruct: 24000,
            sstore_gas_metering: false,
            sstore_revert_under_stipend: false,
            create_increase_nonce: false,
            stack_limit: 1024,
            max_code_size: crate::MAX_CODE_SIZE,
            allow_unlimited_contract_size: false,
            call_stack_limit: 1024,
            call_stipend: 2300,
            has_delegate_call: false,
            has_create2: false,
            has_revert: false,
            has_static_call: false,
            has_bitwise_shifting: false,
            has_chain_id: false,
            has_self_balance: false,
            has_ext_code_hash: false,
            has_access_list: false,
            has_base_fee: false,
        }
    }

    pub const fn homestead() -> Self {
        Self {
            gas_transaction_create: 53000,
            has_delegate_call: true,
            ..Self::frontier()
        }
    }

    pub const fn tangerine() -> Self {
        Self {
            gas_ext_code: 700,
            gas_ext_code_copy: 700,
            gas_balance: 400,
            gas_sload: 200,
            gas_call: 700,
            gas_suicide: 5000,
            gas_suicide_new_account: 25000,
            ..Self::homestead()
        }
    }

    pub const fn spurious() -> Self {
        Self {
            create_increase_nonce: true,
            ..Self::tangerine()
        }
    }

    pub const fn byzantium() -> Self {
        Self {
            has_revert: true,
            has_static_call: true,
            ..Self::spurious()
        }
    }

    pub const fn constantinople() -> Self {
        Self {
            has_bitwise_shifting: true,
            has_create2: true,
            has_ext_code_hash: true,
            sstore_gas_metering: true,
            ..Self::byzantium()
        }
    }

    pub const fn petersburg() -> Self {
        Self {
            sstore_gas_metering: false,
            ..Self::constantinople()
        }
    }

    pub const fn istanbul() -> Self {
        Self {
            sstore_gas_metering: true,
            sstore_revert_under_stipend: true,
            has_chain_id: true,
            gas_sload: 800,
            gas_balance: 700,
            gas_ext_code_hash: 700,
            has_self_balance: true,
            ..Self::petersburg()
        }
    }

    pub const fn berlin() -> Self {
        Self {
            gas_ext_code: WARM_STORAGE_READ_COST as u64,
            gas_ext_code_copy: WARM_STORAGE_READ_COST as u64,
            gas_ext_code_hash: WARM_STORAGE_READ_COST as u64,
            gas_balance: WARM_STORAGE_READ_COST as u64,
            gas_call: WARM_STORAGE_READ_COST as u64,
            gas_sload: WARM_STORAGE_READ_COST as u64,
            has_access_list: true,
            ..Self::istanbul()
        }
    }

    pub const fn london() -> Self {
        Self {
            has_base_fee: true,
            refund_selfdestruct: 0,
            ..Self::berlin()
        }
    }

    /// `param(category, name)` from spec.md §6. `category` and `name` mirror
    /// the field groupings above (e.g. `param("gasPrices", "createData")`,
    /// `param("vm", "maxCodeSize")`). Unknown pairs return `None` rather than
    /// panicking — callers treat that as "this fork has no such parameter."
    pub fn param(&self, category: &str, name: &str) -> Option<u64> {
        match (category, name) {
            ("gasPrices", "createData") => Some(self.gas_create_data),
            ("gasPrices", "sstoreSet") => Some(self.gas_sstore_set),
            ("gasPrices", "sstoreReset") => Some(self.gas_sstore_reset),
            ("gasPrices", "sstoreRefundClears") => Some(self.refund_sstore_clears as u64),
            ("gasPrices", "balance") => Some(self.gas_balance),
            ("gasPrices", "sload") => Some(self.gas_sload),
            ("gasPrices", "call") => Some(self.gas_call),
            ("gasPrices", "extCode") => Some(self.gas_ext_code),
            ("gasPrices", "extCodeCopy") => Some(self.gas_ext_code_copy),
            ("gasPrices", "extCodeHash") => Some(self.gas_ext_code_hash),
            ("gasPrices", "expByte") => Some(self.gas_expbyte),
            ("gasPrices", "callStipend") => Some(self.call_stipend),
            ("gasPrices", "suicideRefund") => Some(self.refund_selfdestruct.max(0) as u64),
            ("vm", "stackLimit") => Some(self.stack_limit as u64),
            ("vm", "maxCodeSize") => Some(self.max_code_size as u64),
            ("vm", "callStackLimit") => Some(self.call_stack_limit as u64),
            _ => None,
        }
    }
}

impl From<Revision> for Config {
    fn from(rev: Revision) -> Self {
        match rev {
            Revision::Frontier => Self::frontier(),
            Revision::Homestead => Self::homestead(),
            Revision::Tangerine => Self::tangerine(),
            Revision::Spurious => Self::spurious(),
            Revision::Byzantium => Self::byzantium(),
            Revision::Constantinople => Self::constantinople(),
            Revision::Petersburg => Self::petersburg(),
            Revision::Istanbul => Self::istanbul(),
            Revision::Berlin => Self::berlin(),
            Revision::London => Self::london(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_lookup() {
        let cfg = Config::from(Revision::London);
        assert_eq!(cfg.param("gasPrices", "createData"), Some(200));
        assert_eq!(cfg.param("vm", "maxCodeSize"), Some(0x6000));
        assert_eq!(cfg.param("nonsense", "nonsense"), None);
    }

    #[test]
    fn spurious_enables_nonce_bump_on_create() {
        assert!(!Config::from(Revision::Tangerine).create_increase_nonce);
        assert!(Config::from(Revision::Spurious).create_increase_nonce);
    }
}
