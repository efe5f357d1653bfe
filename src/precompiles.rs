//! Precompiled-contract dispatch surface (spec.md §4.4 "Code loading").
//! Registering and implementing the individual precompiles (ECRECOVER,
//! SHA256, ...) is out of scope here; this module only defines the seam an
//! executor plugs them into.

use bytes::Bytes;
use ethereum_types::Address;

/// A precompile's entry point: consumes gas from the caller-supplied budget
/// and returns its output, or `None` if it ran out of gas.
pub type PrecompileFn = fn(input: &[u8], gas_limit: i64) -> Option<(i64, Bytes)>;

/// Maps precompile addresses (`0x1`..) to their implementation. Empty by
/// default; a host embedding this crate registers the precompiles its chain
/// actually supports.
#[derive(Default)]
pub struct PrecompileRegistry {
    entries: std::collections::BTreeMap<Address, PrecompileFn>,
}

impl PrecompileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, f: PrecompileFn) {
        self.entries.insert(address, f);
    }

    pub fn get(&self, address: Address) -> Option<PrecompileFn> {
        self.entries.get(&address).copied()
    }

    pub fn is_precompile(&self, address: Address) -> bool {
        self.entries.contains_key(&address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_no_precompiles() {
        let registry = PrecompileRegistry::new();
        assert!(!registry.is_precompile(Address::repeat_byte(1)));
    }
}
