//! Entry point and account implementation version registry.
//!
//! Both derivation and composition are version-gated: a counterfactual address
//! is a function of the (implementation, entry point) pair, and the
//! sudo/regular validator layout only exists from Kernel v3.0 onward.

use std::fmt;

use alloy_primitives::{address, Address};

/// ERC-4337 entry point contract revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPointVersion {
    V0_6,
    V0_7,
}

impl EntryPointVersion {
    /// Canonical singleton deployment of this revision.
    pub const fn address(&self) -> Address {
        match self {
            EntryPointVersion::V0_6 => address!("5ff137d4b0fdcd49dca30c7cf57e578a026d2789"),
            EntryPointVersion::V0_7 => address!("0000000071727de22e5e9d8baf0edac6f37da032"),
        }
    }
}

impl fmt::Display for EntryPointVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPointVersion::V0_6 => f.write_str("v0.6"),
            EntryPointVersion::V0_7 => f.write_str("v0.7"),
        }
    }
}

/// Kernel account implementation version.
///
/// `V2_4` accounts remain derivable (the legacy factory is live) but predate
/// the modular validator layout, so composition always rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelVersion {
    V2_4,
    V3_0,
    V3_1,
}

impl KernelVersion {
    /// Factory that deploys accounts of this version.
    pub const fn factory(&self) -> Address {
        match self {
            KernelVersion::V2_4 => address!("5de4839a76cf55d0c90e2061ef4386d962e15ae3"),
            KernelVersion::V3_0 => address!("6723b44abeec4e71ebe3232bd5b455805badd22f"),
            KernelVersion::V3_1 => address!("aac5d4240af87249b3f71bc8e4a2cae074a3e419"),
        }
    }

    /// Account implementation the factory points new deployments at.
    pub const fn implementation(&self) -> Address {
        match self {
            KernelVersion::V2_4 => address!("d3082872f8b06073a021b4602e022d5a070d7cfc"),
            KernelVersion::V3_0 => address!("94f097e1ebeb4eca3aae54cabb08905b239a7d27"),
            KernelVersion::V3_1 => address!("bac849bb641841b44e965fb01a4bf5f074f84b4d"),
        }
    }

    /// Entry point revision this implementation is built against.
    pub const fn required_entry_point(&self) -> EntryPointVersion {
        match self {
            KernelVersion::V2_4 => EntryPointVersion::V0_6,
            KernelVersion::V3_0 | KernelVersion::V3_1 => EntryPointVersion::V0_7,
        }
    }

    /// Whether this implementation has the sudo/regular validator layout.
    pub const fn supports_modular_validators(&self) -> bool {
        !matches!(self, KernelVersion::V2_4)
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelVersion::V2_4 => f.write_str("v2.4"),
            KernelVersion::V3_0 => f.write_str("v3.0"),
            KernelVersion::V3_1 => f.write_str("v3.1"),
        }
    }
}
