use alloy_primitives::{address, Address};

// Kernel ECDSA validator module, shared across supported chains
pub const ECDSA_VALIDATOR: Address = address!("845adb2c711129d4f3966735ed98a9f09fc4ce57");

// Permission validator module that hosts session-key policy checks
pub const PERMISSION_VALIDATOR: Address = address!("0000000000e79cbd3b1e9e16b286fbdb6a418eb8");
