use alloy_primitives::{keccak256, Address, Selector, B256, U256};
use sessionkit_state::{EntryPointVersion, KernelVersion, ProposedAction};

//=============================================================================
// Validator Identifiers
//=============================================================================

/// Kernel v3 validator type prefix for the root (sudo) validator
pub const VALIDATOR_TYPE_ROOT: u8 = 0x01;

/// Build the 21-byte Kernel v3 validator identifier for a validator module.
///
/// # Layout
/// ```text
/// [0]     validator type (0x01 = root)
/// [1..21] validator module address
/// ```
pub fn root_validator_id(module: Address) -> [u8; 21] {
    let mut id = [0u8; 21];
    id[0] = VALIDATOR_TYPE_ROOT;
    id[1..21].copy_from_slice(module.as_slice());
    id
}

//=============================================================================
// Counterfactual Address Derivation
//=============================================================================

const INITIALIZE_SIGNATURE: &str = "initialize(bytes21,address,bytes,bytes)";

/// Build the account initialization calldata that seeds the CREATE2 salt.
///
/// # Layout
/// ```text
/// [0..4]   initialize selector
/// [4..25]  root validator id
/// [25..45] hook module (zero address, no hook)
/// [45..65] owner address (root validator data)
/// ```
pub fn account_init_data(root_validator: &[u8; 21], owner: Address) -> Vec<u8> {
    let mut data = Vec::with_capacity(65);
    data.extend_from_slice(function_selector(INITIALIZE_SIGNATURE).as_slice());
    data.extend_from_slice(root_validator);
    data.extend_from_slice(Address::ZERO.as_slice());
    data.extend_from_slice(owner.as_slice());
    data
}

/// Derive the CREATE2 salt from init data and the derivation index.
pub fn account_salt(init_data: &[u8], index: u64) -> B256 {
    let mut preimage = Vec::with_capacity(init_data.len() + 32);
    preimage.extend_from_slice(init_data);
    preimage.extend_from_slice(&U256::from(index).to_be_bytes::<32>());
    keccak256(preimage)
}

/// Digest identifying the deployed account code for one Kernel/EntryPoint pair.
///
/// Stands in for the factory's init code hash: the factory deploys a fixed
/// proxy for one implementation, so the pair pins the code.
pub fn version_digest(kernel: KernelVersion, entry_point: EntryPointVersion) -> B256 {
    let mut preimage = [0u8; 40];
    preimage[..20].copy_from_slice(kernel.implementation().as_slice());
    preimage[20..].copy_from_slice(entry_point.address().as_slice());
    keccak256(preimage)
}

/// Compute the counterfactual account address for an owner.
///
/// The address is fixed by the CREATE2 inputs alone, so it is valid before
/// any deployment transaction runs. Changing the owner, the index, or the
/// contract stack changes the address.
pub fn compute_account_address(
    owner: Address,
    index: u64,
    kernel: KernelVersion,
    entry_point: EntryPointVersion,
    sudo_module: Address,
) -> Address {
    let init_data = account_init_data(&root_validator_id(sudo_module), owner);
    let salt = account_salt(&init_data, index);
    kernel.factory().create2(salt, version_digest(kernel, entry_point))
}

//=============================================================================
// Selectors & Digests
//=============================================================================

/// First four bytes of the keccak-256 of a function signature.
pub fn function_selector(signature: &str) -> Selector {
    Selector::from_slice(&keccak256(signature.as_bytes())[..4])
}

/// Digest a session key signs to authorize an action.
///
/// Binds the chain and the account so a signature cannot be replayed against
/// another deployment of the same session key.
///
/// # Layout
/// ```text
/// [0..8]    chain_id: u64 (LE)
/// [8..28]   account address
/// [28..48]  target address
/// [48..80]  value: 32-byte big-endian word
/// [80..84]  selector
/// [84..88]  argument count: u32 (LE)
/// [88..]    per argument: length: u32 (LE), then the bytes
/// ```
pub fn action_digest(chain_id: u64, account: Address, action: &ProposedAction) -> B256 {
    let mut preimage = Vec::with_capacity(88);
    preimage.extend_from_slice(&chain_id.to_le_bytes());
    preimage.extend_from_slice(account.as_slice());
    preimage.extend_from_slice(action.target.as_slice());
    preimage.extend_from_slice(&action.value.to_be_bytes::<32>());
    preimage.extend_from_slice(action.selector.as_slice());
    preimage.extend_from_slice(&(action.arguments.len() as u32).to_le_bytes());
    for argument in &action.arguments {
        preimage.extend_from_slice(&(argument.len() as u32).to_le_bytes());
        preimage.extend_from_slice(argument);
    }
    keccak256(preimage)
}
