// Example: Deriving a counterfactual smart account address
//
// This example demonstrates how to:
// 1. Pick an owner address and a contract stack
// 2. Compute the counterfactual account address offline
// 3. Separate accounts with the derivation index

use alloy_primitives::address;
use sessionkit_sdk::core::constants::ECDSA_VALIDATOR;
use sessionkit_sdk::state::{EntryPointVersion, KernelVersion};
use sessionkit_sdk::utils::compute_account_address;

fn main() {
    // 1. Owner EOA and the stack the account will deploy on
    let owner = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    let kernel = KernelVersion::V3_1;
    let entry_point = EntryPointVersion::V0_7;

    // 2. The primary account needs no RPC connection to derive
    let primary = compute_account_address(owner, 0, kernel, entry_point, ECDSA_VALIDATOR);

    // 3. A different index yields an unrelated address for the same owner
    let secondary = compute_account_address(owner, 1, kernel, entry_point, ECDSA_VALIDATOR);

    println!("Deriving smart accounts for owner {owner}:");
    println!("  Kernel: {kernel} via EntryPoint {entry_point}");
    println!("  Account #0: {primary}");
    println!("  Account #1: {secondary}");

    // In a real application, you would:
    // let account = SmartAccount::connect()
    //     .with_owner(capability)
    //     .connect(&reader)
    //     .await?;
}
