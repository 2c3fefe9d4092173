pub mod connection;
pub mod constants;
pub mod registry;
pub mod signer;
