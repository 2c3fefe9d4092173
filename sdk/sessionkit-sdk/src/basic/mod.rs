pub mod actions;
pub mod policy;
pub mod wallet;
