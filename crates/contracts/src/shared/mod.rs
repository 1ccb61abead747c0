pub mod envelope;
pub mod rpc;
pub mod serde_num;
