pub mod client;
pub mod supervisor;

pub use client::{ConnState, RelayClient, RunOutcome};
