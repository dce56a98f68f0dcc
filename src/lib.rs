//! Natural-language command interpreter for a Base Sepolia trading console.
//!
//! Commands are classified into intents, their parameters extracted, and the
//! result returned either as text or as a `{type, data}` modal payload for
//! the UI to confirm.

pub mod assistant;
pub mod config;
pub mod deploy;
pub mod domain;
pub mod handlers;
pub mod hooks;
pub mod intent;
pub mod journal;
pub mod liquidity;
pub mod monitoring;
pub mod nebula;
pub mod network;
pub mod router;
pub mod rpc;
pub mod swap;
pub mod time;
pub mod wallet;
