//! Client for reclaiming rent deposits locked in closed Solana token accounts.
//!
//! - [`client::ApiClient`] talks to the remote reclaim service
//! - [`wallet::WalletAdapter`] fronts the user's wallet provider
//! - [`orchestrator::Reclaimer`] drives connect → scan → reclaim → refresh
//! - [`view::render`] projects the flow state for display

pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod providers;
pub mod state;
pub mod types;
pub mod view;
pub mod wallet;

pub use crate::client::{ApiClient, RetryPolicy};
pub use crate::config::ReclaimConfig;
pub use crate::core::connection::{RpcConnection, SolConnection};
pub use crate::core::provider::WalletProvider;
pub use crate::core::transport::{HttpTransport, ReqwestTransport};
pub use crate::error::{NetworkError, ProviderError, ReclaimError, Result, WalletError};
pub use crate::orchestrator::Reclaimer;
pub use crate::providers::keypair::KeypairProvider;
pub use crate::state::{FlowState, Notice};
pub use crate::types::{
    Lamports, PendingTransaction, ProviderKind, ReclaimReceipt, ReclaimableItem, ScanResult,
    WalletSession,
};
