use crate::error::ProviderError;
use crate::types::ProviderKind;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

/// Contract of a wallet provider (browser extension or local signer).
///
/// This is the external collaborator boundary: the SDK never holds keys
/// itself, it asks the provider to sign and submit. Implementations:
/// 1. Browser wallets bridged from the host page (Phantom, Solflare)
/// 2. [`KeypairProvider`](crate::providers::keypair::KeypairProvider) for CLI/backend use
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Whether the provider is installed/available in this environment.
    fn is_present(&self) -> bool;

    /// Whether the provider already trusts this client.
    fn is_connected(&self) -> bool;

    fn public_key(&self) -> Option<Pubkey>;

    /// Ask the user to approve the connection. Returns the account key.
    async fn connect(&self) -> Result<Pubkey, ProviderError>;

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, ProviderError>;

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ProviderError>;
}
