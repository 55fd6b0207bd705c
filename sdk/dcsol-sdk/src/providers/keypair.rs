use crate::core::connection::SolConnection;
use crate::core::provider::WalletProvider;
use crate::error::ProviderError;
use crate::types::ProviderKind;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Provider backed by a local keypair, for CLI and backend use.
///
/// Connecting never prompts. Submission goes through the given
/// [`SolConnection`].
pub struct KeypairProvider {
    keypair: Keypair,
    connection: Arc<dyn SolConnection>,
    connected: AtomicBool,
}

impl KeypairProvider {
    pub fn new(keypair: Keypair, connection: Arc<dyn SolConnection>) -> Self {
        Self {
            keypair,
            connection,
            connected: AtomicBool::new(false),
        }
    }

    /// Load a keypair from a Solana CLI JSON key file.
    pub fn from_file(
        path: &str,
        connection: Arc<dyn SolConnection>,
    ) -> Result<Self, ProviderError> {
        let keypair = solana_sdk::signer::keypair::read_keypair_file(path)
            .map_err(|e| ProviderError::new(format!("failed to read keypair {path}: {e}")))?;
        Ok(Self::new(keypair, connection))
    }
}

#[async_trait]
impl WalletProvider for KeypairProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::None
    }

    fn is_present(&self) -> bool {
        true
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn connect(&self) -> Result<Pubkey, ProviderError> {
        self.connected.store(true, Ordering::Release);
        Ok(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Transaction, ProviderError> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| ProviderError::new(e.to_string()))?;
        Ok(tx)
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ProviderError> {
        self.connection
            .send_transaction(tx)
            .await
            .map_err(|e| ProviderError::new(e.to_string()))
    }
}
