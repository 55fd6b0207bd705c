use crate::core::provider::WalletProvider;
use crate::error::{ProviderError, WalletError};
use crate::types::{ProviderKind, WalletSession};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

struct Connected {
    provider: Arc<dyn WalletProvider>,
    session: WalletSession,
}

/// Selects an installed wallet provider and fronts connect/sign/send.
///
/// Providers are tried in the order given; the first one reporting itself
/// present is used.
pub struct WalletAdapter {
    providers: Vec<Arc<dyn WalletProvider>>,
    connected: Mutex<Option<Connected>>,
}

impl WalletAdapter {
    pub fn new(providers: Vec<Arc<dyn WalletProvider>>) -> Self {
        Self {
            providers,
            connected: Mutex::new(None),
        }
    }

    /// Adapter over the usual extension pair, Phantom preferred.
    pub fn with_extensions(
        phantom: Arc<dyn WalletProvider>,
        solflare: Arc<dyn WalletProvider>,
    ) -> Self {
        Self::new(vec![phantom, solflare])
    }

    /// First present provider, if any.
    pub fn detect(&self) -> Option<Arc<dyn WalletProvider>> {
        self.providers.iter().find(|p| p.is_present()).cloned()
    }

    pub fn session(&self) -> Option<WalletSession> {
        self.lock().as_ref().map(|c| c.session.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.lock().is_some()
    }

    /// Connect to the preferred present provider.
    ///
    /// Returns the cached account if already connected. A provider that
    /// already trusts this client is used without prompting.
    pub async fn connect(&self) -> Result<Pubkey, WalletError> {
        if let Some(session) = self.session() {
            debug!("wallet already connected: {}", session.address);
            return Ok(session.address);
        }

        let provider = self.detect().ok_or(WalletError::WalletUnavailable)?;
        let kind = provider.kind();

        let trusted = if provider.is_connected() {
            provider.public_key()
        } else {
            None
        };

        let address = match trusted {
            Some(address) => address,
            None => provider.connect().await.map_err(classify_connect_error)?,
        };

        info!(provider = %kind, "wallet connected: {}", address);
        *self.lock() = Some(Connected {
            provider,
            session: WalletSession::new(address, kind),
        });
        Ok(address)
    }

    /// Sign a serialized transaction with the connected provider and submit it.
    pub async fn sign_and_send(&self, transaction_bytes: &[u8]) -> Result<Signature, WalletError> {
        let provider = self
            .lock()
            .as_ref()
            .map(|c| Arc::clone(&c.provider))
            .ok_or(WalletError::NoProvider)?;

        let tx: Transaction = bincode::deserialize(transaction_bytes).map_err(|e| {
            WalletError::SigningFailed(format!("invalid transaction payload: {e}"))
        })?;

        let signed = provider
            .sign_transaction(tx)
            .await
            .map_err(|e| WalletError::SigningFailed(e.message))?;
        let signature = provider
            .send_transaction(&signed)
            .await
            .map_err(|e| WalletError::SigningFailed(e.message))?;

        info!(provider = %provider.kind(), "transaction submitted: {}", signature);
        Ok(signature)
    }

    /// Forget the session. The provider itself is left untouched.
    pub fn disconnect(&self) {
        if let Some(c) = self.lock().take() {
            debug!("wallet disconnected: {}", c.session.address);
        }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.lock()
            .as_ref()
            .map(|c| c.session.provider_kind)
            .unwrap_or(ProviderKind::None)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Connected>> {
        self.connected
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn classify_connect_error(err: ProviderError) -> WalletError {
    if err.is_user_rejection() {
        WalletError::UserRejected
    } else {
        WalletError::ConnectFailed(err.message)
    }
}
