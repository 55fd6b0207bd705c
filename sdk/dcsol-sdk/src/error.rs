use std::time::Duration;
use thiserror::Error;

/// Failures of the HTTP client wrapper.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Transport failed on every attempt the retry policy allowed
    #[error("service unreachable after {attempts} attempt(s): {message}")]
    Unreachable { attempts: u32, message: String },

    /// Non-2xx response; `message` is the server's `error` field or the status line
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx response whose body is not the expected JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

/// A single transport attempt failed before any HTTP status was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Connection(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Failures of the wallet adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("no supported wallet provider detected")]
    WalletUnavailable,

    #[error("connection request rejected by the user")]
    UserRejected,

    #[error("failed to connect wallet: {0}")]
    ConnectFailed(String),

    /// `sign_and_send` called before a provider connected
    #[error("no wallet provider connected")]
    NoProvider,

    #[error("{0}")]
    SigningFailed(String),
}

/// Error reported by a wallet provider implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    /// EIP-1193 style code wallets use for a declined prompt.
    pub const USER_REJECTED: i64 = 4001;

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn rejected() -> Self {
        Self {
            code: Some(Self::USER_REJECTED),
            message: "User rejected the request.".to_string(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(Self::USER_REJECTED)
    }
}

/// User-visible classification of every failure the reclaim flow can surface.
///
/// The `Display` text is what the presentation layer shows verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReclaimError {
    #[error("Please install Phantom or Solflare wallet extension!")]
    WalletUnavailable,

    #[error("Connection rejected. Please approve the connection request.")]
    UserRejected,

    #[error("Failed to connect wallet: {0}")]
    ConnectFailed(String),

    #[error(
        "Network error: could not reach the reclaim service ({0}). \
         Check your connectivity, the API endpoint and its CORS configuration."
    )]
    NetworkUnreachable(String),

    /// Server message, surfaced verbatim
    #[error("{0}")]
    ServerRejected(String),

    #[error("Invalid response from the reclaim service: {0}")]
    InvalidResponse(String),

    #[error("Transaction not allowed")]
    TransactionDisallowed,

    #[error("Transaction failed: {0}")]
    SigningFailed(String),

    #[error("Connect a wallet first")]
    NotConnected,

    #[error("No eligible items found to reclaim")]
    NothingToReclaim,

    #[error("Another wallet operation is still in progress")]
    Busy,

    /// The session changed (disconnect or teardown) while the operation ran
    #[error("Operation abandoned: the wallet session changed")]
    Superseded,
}

impl ReclaimError {
    /// Whether retrying the same action can succeed without user changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReclaimError::UserRejected
                | ReclaimError::NetworkUnreachable(_)
                | ReclaimError::Busy
                | ReclaimError::SigningFailed(_)
        )
    }
}

impl From<NetworkError> for ReclaimError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Unreachable { message, .. } => ReclaimError::NetworkUnreachable(message),
            NetworkError::Rejected { message, .. } => ReclaimError::ServerRejected(message),
            NetworkError::InvalidBody(message) => ReclaimError::InvalidResponse(message),
        }
    }
}

impl From<WalletError> for ReclaimError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::WalletUnavailable => ReclaimError::WalletUnavailable,
            WalletError::UserRejected => ReclaimError::UserRejected,
            WalletError::ConnectFailed(message) => ReclaimError::ConnectFailed(message),
            WalletError::NoProvider => ReclaimError::NotConnected,
            WalletError::SigningFailed(message) => ReclaimError::SigningFailed(message),
        }
    }
}

/// Amount from the service that is not a valid SOL value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid SOL amount: {0}")]
pub struct AmountParseError(pub String);

/// Error raised while loading configuration from the environment.
#[derive(Debug, Error)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, ReclaimError>;
