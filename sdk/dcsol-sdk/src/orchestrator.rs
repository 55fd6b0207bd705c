//! Connect → scan → reclaim → refresh state machine.

use crate::client::ApiClient;
use crate::error::{ReclaimError, Result};
use crate::state::{FlowState, Notice};
use crate::types::{ProviderKind, ReclaimReceipt, ScanResult, WalletSession};
use crate::wallet::WalletAdapter;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

struct Inner {
    state: FlowState,
    /// Bumped by disconnect/teardown; late completions from an older
    /// generation are dropped.
    generation: u64,
    notices: Vec<Notice>,
    torn_down: bool,
}

/// Orchestrates the wallet reclaim flow.
///
/// `connect`, `scan` and `reclaim` are serialised: one invoked while another
/// is in flight fails with [`ReclaimError::Busy`]. `disconnect` is always
/// accepted and invalidates whatever is in flight.
pub struct Reclaimer {
    client: ApiClient,
    wallet: WalletAdapter,
    inner: Mutex<Inner>,
    op_guard: tokio::sync::Mutex<()>,
}

impl Reclaimer {
    pub fn new(client: ApiClient, wallet: WalletAdapter) -> Self {
        Self {
            client,
            wallet,
            inner: Mutex::new(Inner {
                state: FlowState::Disconnected,
                generation: 0,
                notices: Vec::new(),
                torn_down: false,
            }),
            op_guard: tokio::sync::Mutex::new(()),
        }
    }

    //=========================================================================
    // Queries
    //=========================================================================

    pub fn state(&self) -> FlowState {
        self.lock().state.clone()
    }

    pub fn session(&self) -> Option<WalletSession> {
        self.lock().state.session().cloned()
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.lock().notices)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }

    pub fn wallet(&self) -> &WalletAdapter {
        &self.wallet
    }

    //=========================================================================
    // Operations
    //=========================================================================

    /// Connect the wallet, then scan it.
    ///
    /// Already connected: returns the current session without prompting or
    /// rescanning. A failing follow-up scan is reported as a notice; the
    /// connection itself still succeeds.
    pub async fn connect(&self) -> Result<WalletSession> {
        let _op = self.begin()?;

        let generation = {
            let mut inner = self.lock();
            if let Some(session) = inner.state.session() {
                return Ok(session.clone());
            }
            inner.state = FlowState::Connecting;
            inner.generation
        };
        debug!("connecting wallet");

        let outcome = self.wallet.connect().await;

        let session = {
            let mut inner = self.lock();
            if inner.generation != generation {
                // Disconnected while the prompt was open
                self.wallet.disconnect();
                return Err(ReclaimError::Superseded);
            }
            match outcome {
                Ok(address) => {
                    let session = self
                        .wallet
                        .session()
                        .unwrap_or_else(|| WalletSession::new(address, ProviderKind::None));
                    inner.state = FlowState::Idle {
                        session: session.clone(),
                    };
                    session
                },
                Err(e) => {
                    let err = ReclaimError::from(e);
                    warn!("wallet connection failed: {}", err);
                    inner.state = FlowState::Disconnected;
                    inner.notices.push(Notice::Error(err.clone()));
                    return Err(err);
                },
            }
        };
        info!(provider = %session.provider_kind, "connected {}", session.short_address());

        if let Err(e) = self.run_scan(generation).await {
            debug!("initial scan failed: {}", e);
        }
        Ok(session)
    }

    /// Ask the service which accounts of the connected wallet are reclaimable.
    pub async fn scan(&self) -> Result<ScanResult> {
        let _op = self.begin()?;
        let generation = self.lock().generation;
        self.run_scan(generation).await
    }

    /// Request, sign and submit the reclaim transaction for the current
    /// items, then refresh with exactly one scan.
    pub async fn reclaim(&self) -> Result<ReclaimReceipt> {
        let _op = self.begin()?;

        let (generation, session, scan) = {
            let mut inner = self.lock();
            let current = match &inner.state {
                FlowState::HasItems { session, scan } if !scan.items.is_empty() => {
                    Ok((session.clone(), scan.clone()))
                },
                FlowState::Idle { .. } | FlowState::Empty { .. } | FlowState::HasItems { .. } => {
                    Err(ReclaimError::NothingToReclaim)
                },
                _ => Err(ReclaimError::NotConnected),
            };
            let (session, scan) = match current {
                Ok(current) => current,
                Err(err) => return Err(Self::record(&mut inner, err)),
            };
            inner.state = FlowState::Reclaiming {
                session: session.clone(),
                scan: scan.clone(),
            };
            (inner.generation, session, scan)
        };
        let wallet_address = session.address.to_string();
        info!(
            items = scan.items.len(),
            total = %scan.total_reclaimable,
            "requesting reclaim transaction"
        );

        let pending = self.client.request_reclaim(&wallet_address, &scan.items).await;

        let payload = {
            let mut inner = self.lock();
            if inner.generation != generation {
                return Err(ReclaimError::Superseded);
            }
            let restore = FlowState::HasItems {
                session: session.clone(),
                scan: scan.clone(),
            };
            let payload = match pending {
                Err(e) => Err(ReclaimError::from(e)),
                Ok(pending) if !pending.allowed => Err(ReclaimError::TransactionDisallowed),
                Ok(pending) => pending
                    .decode()
                    .map_err(|e| ReclaimError::InvalidResponse(format!("transaction payload: {e}"))),
            };
            match payload {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!("reclaim aborted before signing: {}", err);
                    inner.state = restore;
                    return Err(Self::record(&mut inner, err));
                },
            }
        };

        let sent = self.wallet.sign_and_send(&payload).await;

        let receipt = {
            let mut inner = self.lock();
            if inner.generation != generation {
                if let Ok(signature) = &sent {
                    warn!("transaction {} landed after the session changed", signature);
                }
                return Err(ReclaimError::Superseded);
            }
            match sent {
                Ok(signature) => {
                    let receipt = ReclaimReceipt {
                        signature,
                        reclaimed: scan.total_reclaimable,
                    };
                    inner.notices.push(Notice::Reclaimed(receipt.clone()));
                    // Pre-reclaim items are no longer trusted
                    inner.state = FlowState::Idle {
                        session: session.clone(),
                    };
                    receipt
                },
                Err(e) => {
                    let err = ReclaimError::from(e);
                    warn!("signing failed: {}", err);
                    inner.state = FlowState::HasItems {
                        session: session.clone(),
                        scan: scan.clone(),
                    };
                    return Err(Self::record(&mut inner, err));
                },
            }
        };
        info!(
            "reclaimed {} SOL in {}",
            receipt.reclaimed, receipt.signature
        );

        if let Err(e) = self.run_scan(generation).await {
            debug!("refresh after reclaim failed: {}", e);
        }
        Ok(receipt)
    }

    /// Drop the session and every derived value. Results of in-flight
    /// operations are discarded when they complete.
    pub fn disconnect(&self) {
        {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state = FlowState::Disconnected;
        }
        self.wallet.disconnect();
        debug!("session cleared");
    }

    /// Disconnect and refuse further operations. Call when the owning view
    /// goes away.
    pub fn teardown(&self) {
        self.lock().torn_down = true;
        self.disconnect();
    }

    //=========================================================================
    // Internals
    //=========================================================================

    fn begin(&self) -> Result<tokio::sync::MutexGuard<'_, ()>> {
        match self.op_guard.try_lock() {
            Ok(guard) => {
                if self.lock().torn_down {
                    return Err(ReclaimError::Superseded);
                }
                Ok(guard)
            },
            Err(_) => {
                debug!("operation rejected: another one is in flight");
                Err(Self::record(&mut self.lock(), ReclaimError::Busy))
            },
        }
    }

    /// Scan for the current session. Caller holds the operation guard.
    async fn run_scan(&self, generation: u64) -> Result<ScanResult> {
        let (session, prior) = {
            let mut inner = self.lock();
            if inner.generation != generation {
                return Err(ReclaimError::Superseded);
            }
            let session = match inner.state.session().cloned() {
                Some(session) => session,
                None => return Err(Self::record(&mut inner, ReclaimError::NotConnected)),
            };
            let prior = std::mem::replace(
                &mut inner.state,
                FlowState::Scanning {
                    session: session.clone(),
                },
            );
            (session, prior)
        };
        debug!("scanning {}", session.address);

        let outcome = match self.client.scan(&session.address.to_string()).await {
            Ok(response) => ScanResult::from_response(response)
                .map_err(|e| ReclaimError::InvalidResponse(e.to_string())),
            Err(e) => Err(ReclaimError::from(e)),
        };

        let mut inner = self.lock();
        if inner.generation != generation {
            return Err(ReclaimError::Superseded);
        }
        match outcome {
            Ok(scan) => {
                info!(
                    items = scan.items.len(),
                    total = %scan.total_reclaimable,
                    "scan complete"
                );
                inner.state = if scan.is_empty() {
                    FlowState::Empty { session }
                } else {
                    FlowState::HasItems {
                        session,
                        scan: scan.clone(),
                    }
                };
                Ok(scan)
            },
            Err(err) => {
                warn!("scan failed: {}", err);
                inner.state = prior;
                Err(Self::record(&mut inner, err))
            },
        }
    }

    fn record(inner: &mut Inner, err: ReclaimError) -> ReclaimError {
        inner.notices.push(Notice::Error(err.clone()));
        err
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
