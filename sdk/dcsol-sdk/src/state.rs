//! Reclaim flow states and user-facing notices.

use crate::error::ReclaimError;
use crate::types::{ReclaimReceipt, ScanResult, WalletSession};
use std::fmt;

/// Single source of truth for the reclaim screen.
///
/// Each variant carries exactly the data valid in that state, so stale
/// items can't coexist with an in-flight scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Disconnected,
    Connecting,
    /// Connected, nothing scanned (or the last refresh failed)
    Idle { session: WalletSession },
    Scanning { session: WalletSession },
    /// Last scan found reclaimable items
    HasItems {
        session: WalletSession,
        scan: ScanResult,
    },
    /// Last scan found nothing
    Empty { session: WalletSession },
    Reclaiming {
        session: WalletSession,
        scan: ScanResult,
    },
}

impl FlowState {
    pub fn session(&self) -> Option<&WalletSession> {
        match self {
            FlowState::Disconnected | FlowState::Connecting => None,
            FlowState::Idle { session }
            | FlowState::Scanning { session }
            | FlowState::HasItems { session, .. }
            | FlowState::Empty { session }
            | FlowState::Reclaiming { session, .. } => Some(session),
        }
    }

    pub fn scan(&self) -> Option<&ScanResult> {
        match self {
            FlowState::HasItems { scan, .. } | FlowState::Reclaiming { scan, .. } => Some(scan),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session().is_some()
    }

    /// Whether an operation is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            FlowState::Connecting | FlowState::Scanning { .. } | FlowState::Reclaiming { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Disconnected => "disconnected",
            FlowState::Connecting => "connecting",
            FlowState::Idle { .. } => "idle",
            FlowState::Scanning { .. } => "scanning",
            FlowState::HasItems { .. } => "has-items",
            FlowState::Empty { .. } => "empty",
            FlowState::Reclaiming { .. } => "reclaiming",
        }
    }
}

/// Message queued for the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(ReclaimError),
    Reclaimed(ReclaimReceipt),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn error(&self) -> Option<&ReclaimError> {
        match self {
            Notice::Error(e) => Some(e),
            Notice::Reclaimed(_) => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Error(e) => write!(f, "{e}"),
            Notice::Reclaimed(receipt) => write!(
                f,
                "Success! Reclaimed {} SOL.\nSignature: {}",
                receipt.reclaimed, receipt.signature
            ),
        }
    }
}
