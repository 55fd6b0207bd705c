//! Projection of [`FlowState`] into what the reclaim page shows.

use crate::state::FlowState;
use crate::types::{Lamports, WalletSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub address: String,
    /// e.g. `0.002039280 SOL`
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub enabled: bool,
}

/// Body of the reclaim page below the wallet header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    ConnectPrompt { button: Button, hint: String },
    /// Spinner with a caption
    Loading { caption: String },
    Items {
        total: String,
        rows: Vec<ItemRow>,
        reclaim: Button,
    },
    Empty { message: String, rescan: Button },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletHeader {
    pub label: String,
    pub disconnect: Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub header: Option<WalletHeader>,
    pub body: Body,
}

impl Screen {
    /// The reclaim button, if the screen shows one.
    pub fn reclaim_button(&self) -> Option<&Button> {
        match &self.body {
            Body::Items { reclaim, .. } => Some(reclaim),
            _ => None,
        }
    }

    pub fn total(&self) -> Option<&str> {
        match &self.body {
            Body::Items { total, .. } => Some(total),
            _ => None,
        }
    }
}

pub fn format_sol(amount: Lamports) -> String {
    format!("{amount} SOL")
}

pub fn render(state: &FlowState) -> Screen {
    let header = state.session().map(header);

    let body = match state {
        FlowState::Disconnected => Body::ConnectPrompt {
            button: Button {
                label: "Connect Solana Wallet".to_string(),
                enabled: true,
            },
            hint: "Connect your Phantom or Solflare wallet to get started".to_string(),
        },
        FlowState::Connecting => Body::Loading {
            caption: "Connecting wallet...".to_string(),
        },
        FlowState::Idle { .. } => Body::Empty {
            message: "Scan your wallet for reclaimable rent deposits".to_string(),
            rescan: Button {
                label: "Scan Wallet".to_string(),
                enabled: true,
            },
        },
        FlowState::Scanning { .. } => Body::Loading {
            caption: "Scanning wallet...".to_string(),
        },
        FlowState::HasItems { scan, .. } | FlowState::Reclaiming { scan, .. } => {
            let reclaiming = matches!(state, FlowState::Reclaiming { .. });
            Body::Items {
                total: format_sol(scan.total_reclaimable),
                rows: scan
                    .items
                    .iter()
                    .map(|item| ItemRow {
                        address: item.address.clone(),
                        amount: format_sol(item.lamports),
                    })
                    .collect(),
                reclaim: Button {
                    label: if reclaiming {
                        "Processing...".to_string()
                    } else {
                        format!("Reclaim {}", format_sol(scan.total_reclaimable))
                    },
                    enabled: !reclaiming,
                },
            }
        },
        FlowState::Empty { .. } => Body::Empty {
            message: "No eligible items found to reclaim".to_string(),
            rescan: Button {
                label: "Scan Again".to_string(),
                enabled: true,
            },
        },
    };

    Screen { header, body }
}

fn header(session: &WalletSession) -> WalletHeader {
    WalletHeader {
        label: session.short_address(),
        disconnect: Button {
            label: "Disconnect".to_string(),
            enabled: true,
        },
    }
}
