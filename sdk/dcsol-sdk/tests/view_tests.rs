use dcsol_sdk::state::FlowState;
use dcsol_sdk::types::{Lamports, ProviderKind, ReclaimableItem, ScanResult, WalletSession};
use dcsol_sdk::view::{format_sol, render, Body};
use serde_json::{json, Map};
use solana_sdk::pubkey::Pubkey;

fn session() -> WalletSession {
    WalletSession::new(Pubkey::new_unique(), ProviderKind::Solflare)
}

fn scan() -> ScanResult {
    ScanResult {
        items: vec![
            ReclaimableItem {
                address: "Acct1".to_string(),
                amount: json!("0.002039280"),
                lamports: Lamports(2_039_280),
                extra: Map::new(),
            },
            ReclaimableItem {
                address: "Acct2".to_string(),
                amount: json!("0.5"),
                lamports: Lamports(500_000_000),
                extra: Map::new(),
            },
        ],
        total_reclaimable: Lamports(502_039_280),
    }
}

#[test]
fn test_disconnected_prompts_for_wallet() {
    let screen = render(&FlowState::Disconnected);

    assert!(screen.header.is_none());
    match screen.body {
        Body::ConnectPrompt { button, .. } => {
            assert_eq!(button.label, "Connect Solana Wallet");
            assert!(button.enabled);
        },
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn test_loading_states() {
    assert_eq!(
        render(&FlowState::Connecting).body,
        Body::Loading {
            caption: "Connecting wallet...".to_string()
        }
    );
    assert_eq!(
        render(&FlowState::Scanning { session: session() }).body,
        Body::Loading {
            caption: "Scanning wallet...".to_string()
        }
    );
}

#[test]
fn test_header_shows_short_address() {
    let session = session();
    let screen = render(&FlowState::Idle {
        session: session.clone(),
    });

    let header = screen.header.unwrap();
    let full = session.address.to_string();
    assert_eq!(header.label, format!("{}...{}", &full[..8], &full[full.len() - 8..]));
    assert_eq!(header.disconnect.label, "Disconnect");
}

#[test]
fn test_items_rows_and_total() {
    let screen = render(&FlowState::HasItems {
        session: session(),
        scan: scan(),
    });

    match &screen.body {
        Body::Items { total, rows, reclaim } => {
            assert_eq!(total, "0.502039280 SOL");
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].address, "Acct1");
            assert_eq!(rows[0].amount, "0.002039280 SOL");
            assert_eq!(rows[1].amount, "0.500000000 SOL");
            assert_eq!(reclaim.label, "Reclaim 0.502039280 SOL");
            assert!(reclaim.enabled);
        },
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn test_reclaim_button_disabled_while_processing() {
    let screen = render(&FlowState::Reclaiming {
        session: session(),
        scan: scan(),
    });

    let button = screen.reclaim_button().unwrap();
    assert_eq!(button.label, "Processing...");
    assert!(!button.enabled);
    assert_eq!(screen.total(), Some("0.502039280 SOL"));
}

#[test]
fn test_empty_offers_rescan() {
    let screen = render(&FlowState::Empty { session: session() });

    assert!(screen.reclaim_button().is_none());
    match screen.body {
        Body::Empty { message, rescan } => {
            assert_eq!(message, "No eligible items found to reclaim");
            assert_eq!(rescan.label, "Scan Again");
        },
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn test_format_sol_keeps_nine_decimals() {
    assert_eq!(format_sol(Lamports(0)), "0.000000000 SOL");
    assert_eq!(format_sol(Lamports(1_000_000_000)), "1.000000000 SOL");
}
