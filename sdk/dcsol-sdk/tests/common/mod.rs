#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dcsol_sdk::core::connection::SolConnection;
use dcsol_sdk::core::provider::WalletProvider;
use dcsol_sdk::core::transport::{HttpRequest, HttpResponse, HttpTransport};
use dcsol_sdk::error::{ProviderError, TransportError};
use dcsol_sdk::types::ProviderKind;
use dcsol_sdk::{ApiClient, RetryPolicy};
use serde_json::{json, Value};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

pub const BASE_URL: &str = "https://reclaim.test/dev";

//=============================================================================
// HTTP transport
//=============================================================================

pub type Scripted = Result<HttpResponse, TransportError>;

enum Reply {
    Ready(Scripted),
    Hang,
}

/// Transport answering from per-path scripts and recording every request.
#[derive(Default)]
pub struct FakeTransport {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, path: &str, reply: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Reply::Ready(reply));
    }

    pub fn push_json(&self, path: &str, status: u16, body: Value) {
        self.push(path, Ok(json_response(status, body)));
    }

    pub fn push_connection_error(&self, path: &str) {
        self.push(
            path,
            Err(TransportError::Connection("Failed to fetch".to_string())),
        );
    }

    /// Next request on `path` never completes.
    pub fn push_hang(&self, path: &str) {
        self.scripts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Reply::Hang);
    }

    /// Hold every request until a permit is added to the returned semaphore.
    pub fn gate(&self) -> Arc<Semaphore> {
        let sem = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&sem));
        sem
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.ends_with(path))
            .count()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let reply = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(|q| q.pop_front());

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Hang) => std::future::pending().await,
            None => panic!("no scripted response for {path}"),
        }
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        status_text: reason(status).to_string(),
        body: serde_json::to_vec(&body).unwrap(),
    }
}

pub fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: reason(status).to_string(),
        body: body.as_bytes().to_vec(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "",
    }
}

pub fn client(transport: &Arc<FakeTransport>) -> ApiClient {
    ApiClient::new(Arc::clone(transport) as Arc<dyn HttpTransport>, BASE_URL)
        .with_retry(RetryPolicy::new(2, Duration::from_secs(1)))
        .with_timeout(Duration::from_secs(20))
}

pub fn scan_body(items: &[(&str, &str)], total: Value) -> Value {
    json!({
        "items": items
            .iter()
            .map(|(address, amount)| json!({ "address": address, "amount": amount }))
            .collect::<Vec<_>>(),
        "totalReclaimable": total,
    })
}

//=============================================================================
// Transactions
//=============================================================================

/// Unsigned transaction paid by `payer`, as the service would build it.
pub fn unsigned_transaction(payer: &Pubkey) -> Transaction {
    let ix = Instruction::new_with_bytes(
        Pubkey::new_unique(),
        &[9, 9, 9],
        vec![AccountMeta::new(*payer, true)],
    );
    let mut message = Message::new(&[ix], Some(payer));
    message.recent_blockhash = Hash::new_unique();
    Transaction::new_unsigned(message)
}

pub fn encoded_transaction(payer: &Pubkey) -> String {
    STANDARD.encode(bincode::serialize(&unsigned_transaction(payer)).unwrap())
}

pub fn reclaim_body(payer: &Pubkey, allowed: bool) -> Value {
    json!({ "transaction": encoded_transaction(payer), "allowed": allowed })
}

//=============================================================================
// Wallet providers
//=============================================================================

/// Scriptable stand-in for a browser wallet extension.
pub struct FakeProvider {
    kind: ProviderKind,
    present: bool,
    trusted: AtomicBool,
    key: Pubkey,
    connect_error: Mutex<Option<ProviderError>>,
    sign_error: Mutex<Option<ProviderError>>,
    send_error: Mutex<Option<ProviderError>>,
    signature: Signature,
    pub connect_calls: AtomicUsize,
    pub sign_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            present: true,
            trusted: AtomicBool::new(false),
            key: Pubkey::new_unique(),
            connect_error: Mutex::new(None),
            sign_error: Mutex::new(None),
            send_error: Mutex::new(None),
            signature: Signature::from([7u8; 64]),
            connect_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
        }
    }

    pub fn phantom() -> Self {
        Self::new(ProviderKind::Phantom)
    }

    pub fn solflare() -> Self {
        Self::new(ProviderKind::Solflare)
    }

    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    pub fn already_trusted(self) -> Self {
        self.trusted.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_key(mut self, key: Pubkey) -> Self {
        self.key = key;
        self
    }

    pub fn failing_connect(self, err: ProviderError) -> Self {
        *self.connect_error.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_sign(self, err: ProviderError) -> Self {
        *self.sign_error.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_send(self, err: ProviderError) -> Self {
        *self.send_error.lock().unwrap() = Some(err);
        self
    }

    pub fn key(&self) -> Pubkey {
        self.key
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn prompts(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn signs(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_present(&self) -> bool {
        self.present
    }

    fn is_connected(&self) -> bool {
        self.trusted.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.is_connected().then_some(self.key)
    }

    async fn connect(&self) -> Result<Pubkey, ProviderError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.connect_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.trusted.store(true, Ordering::SeqCst);
        Ok(self.key)
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, ProviderError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.sign_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(tx)
    }

    async fn send_transaction(&self, _tx: &Transaction) -> Result<Signature, ProviderError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.send_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.signature)
    }
}

//=============================================================================
// RPC connection
//=============================================================================

/// Accepts every transaction and remembers it.
#[derive(Default)]
pub struct RecordingConnection {
    pub sent: Mutex<Vec<Transaction>>,
}

#[async_trait]
impl SolConnection for RecordingConnection {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn std::error::Error + Send + Sync>> {
        self.sent.lock().unwrap().push(tx.clone());
        let signature = tx.signatures.first().ok_or("No signature")?;
        Ok(*signature)
    }
}

pub fn keypair() -> Keypair {
    Keypair::new()
}
