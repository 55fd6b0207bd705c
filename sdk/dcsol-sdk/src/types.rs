use crate::core::constants::{LAMPORTS_PER_SOL, SOL_DECIMALS};
pub use crate::error::AmountParseError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

//=============================================================================
// Wallet session
//=============================================================================

/// Which wallet provider backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    Phantom,
    Solflare,
    /// Local keypair or any other non-extension provider
    None,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Phantom => f.write_str("Phantom"),
            ProviderKind::Solflare => f.write_str("Solflare"),
            ProviderKind::None => f.write_str("none"),
        }
    }
}

/// Connected wallet, owned by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Pubkey,
    pub connected: bool,
    pub provider_kind: ProviderKind,
}

impl WalletSession {
    pub fn new(address: Pubkey, provider_kind: ProviderKind) -> Self {
        Self {
            address,
            connected: true,
            provider_kind,
        }
    }

    /// `first8...last8` form used in the wallet header
    pub fn short_address(&self) -> String {
        shorten_address(&self.address.to_string())
    }
}

pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 16 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}...{tail}")
}

//=============================================================================
// Amounts
//=============================================================================

/// Fixed-point SOL amount in lamports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lamports(pub u64);

impl Lamports {
    pub const ZERO: Lamports = Lamports(0);

    /// Parse a decimal SOL string such as `"0.002039280"` exactly.
    pub fn parse_sol(input: &str) -> Result<Self, AmountParseError> {
        let s = input.trim();
        let err = || AmountParseError(input.to_string());

        if s.is_empty() {
            return Err(err());
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        // Digits past lamport precision are only accepted when they are zero
        let (frac, excess) = frac.split_at(frac.len().min(SOL_DECIMALS));
        if excess.chars().any(|c| c != '0') {
            return Err(err());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };
        let frac_lamports: u64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = SOL_DECIMALS);
            padded.parse().map_err(|_| err())?
        };

        whole
            .checked_mul(LAMPORTS_PER_SOL)
            .and_then(|l| l.checked_add(frac_lamports))
            .map(Lamports)
            .ok_or_else(err)
    }

    /// Parse a JSON amount that may be a string or a number.
    pub fn from_json(value: &Value) -> Result<Self, AmountParseError> {
        match value {
            Value::String(s) => Self::parse_sol(s),
            Value::Number(n) => {
                if let Some(whole) = n.as_u64() {
                    return whole
                        .checked_mul(LAMPORTS_PER_SOL)
                        .map(Lamports)
                        .ok_or_else(|| AmountParseError(n.to_string()));
                }
                Self::parse_sol(&n.to_string()).or_else(|_| {
                    n.as_f64()
                        .and_then(Self::from_sol_f64)
                        .ok_or_else(|| AmountParseError(n.to_string()))
                })
            },
            Value::Null => Ok(Lamports::ZERO),
            other => Err(AmountParseError(other.to_string())),
        }
    }

    fn from_sol_f64(sol: f64) -> Option<Self> {
        if !sol.is_finite() || sol < 0.0 {
            return None;
        }
        let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
        if lamports > u64::MAX as f64 {
            return None;
        }
        Some(Lamports(lamports as u64))
    }

    pub fn checked_add(self, other: Lamports) -> Option<Lamports> {
        self.0.checked_add(other.0).map(Lamports)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Formats with nine fractional digits, e.g. `0.002039280`.
impl fmt::Display for Lamports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / LAMPORTS_PER_SOL,
            self.0 % LAMPORTS_PER_SOL,
            width = SOL_DECIMALS
        )
    }
}

impl FromStr for Lamports {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_sol(s)
    }
}

//=============================================================================
// Scan results
//=============================================================================

/// A closed token account still holding a refundable rent deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimableItem {
    pub address: String,
    /// Amount exactly as the service reported it, string or number
    pub amount: Value,
    pub lamports: Lamports,
    /// Fields the service attached beyond address and amount
    pub extra: Map<String, Value>,
}

impl ReclaimableItem {
    /// The item as `/scan` returned it, for echoing back to `/reclaim`.
    pub fn to_wire(&self) -> ItemDto {
        ItemDto {
            address: self.address.clone(),
            amount: self.amount.clone(),
            extra: self.extra.clone(),
        }
    }
}

impl TryFrom<ItemDto> for ReclaimableItem {
    type Error = AmountParseError;

    fn try_from(dto: ItemDto) -> Result<Self, Self::Error> {
        let lamports = Lamports::from_json(&dto.amount)?;
        Ok(Self {
            address: dto.address,
            amount: dto.amount,
            lamports,
            extra: dto.extra,
        })
    }
}

/// Outcome of one scan; replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanResult {
    pub items: Vec<ReclaimableItem>,
    pub total_reclaimable: Lamports,
}

impl ScanResult {
    /// Build from the wire response. The total is the sum of the items; a
    /// server total that disagrees is logged and not used.
    pub fn from_response(response: ScanResponse) -> Result<Self, AmountParseError> {
        let items = response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(ReclaimableItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let total = items
            .iter()
            .try_fold(Lamports::ZERO, |acc, item| acc.checked_add(item.lamports))
            .ok_or_else(|| AmountParseError("total overflows u64 lamports".to_string()))?;

        if let Some(reported) = &response.total_reclaimable {
            match Lamports::from_json(reported) {
                Ok(reported) if reported != total => {
                    tracing::warn!(
                        reported = %reported,
                        computed = %total,
                        "server totalReclaimable disagrees with item sum; using item sum"
                    );
                },
                Ok(_) => {},
                Err(e) => tracing::warn!("unparseable totalReclaimable ignored: {}", e),
            }
        }

        Ok(Self {
            items,
            total_reclaimable: total,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//=============================================================================
// Reclaim transaction
//=============================================================================

/// Server-built transaction awaiting the user's signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingTransaction {
    #[serde(default)]
    pub transaction: String,
    #[serde(default)]
    pub allowed: bool,
}

impl PendingTransaction {
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.transaction.trim())
    }
}

/// Receipt of a submitted reclaim transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimReceipt {
    pub signature: solana_sdk::signature::Signature,
    pub reclaimed: Lamports,
}

//=============================================================================
// Wire format
//=============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub address: String,
    pub amount: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub wallet_address: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    #[serde(default)]
    pub items: Option<Vec<ItemDto>>,
    #[serde(default)]
    pub total_reclaimable: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReclaimRequest {
    pub wallet_address: String,
    pub items: Vec<ItemDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_and_formats_sol() {
        let l = Lamports::parse_sol("0.002039280").unwrap();
        assert_eq!(l, Lamports(2_039_280));
        assert_eq!(l.to_string(), "0.002039280");
        assert_eq!(Lamports::parse_sol("1.5").unwrap(), Lamports(1_500_000_000));
        assert_eq!(Lamports::parse_sol("3").unwrap().to_string(), "3.000000000");
        assert_eq!(Lamports::parse_sol(".25").unwrap(), Lamports(250_000_000));
        assert_eq!(
            Lamports::parse_sol("0.0020392800000").unwrap(),
            Lamports(2_039_280)
        );
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in ["", ".", "-1", "1e5", "0.0000000001", "abc", "1.2.3"] {
            assert!(Lamports::parse_sol(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn json_amounts() {
        assert_eq!(Lamports::from_json(&json!(0)).unwrap(), Lamports::ZERO);
        assert_eq!(
            Lamports::from_json(&json!(0.00203928)).unwrap(),
            Lamports(2_039_280)
        );
        assert_eq!(
            Lamports::from_json(&json!("0.00203928")).unwrap(),
            Lamports(2_039_280)
        );
        assert_eq!(Lamports::from_json(&Value::Null).unwrap(), Lamports::ZERO);
    }

    #[test]
    fn wire_item_kept_verbatim() {
        let raw = json!({ "address": "Acct1", "amount": 0.00203928, "mint": "MintX" });
        let dto: ItemDto = serde_json::from_value(raw.clone()).unwrap();
        let item = ReclaimableItem::try_from(dto).unwrap();

        assert_eq!(item.lamports, Lamports(2_039_280));
        assert_eq!(serde_json::to_value(item.to_wire()).unwrap(), raw);
    }

    #[test]
    fn amount_error_message() {
        let err = Lamports::parse_sol("abc").unwrap_err();
        assert_eq!(err.to_string(), "invalid SOL amount: abc");
    }

    #[test]
    fn shortens_long_addresses_only() {
        assert_eq!(
            shorten_address("Abc12345zzzzzzzzzzzzzzXyz78901"),
            "Abc12345...Xyz78901"
        );
        assert_eq!(shorten_address("Acct1"), "Acct1");
    }
}
