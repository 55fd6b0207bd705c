use std::time::Duration;

/// Reclaim service endpoint used when none is configured.
pub const DEFAULT_API_URL: &str = "https://l893o59kbj.execute-api.us-east-1.amazonaws.com/dev";

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Fractional digits of a SOL amount.
pub const SOL_DECIMALS: usize = 9;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// One initial attempt plus a single retry.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

pub const SCAN_PATH: &str = "/scan";
pub const RECLAIM_PATH: &str = "/reclaim";
