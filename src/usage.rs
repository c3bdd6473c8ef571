use serde::Deserialize;

use crate::error::Result;
use crate::NatarisApi;

/// Balance and cumulative request count for the authenticated account
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UsageInfo {
    pub balance_usd: f64,
    pub total_requests: u64,
}

impl NatarisApi {
    /// Retrieves the current balance and request count
    pub async fn get_usage(&self) -> Result<UsageInfo> {
        self.get_json("/usage").await
    }
}
