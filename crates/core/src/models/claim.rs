//! Coin claim models

use crate::AccountId;
use serde::{Deserialize, Serialize};

/// Outcome of `GET /claim_coins/{id}`
///
/// The server body is not modelled; it is kept verbatim for callers that
/// want to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResult {
    pub account_id: AccountId,
    pub body: serde_json::Value,
}
