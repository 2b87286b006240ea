//! Shared type definitions and newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tracked casino account.
///
/// The backend may send either a number or a string; both shapes are kept
/// as-is so the id round-trips into the claim path unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Number(n) => write!(f, "{}", n),
            AccountId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        AccountId::Number(id)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        AccountId::Text(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        AccountId::Text(id)
    }
}

/// Coin balance of an account (for clarity in function signatures)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(pub f64);

impl Coins {
    pub fn new(amount: f64) -> Self {
        Coins(amount)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}
