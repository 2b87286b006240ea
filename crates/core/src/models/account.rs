//! Tracked casino account models

use crate::{AccountId, Coins};
use serde::{Deserialize, Serialize};

/// One tracked account from `GET /api/accounts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub casino: String,
    pub coins: Coins,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, casino: impl Into<String>, coins: f64) -> Self {
        Self {
            id: id.into(),
            casino: casino.into(),
            coins: Coins(coins),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_list_parses_mixed_ids() {
        let accounts: Vec<Account> = serde_json::from_str(
            r#"[{"id": 7, "casino": "Acme", "coins": 120},
                {"id": "b-2", "casino": "Lucky", "coins": 15.5}]"#,
        )
        .unwrap();

        assert_eq!(accounts[0], Account::new(7, "Acme", 120.0));
        assert_eq!(accounts[1].id, AccountId::from("b-2"));
        assert_eq!(accounts[1].coins.as_f64(), 15.5);
    }
}
