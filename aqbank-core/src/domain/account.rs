//! Account domain model

use serde::{Deserialize, Serialize};

/// A bank account known to an HBCI user
///
/// Passive record; account setup itself happens inside aqhbci-tool4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub bank_code: String,
}

impl Account {
    pub fn new(id: impl Into<String>, bank_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bank_code: bank_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_creation() {
        let account = Account::new("1234567890", "12030000");
        assert_eq!(account.id, "1234567890");
        assert_eq!(account.bank_code, "12030000");
    }
}
