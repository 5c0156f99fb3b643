//! Accounts, their members, and the libraries they own

use super::{require, require_id, Entity, SqlValue, User};
use crate::db::schema_sync::{ColumnDefinition, TableSchema};
use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
}

impl Account {
    pub fn create(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}

impl TableSchema for Account {
    fn table_name() -> &'static str {
        "accounts"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for Account {
    const KIND: &'static str = "Account";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), (&self.name).into()]
    }
}

/// Membership of a user in an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUser {
    pub id: Uuid,
    pub account_id: Uuid,
    pub user_id: Uuid,
}

impl AccountUser {
    pub fn create(account: &Account, user: &User) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: account.id,
            user_id: user.id,
        }
    }
}

impl TableSchema for AccountUser {
    fn table_name() -> &'static str {
        "account_users"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("account_id", "TEXT").not_null().references("accounts"),
            ColumnDefinition::new("user_id", "TEXT").not_null().references("users"),
        ]
    }
}

impl Entity for AccountUser {
    const KIND: &'static str = "AccountUser";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.account_id, "Account ID")?;
        require_id(&self.user_id, "User ID")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.account_id.into(), self.user_id.into()]
    }
}

/// A collection of programs and instruments, owned by an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
}

impl Library {
    pub fn create(account: &Account, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: account.id,
            name: name.to_string(),
        }
    }
}

impl TableSchema for Library {
    fn table_name() -> &'static str {
        "libraries"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("account_id", "TEXT").not_null().references("accounts"),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for Library {
    const KIND: &'static str = "Library";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.account_id, "Account ID")?;
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.account_id.into(), (&self.name).into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_belongs_to_account() {
        let account = Account::create("bananas");
        let library = Library::create(&account, "palm tree");

        assert_eq!(library.account_id, account.id);
        assert!(library.validate().is_ok());
    }

    #[test]
    fn test_library_requires_account() {
        let mut library = Library::create(&Account::create("bananas"), "palm tree");
        library.account_id = Uuid::nil();

        assert_eq!(
            library.validate().unwrap_err().to_string(),
            "Invalid input: Account ID is required."
        );
    }
}
