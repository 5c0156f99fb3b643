//! Users and their roles

use super::{require, require_id, Entity, SqlValue, UserRoleType};
use crate::db::schema_sync::{ColumnDefinition, TableSchema};
use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl User {
    pub fn create(name: &str, email: &str, avatar_url: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            avatar_url: avatar_url.map(str::to_string),
        }
    }
}

impl TableSchema for User {
    fn table_name() -> &'static str {
        "users"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("email", "TEXT").not_null(),
            ColumnDefinition::new("avatar_url", "TEXT"),
        ]
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "Name")?;
        require(&self.email, "Email")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            (&self.name).into(),
            (&self.email).into(),
            (&self.avatar_url).into(),
        ]
    }
}

/// A role held by a user; a user may hold several
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_type: UserRoleType,
}

impl UserRole {
    pub fn create(user: &User, role_type: UserRoleType) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            role_type,
        }
    }
}

impl TableSchema for UserRole {
    fn table_name() -> &'static str {
        "user_roles"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("user_id", "TEXT").not_null().references("users"),
            ColumnDefinition::new("type", "TEXT").not_null(),
        ]
    }
}

impl Entity for UserRole {
    const KIND: &'static str = "UserRole";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.user_id, "User ID")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.user_id.into(), self.role_type.as_str().into()]
    }
}
