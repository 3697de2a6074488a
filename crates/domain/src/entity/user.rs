use super::{EntityType, ensure_non_empty, invalid};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Operator,
    Technician,
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Technician => "technician",
            Self::Viewer => "viewer",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Viewer
    }
}

/// A person operating the fleet. Users are never physically removed;
/// `is_deleted` hides them from active listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub is_deleted: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

root_entity!(User, User, check = check_fields);

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role,
            department: None,
            is_deleted: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::User, "first_name", &self.first_name)?;
        ensure_non_empty(EntityType::User, "last_name", &self.last_name)?;

        let well_formed = self
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(invalid(
                EntityType::User,
                format!("invalid email address: {}", self.email),
            ));
        }
        Ok(())
    }
}
