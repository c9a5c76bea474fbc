use serde::{Deserialize, Serialize};

use crate::db::Document;

pub const DEFAULT_ROLE: &str = "usuario";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,

    pub email: String,

    pub password_hash: String,

    #[serde(default = "default_role")]
    pub role: String,
}

impl Document for User {
    const COLLECTION: &'static str = "users";
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}
