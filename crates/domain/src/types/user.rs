//! User account types
//!
//! Accounts are created by the signup flow; the portal only reads and
//! re-links them as profiles come and go.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ProfileKind, UserType};

/// A portal account. `user_type` and `type_id` together form the weak
/// reference into one of the two profile collections; `type_id` alone is
/// meaningless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,
    pub type_id: Option<String>,
    pub profile_completed: bool,
}

impl UserAccount {
    /// A fresh account with no profile linked.
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            full_name: full_name.into(),
            user_type: UserType::Unset,
            type_id: None,
            profile_completed: false,
        }
    }

    /// Point this account at a profile record.
    pub fn link(&mut self, kind: ProfileKind, type_id: impl Into<String>) {
        self.user_type = kind.into();
        self.type_id = Some(type_id.into());
        self.profile_completed = true;
    }

    /// Tear the profile link down, returning the account to its
    /// just-signed-up state.
    pub fn unlink(&mut self) {
        self.user_type = UserType::Unset;
        self.type_id = None;
        self.profile_completed = false;
    }
}
