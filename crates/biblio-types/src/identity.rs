use serde::{Deserialize, Serialize};

use crate::general::Email;

/// Signed-in user as provided by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: String,
    pub email: Email,
}

/// Current-session identity. `None` means no user is signed in and
/// domain operations must refuse to write.
pub trait Identity {
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Identity fixed for the lifetime of the process (CLI, tests).
#[derive(Debug, Clone)]
pub struct StaticIdentity(UserIdentity);

impl StaticIdentity {
    pub fn new(user: UserIdentity) -> Self {
        Self(user)
    }
}

impl Identity for StaticIdentity {
    fn current_user(&self) -> Option<UserIdentity> {
        Some(self.0.clone())
    }
}

/// Signed-out session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Identity for Anonymous {
    fn current_user(&self) -> Option<UserIdentity> {
        None
    }
}
