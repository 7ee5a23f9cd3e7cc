use serde::{Deserialize, Serialize};

/// Session snapshot pushed in by the shell whenever authentication state
/// changes. The core never refreshes tokens itself; it uses whatever the
/// last snapshot carried.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    /// Bearer token attached to every request.
    pub token: String,
    /// Permission strings granted to the current user, e.g. `delete:albums`.
    pub permissions: Vec<String>,
}

impl Session {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
