use serde::{Deserialize, Serialize};

/// Identity handed to the core by the identity provider. Treated as a
/// constant input for the lifetime of a session, never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(uid: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name,
        }
    }

    /// Author name used on submitted reviews.
    pub fn author_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Anonymous")
    }
}
