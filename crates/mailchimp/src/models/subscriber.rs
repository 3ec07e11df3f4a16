//! Subscriber identifier derived from an email address

use md5::{Digest, Md5};
use std::fmt;

/// Remote member key: lowercase hex MD5 of the lowercased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Derive the id for an email. Case-insensitive.
    pub fn from_email(email: &str) -> Self {
        let digest = Md5::digest(email.to_lowercase().as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
