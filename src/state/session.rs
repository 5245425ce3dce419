#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::{AVATAR_COOKIE, USERNAME_COOKIE};
use crate::util::cookie::{cookie_value, document_cookies};

/// Identity the user joined with.
///
/// The server stores it in cookies on join; the client only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub avatar: String,
}

impl Session {
    /// Extract a session from a cookie header. Both cookies must be present
    /// and non-empty.
    #[must_use]
    pub fn from_cookies(header: &str) -> Option<Self> {
        let username = cookie_value(header, USERNAME_COOKIE).filter(|v| !v.trim().is_empty())?;
        let avatar = cookie_value(header, AVATAR_COOKIE).filter(|v| !v.trim().is_empty())?;
        Some(Self { username, avatar })
    }

    /// Load the session from the browser's cookies.
    #[must_use]
    pub fn load() -> Option<Self> {
        document_cookies().as_deref().and_then(Self::from_cookies)
    }
}
