use serde::{Deserialize, Serialize};

/// Engine endpoint configuration supplied by the caller on every request.
///
/// The adapter never owns or caches connections; persistence of these is the
/// dashboard's concern.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Connection {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { url: url.into(), username: username.into(), password: password.into() }
    }
}

/// Identity of the dashboard user on whose behalf a call is made.
///
/// Absent in service-account mode, where operations run as the connection's
/// own user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }
}
