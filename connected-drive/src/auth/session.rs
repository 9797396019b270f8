//! Session types

use serde::Deserialize;

use crate::models::hub::Hub;

/// Access and refresh token pair from a login or refresh response. Opaque to
/// the client otherwise.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

// Token values must not leak into logs.
impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens").finish_non_exhaustive()
    }
}

/// One authenticated context against exactly one hub.
///
/// Immutable value; a new session replaces the old one on every login or
/// refresh, it is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub hub: Hub,
    pub tokens: Tokens,
}
