//! Authentication configuration.

/// Configuration for token issuance and verification.
///
/// Constructed once at process start and passed by reference into the
/// token functions; secrets are never read from ambient state per call.
/// Both secrets are mandatory — the server refuses to start without them.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing and verifying access tokens.
    pub access_token_secret: String,
    /// HMAC secret for refresh tokens. Deliberately distinct from the
    /// access secret so compromising one cannot forge the other kind.
    pub refresh_token_secret: String,
    /// Access token lifetime in seconds (default: 900 = 15 minutes).
    pub access_token_lifetime_secs: u64,
    /// Refresh token lifetime in seconds (default: 604_800 = 7 days).
    pub refresh_token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
            access_token_lifetime_secs: 900,
            refresh_token_lifetime_secs: 604_800,
        }
    }
}
