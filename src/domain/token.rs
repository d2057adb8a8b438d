/// The shared secret every request must carry as `?token=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues and validates the single access token.
///
/// The token is fixed when the authority is created and never changes for
/// the lifetime of the process: there is no rotation, no expiry and no
/// per-client issuance.
#[derive(Debug, Clone)]
pub struct TokenAuthority {
    current: AccessToken,
}

impl TokenAuthority {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            current: AccessToken(secret.into()),
        }
    }

    /// Returns the currently valid token.
    pub fn issue(&self) -> AccessToken {
        self.current.clone()
    }

    /// True iff `candidate` is exactly the issued token.
    pub fn validate(&self, candidate: &str) -> bool {
        self.current.as_str() == candidate
    }
}
