use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Hours until an issued token expires. Both audiences share the same window.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Audience a token is scoped to.
///
/// Every issued token carries exactly one audience and verification pins the
/// expected one, so a confirmation token can never pass as an API credential
/// (or the other way around).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Audience {
    /// General API access, issued on successful signin.
    #[serde(rename = "api")]
    Api,

    /// Single-purpose email confirmation, issued during signup.
    #[serde(rename = "email-confirmation")]
    EmailConfirmation,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Api => "api",
            Audience::EmailConfirmation => "email-confirmation",
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Token payload: subject, audience, and the issuance/expiration timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account identifier).
    pub sub: String,

    /// Audience the token is valid for.
    pub aud: Audience,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `ttl_hours` from now.
    pub fn new(subject: impl ToString, audience: Audience, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: subject.to_string(),
            aud: audience,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Claims for an API access token.
    pub fn api(subject: impl ToString) -> Self {
        Self::new(subject, Audience::Api, TOKEN_TTL_HOURS)
    }

    /// Claims for an email confirmation token.
    pub fn email_confirmation(subject: impl ToString) -> Self {
        Self::new(subject, Audience::EmailConfirmation, TOKEN_TTL_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_claims() {
        let claims = Claims::api("account123");

        assert_eq!(claims.sub, "account123");
        assert_eq!(claims.aud, Audience::Api);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 60 * 60);
    }

    #[test]
    fn test_email_confirmation_claims() {
        let claims = Claims::email_confirmation("account123");

        assert_eq!(claims.aud, Audience::EmailConfirmation);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 60 * 60);
    }

    #[test]
    fn test_audience_wire_format() {
        let api = serde_json::to_string(&Audience::Api).unwrap();
        let confirmation = serde_json::to_string(&Audience::EmailConfirmation).unwrap();

        assert_eq!(api, "\"api\"");
        assert_eq!(confirmation, "\"email-confirmation\"");
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = Claims::api("account123");

        let json = serde_json::to_string(&claims).unwrap();
        let decoded: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, claims);
    }
}
