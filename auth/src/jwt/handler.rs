use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Audience;
use super::claims::Claims;
use super::errors::JwtError;

/// Handler for issuing and verifying signed bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). Verification always pins an expected
/// audience: a token issued for one audience is rejected for any other,
/// even when its signature and expiration are valid.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new token handler with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the expected audience and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiration
    /// * `WrongAudience` - Token was issued for a different audience
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Malformed` - Token is not a structurally valid signed token
    pub fn verify(&self, token: &str, audience: Audience) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[audience.as_str()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidAudience => JwtError::WrongAudience,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed,
            })?;

        Ok(token_data.claims)
    }
}
