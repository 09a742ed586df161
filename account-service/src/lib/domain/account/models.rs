use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordRuleError;
use crate::account::errors::UsernameError;

/// Unique identifier for an account (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generates a new random AccountId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an AccountId from a string representation
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AccountIdError::InvalidFormat(s.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated username
///
/// Must be 1-32 characters, consisting only of alphanumeric characters,
/// underscores, and hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 1;
    const MAX_LENGTH: usize = 32;

    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.len();

        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email_address::EmailAddress::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::InvalidFormat(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext password that passed the length rule
///
/// Debug output never shows the contents.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    pub fn new(password: String) -> Result<Self, PasswordRuleError> {
        let length = password.len();

        if length < Self::MIN_LENGTH {
            return Err(PasswordRuleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(\"****\")")
    }
}

/// Account aggregate
///
/// `confirmed` starts false at signup and flips once the email address is
/// proven via a confirmation token. The password hash stays inside the
/// domain; response types never carry it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub username: Username,
    pub birthday: Option<NaiveDate>,
    pub password_hash: String,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to register a new account
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
    pub birthday: Option<NaiveDate>,
}

impl SignupCommand {
    pub fn new(
        email: EmailAddress,
        username: Username,
        password: Password,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            email,
            username,
            password,
            birthday,
        }
    }
}

/// Result of a successful signin: the bearer token and the account it grants
#[derive(Debug, Clone)]
pub struct SigninGrant {
    pub token: String,
    pub account: Account,
}

/// Receipt for a dispatched confirmation email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub preview_url: Option<String>,
}
