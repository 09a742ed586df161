pub mod http_email;
pub mod log_email;

pub use http_email::HttpEmailNotifier;
pub use log_email::LogNotifier;

/// The link the account owner clicks to confirm their address
pub(crate) fn confirmation_link(base_url: &str, token: &str) -> String {
    format!(
        "{}/accounts/confirm?token={}",
        base_url.trim_end_matches('/'),
        token
    )
}
