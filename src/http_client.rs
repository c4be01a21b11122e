use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide client. The timeout of the first caller wins.
pub fn http_client(timeout_secs: u64) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("scout_compare/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")
    })
}
