//! Helpers for email-based test flows.
//!
//! Tests that exercise email delivery ask the Automation API for a
//! generated address, direct the system under test to send mail there, and
//! then download the raw message for assertions.

use std::sync::Arc;

use applause_domain::{EmailFetchRequest, Result};
use tracing::debug;

use crate::api::AutoApi;

/// Factory for test inboxes backed by Automation API generated addresses.
pub struct EmailHelper {
    auto_api: Arc<AutoApi>,
}

impl EmailHelper {
    pub fn new(auto_api: Arc<AutoApi>) -> Self {
        Self { auto_api }
    }

    /// Create an inbox with a freshly generated address using the given
    /// prefix.
    pub async fn inbox(&self, prefix: &str) -> Result<Inbox> {
        let response = self.auto_api.get_email_address(prefix).await?;
        debug!(address = %response.email_address, "Generated test inbox");
        Ok(Inbox { email_address: response.email_address, auto_api: Arc::clone(&self.auto_api) })
    }
}

/// A generated test inbox.
pub struct Inbox {
    email_address: String,
    auto_api: Arc<AutoApi>,
}

impl Inbox {
    /// The generated address for this inbox.
    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Download the raw RFC 822 content of the latest email sent to this
    /// inbox.
    pub async fn fetch_email(&self) -> Result<Vec<u8>> {
        let request = EmailFetchRequest { email_address: self.email_address.clone() };
        self.auto_api.get_email_content(&request).await
    }
}
