use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use url::form_urlencoded;

use crate::config::FeedConfig;
use crate::error::WatchError;

/// Somewhere to announce status changes.
///
/// `Ok(true)` means the update was accepted, `Ok(false)` that the feed
/// turned it down. Transport failures are errors.
pub trait StatusFeed {
    fn post_update(&self, message: &str) -> Result<bool, WatchError>;
}

/// Posts updates to an HTTP endpoint as a form-encoded `status` field
/// under basic auth, the shape microblogging APIs accept.
pub struct HttpFeed {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl HttpFeed {
    pub fn new(config: &FeedConfig) -> Result<Self, WatchError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Assemble the update request without sending it.
    #[must_use]
    pub fn build_request(&self, message: &str) -> RequestBuilder {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("status", message)
            .finish();
        self.client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
    }
}

impl StatusFeed for HttpFeed {
    fn post_update(&self, message: &str) -> Result<bool, WatchError> {
        let response = self.build_request(message).send()?;
        Ok(response.status().is_success())
    }
}
