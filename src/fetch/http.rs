//! HTTP fetcher backed by a shared `ureq` agent.

use super::{Fetch, FetchError};
use std::time::Duration;

const USER_AGENT_HEADER: &str = "User-Agent";
const ACCEPT_HEADER: &str = "Accept";

/// Blocking HTTP client with a per-request timeout.
///
/// Non-2xx answers surface as [`FetchError::Status`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(request_timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            agent: build_agent(request_timeout),
            user_agent: user_agent.into(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let mut response = self
            .agent
            .get(url)
            .header(USER_AGENT_HEADER, &self.user_agent)
            .header(ACCEPT_HEADER, "application/json, text/html;q=0.9, */*;q=0.8")
            .call()
            .map_err(|err| classify(url, err))?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|err| FetchError::Body {
                url: url.to_owned(),
                message: err.to_string(),
            })
    }
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    config.into()
}

fn classify(url: &str, err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(code) => FetchError::Status {
            url: url.to_owned(),
            code,
        },
        other => FetchError::Transport {
            url: url.to_owned(),
            message: other.to_string(),
        },
    }
}
