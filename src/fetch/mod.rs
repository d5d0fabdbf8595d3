//! Network reads against the content store.
//!
//! Everything above this module talks to [`Fetch`], so strategies can run
//! against the real HTTP client or an in-memory double.

mod deadline;
mod http;

pub use deadline::Deadline;
pub use http::HttpFetcher;

use thiserror::Error;

/// Errors from a single GET.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("`{url}` answered with status {code}")]
    Status { url: String, code: u16 },

    #[error("request to `{url}` failed: {message}")]
    Transport { url: String, message: String },

    #[error("could not read body of `{url}`: {message}")]
    Body { url: String, message: String },

    #[error("`{url}`: strategy deadline passed")]
    Timeout { url: String },
}

impl FetchError {
    /// Whether the resource simply does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404, .. })
    }
}


/// A blocking GET returning the response body as text.
///
/// Implementations must be shareable across the rayon pool, since a
/// strategy fetches its files in parallel.
pub trait Fetch: Sync {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        (**self).get(url)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`Fetch`] double used by strategy and resolver tests.

    use super::{Fetch, FetchError};
    use std::{collections::HashMap, sync::Mutex, thread, time::Duration};

    #[derive(Default)]
    pub struct MemoryFetcher {
        routes: HashMap<String, Result<String, u16>>,
        delay: Option<Duration>,
        requests: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` at `url`.
        pub fn route(mut self, url: &str, body: &str) -> Self {
            self.routes.insert(url.to_owned(), Ok(body.to_owned()));
            self
        }

        /// Answer `url` with an error status.
        pub fn status(mut self, url: &str, code: u16) -> Self {
            self.routes.insert(url.to_owned(), Err(code));
            self
        }

        /// Sleep before every answer.
        pub fn delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Every URL requested so far, in request order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub fn requested(&self, prefix: &str) -> bool {
            self.requests().iter().any(|url| url.starts_with(prefix))
        }
    }

    impl Fetch for MemoryFetcher {
        fn get(&self, url: &str) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.to_owned());
            if let Some(delay) = self.delay {
                thread::sleep(delay);
            }
            match self.routes.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(code)) => Err(FetchError::Status {
                    url: url.to_owned(),
                    code: *code,
                }),
                None => Err(FetchError::Status {
                    url: url.to_owned(),
                    code: 404,
                }),
            }
        }
    }
}
