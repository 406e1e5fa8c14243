//! HTTP client flavors the generated TypeScript can target.
//!
//! The selector only changes the transport section of the generated file
//! (the `HttpClient` class and the options passed to `request`). Data
//! contracts are rendered the same way for every flavor.
//!
//! # Examples
//!
//! ```
//! use swagger_ts_core::templates::HttpClientType;
//! use std::str::FromStr;
//!
//! let client = HttpClientType::from_str("axios").unwrap();
//! assert_eq!(client, HttpClientType::Axios);
//! assert_eq!(client.as_str(), "axios");
//! assert_eq!(client.to_string(), "axios");
//!
//! // fetch is the default flavor
//! assert_eq!(HttpClientType::default(), HttpClientType::Fetch);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Supported HTTP client implementations for the generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpClientType {
    /// The platform `fetch` API
    #[default]
    Fetch,
    /// The `axios` library
    Axios,
}

impl FromStr for HttpClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fetch" => Ok(HttpClientType::Fetch),
            "axios" => Ok(HttpClientType::Axios),
            _ => Err(format!("Unknown http client type: {}", s)),
        }
    }
}

impl HttpClientType {
    /// Returns the client identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Axios => "axios",
        }
    }

    /// Name of the built-in template holding this client's `HttpClient` class
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Fetch => "http-client-fetch.ts.tera",
            Self::Axios => "http-client-axios.ts.tera",
        }
    }

    /// Returns an iterator over all available client types
    pub fn all() -> impl Iterator<Item = Self> {
        use HttpClientType::*;
        [Fetch, Axios].iter().copied()
    }
}

impl fmt::Display for HttpClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
