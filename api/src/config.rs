use std::env;

use types::{Error, Result};
use url::Url;

pub const API_URL_VAR: &str = "EMPLOYEES_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
}

impl Config {
    /// Resolve the backend address.
    ///
    /// Native builds read `EMPLOYEES_API_URL` at runtime; wasm builds have no
    /// process environment and use the value captured at compile time. With
    /// neither set, the local development backend is assumed.
    pub fn from_env() -> Result<Self> {
        let raw = env::var(API_URL_VAR)
            .ok()
            .or_else(|| option_env!("EMPLOYEES_API_URL").map(String::from))
            .filter(|v| !v.trim().is_empty());

        match raw {
            Some(raw) => Self::with_base_url(&raw),
            None => Ok(Self::default()),
        }
    }

    /// Endpoint paths are joined relative to the base, so it always gets a
    /// trailing slash: `http://host/api` and `http://host/api/` are the same.
    pub fn with_base_url(raw: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(raw.trim()).map_err(|e| Error::Config(format!("{raw}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{raw}: not a base URL")));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
        }
    }
}
