//! Environment configuration.

use crate::error::AppError;

/// Server-mode page size when `ADMIN_PAGE_SIZE` is unset.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page size of the firm and user tables.
pub const LISTING_PAGE_SIZE: usize = 5;

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `ADMIN_API_URL`
    pub api_url: String,
    /// `ADMIN_EMAIL`; with the password, signs in at start-up.
    pub email: Option<String>,
    /// `ADMIN_PASSWORD`
    pub password: Option<String>,
    /// `ADMIN_PAGE_SIZE`
    pub page_size: usize,
}

impl Config {
    /// Read the process environment, after loading `.env` files.
    ///
    /// The working directory's `.env` wins over the one in the config
    /// directory; real environment variables win over both.
    pub fn from_env() -> Result<Self, AppError> {
        if dotenvy::dotenv().is_err()
            && let Some(dir) = crate::paths::config_dir()
        {
            let _ = dotenvy::from_path(dir.join(".env"));
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let page_size = match non_empty("ADMIN_PAGE_SIZE") {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::Config(format!(
                        "ADMIN_PAGE_SIZE must be a positive integer, got {:?}",
                        raw
                    )));
                }
            },
        };

        Ok(Self {
            api_url: non_empty("ADMIN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            email: non_empty("ADMIN_EMAIL"),
            password: non_empty("ADMIN_PASSWORD"),
            page_size,
        })
    }

    /// Email and password, when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}
