use std::{
    env,
    fmt::Display,
    path::{PathBuf, is_separator},
    str::FromStr,
    time::Duration,
};

use tracing::{info, warn};

use crate::error::AppError;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    pub storage_dir: PathBuf,
    pub cart_slot: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            catalog_url: try_load("SHOP_CATALOG_URL", DEFAULT_CATALOG_URL)?,
            storage_dir: try_load("SHOP_STORAGE_DIR", ".shop")?,
            cart_slot: slot_name(try_load("SHOP_CART_SLOT", cart::CART_SLOT)?)?,
            request_timeout: Duration::from_secs(try_load("SHOP_REQUEST_TIMEOUT_SECS", "10")?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            storage_dir: PathBuf::from(".shop"),
            cart_slot: cart::CART_SLOT.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Slots become `<name>.json` inside the storage directory, so the name must stay a plain file stem.
fn slot_name(name: String) -> Result<String, AppError> {
    let reason = if name.is_empty() {
        "slot name is empty"
    } else if name.chars().any(is_separator) {
        "slot name contains a path separator"
    } else if name == ".." {
        "slot name points outside the storage directory"
    } else {
        return Ok(name);
    };

    warn!("Invalid SHOP_CART_SLOT value: {reason}");

    Err(AppError::Config {
        key: "SHOP_CART_SLOT",
        reason: reason.to_string(),
    })
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    parse_value(
        key,
        var(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }),
    )
}

fn parse_value<T: FromStr>(key: &'static str, raw: String) -> Result<T, AppError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");

        AppError::Config {
            key,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        let secs: u64 = parse_value("SHOP_REQUEST_TIMEOUT_SECS", " 30 ".to_string()).unwrap();

        assert_eq!(secs, 30);
    }

    #[test]
    fn test_parse_invalid() {
        let result: Result<u64, _> = parse_value("SHOP_REQUEST_TIMEOUT_SECS", "soon".to_string());

        assert!(matches!(
            result,
            Err(AppError::Config {
                key: "SHOP_REQUEST_TIMEOUT_SECS",
                ..
            })
        ));
    }

    #[test]
    fn test_slot_name() {
        assert_eq!(slot_name("cart".to_string()).unwrap(), "cart");
        assert_eq!(slot_name("cart.v2".to_string()).unwrap(), "cart.v2");

        for bad in ["", "../x", "nested/cart", "..", "/etc/passwd"] {
            assert!(
                matches!(
                    slot_name(bad.to_string()),
                    Err(AppError::Config {
                        key: "SHOP_CART_SLOT",
                        ..
                    })
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_unset_falls_back() {
        let dir: PathBuf = try_load("SHOP_TEST_SURELY_UNSET_DIR", ".shop").unwrap();

        assert_eq!(dir, PathBuf::from(".shop"));
    }
}
