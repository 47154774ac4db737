use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("`{command}` expects a product id, got {input:?}")]
    MalformedId { command: &'static str, input: String },

    #[error("No product with id {0}")]
    UnknownProduct(u32),

    #[error("Product {0} is not in the cart")]
    NotInCart(u32),

    #[error("{0} Type `retry` to reload.")]
    CatalogUnavailable(String),

    #[error("Invalid {key} value: {reason}")]
    Config { key: &'static str, reason: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
