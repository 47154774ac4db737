use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed cart payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Cart entry keyed {key} holds product {id}")]
    MismatchedEntry { key: u32, id: u32 },

    #[error("Cart entry {0} appears more than once")]
    DuplicateEntry(u32),
}
