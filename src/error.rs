//! Error types for the rebalance trigger

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Pricer not ready, missing feeds: {}", .missing.join(", "))]
    PricerNotReady { missing: Vec<String> },

    #[error("Strategy gateway error ({status}): {body}")]
    Gateway { status: u16, body: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction {hash} rejected: {reason}")]
    TransactionRejected { hash: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
