pub mod cli;
pub mod config;
pub mod diff;
pub mod entity;
pub mod error;
pub mod filter;
pub mod stats;
pub mod storage;
pub mod transfer;
pub mod warnings;
pub mod workspace;

pub use config::BidashConfig;
pub use error::{BidashError, Result};
pub use workspace::{PersistOutcome, Workspace};
