//! The verifiable shuffle engine.
//!
//! [`VerifiableShuffle`] ties the protocol together: a committer fixes
//! `(participants, winners)` and a future beacon round, waits for that round to
//! be published, then reveals. The winners are a pure function of the beacon
//! output and the commitment, so anyone can replay them with [`audit_winners`].

pub mod audit;
pub mod config;
pub mod error;
pub mod logging;
pub mod retry;
pub mod service;

pub use audit::audit_winners;
pub use config::{BudgetConfig, ConfigError, DrandConfig, RetryConfig, ShuffleConfig};
pub use error::{ErrorKind, ShuffleError, ValidationError};
pub use logging::{init_logging, LogFormat};
pub use retry::{reveal_with_retry, RetryPolicy};
pub use service::{ShuffleSettings, VerifiableShuffle};
