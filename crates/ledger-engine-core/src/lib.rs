pub mod error;
pub mod rounding;
pub mod types;

#[cfg(feature = "balances")]
pub mod balances;

#[cfg(feature = "accounts")]
pub mod accounts;

#[cfg(feature = "loans")]
pub mod loans;

pub use error::LedgerError;
pub use rounding::round_cents;
pub use types::*;

/// Standard result type for all ledger-engine operations
pub type LedgerResult<T> = Result<T, LedgerError>;
