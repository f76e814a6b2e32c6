pub mod accounts;
pub mod balances;
pub mod loans;
