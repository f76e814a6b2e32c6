//! Balance history reconstruction, monthly delta aggregation and drift
//! detection against transaction history.

pub mod deltas;
pub mod drift;
pub mod history;
