//! Off-chain reference model of the stacking ledger.
//!
//! [`StackingModel`] keeps the whole ledger in one value and changes it only
//! through the same operations the contract exposes. It shares its arithmetic
//! with the contract (`stacking::dividends`), so it can serve as an oracle:
//! predict what a transaction will pay out, or replay a sequence of calls and
//! compare against the deployed contract.

pub mod error;
pub mod model;

pub use error::ModelError;
pub use model::{ModelUser, StackingModel};
