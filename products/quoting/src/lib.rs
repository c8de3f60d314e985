//! Quote lifecycle for the construction workflow.
//!
//! An entry (unnumbered proposal) is promoted into a numbered proposal, which
//! is then concluded with a price, cancelled, or turned into a contract. The
//! proposal number comes from a single counter row that is only advanced
//! inside the promoting transaction.

pub mod code;
pub mod counter;
pub mod error;
pub mod lifecycle;
pub mod price;
pub mod service;

pub use code::ProposalCode;
pub use counter::SequenceCounter;
pub use error::{LifecycleError, LifecycleResult};
pub use lifecycle::{Event, next_status};
pub use price::{format_cents, parse_price};
pub use service::{LifecycleService, NewDraft};
