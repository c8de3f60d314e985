//! sea-orm models for the quoting tables.

pub mod contract;
pub mod proposal;
pub mod proposal_counter;
pub mod work;

pub use contract::Entity as Contracts;
pub use proposal::Entity as Proposals;
pub use proposal_counter::Entity as ProposalCounter;
pub use work::Entity as Works;
