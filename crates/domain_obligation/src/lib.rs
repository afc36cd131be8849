//! Obligation Domain
//!
//! Obligations are business payables - money owed to an external party,
//! independent of any customer account. The entity is a two-state machine:
//! OPEN to DONE (stamping `done_at`) and back (clearing it) are the only
//! mutations, and completing an already-completed obligation is an error,
//! never a silent no-op.

pub mod error;
pub mod memory;
pub mod obligation;
pub mod ports;
pub mod service;

pub use error::ObligationError;
pub use memory::InMemoryObligationStore;
pub use obligation::{NewObligation, Obligation, ObligationStatus};
pub use ports::{ObligationQuery, ObligationStore};
pub use service::ObligationService;
