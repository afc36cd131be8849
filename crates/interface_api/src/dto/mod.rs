//! Request and response data transfer objects
//!
//! Domain entities already serialize cleanly, so responses mostly pass
//! them through; this module holds the request bodies that do not map
//! one-to-one onto a domain input, plus the few enriched responses.

pub mod insights;
pub mod records;
pub mod transactions;
pub mod treasuries;
