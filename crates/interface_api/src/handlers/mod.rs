//! Request handlers

pub mod customers;
pub mod health;
pub mod insights;
pub mod obligations;
pub mod records;
pub mod transactions;
pub mod treasuries;
