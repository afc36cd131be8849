//! Obligation entity and state machine
//!
//! Invariant: `done_at` is set if and only if the status is DONE.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ObligationId;

use crate::error::ObligationError;

/// Lifecycle state of an obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObligationStatus {
    Open,
    Done,
}

impl ObligationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObligationStatus::Open => "OPEN",
            ObligationStatus::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(ObligationStatus::Open),
            "DONE" => Some(ObligationStatus::Done),
            _ => None,
        }
    }
}

/// A business payable owed to an external party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obligation {
    /// Unique identifier
    pub id: ObligationId,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Amount owed; never negative
    pub amount: Decimal,
    /// Who is owed
    pub party_name: Option<String>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Lifecycle state
    pub status: ObligationStatus,
    /// Set exactly when status is DONE
    pub done_at: Option<DateTime<Utc>>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Obligation {
    /// Creates an open obligation
    pub fn new(title: impl Into<String>, amount: Decimal) -> Result<Self, ObligationError> {
        if amount < Decimal::ZERO {
            return Err(ObligationError::InvalidAmount(amount));
        }
        let now = Utc::now();
        Ok(Self {
            id: ObligationId::new_v7(),
            title: title.into(),
            description: None,
            amount,
            party_name: None,
            due_date: None,
            status: ObligationStatus::Open,
            done_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the owed party
    pub fn with_party(mut self, party_name: impl Into<String>) -> Self {
        self.party_name = Some(party_name.into());
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Marks the obligation settled, stamping `done_at`
    ///
    /// # Errors
    ///
    /// `AlreadyDone` if it is already settled.
    pub fn mark_done(&mut self) -> Result<(), ObligationError> {
        if self.status == ObligationStatus::Done {
            return Err(ObligationError::AlreadyDone(self.id));
        }
        self.status = ObligationStatus::Done;
        self.done_at = Some(Utc::now());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reopens a settled obligation, clearing `done_at`
    ///
    /// # Errors
    ///
    /// `AlreadyOpen` if it is not settled.
    pub fn reopen(&mut self) -> Result<(), ObligationError> {
        if self.status == ObligationStatus::Open {
            return Err(ObligationError::AlreadyOpen(self.id));
        }
        self.status = ObligationStatus::Open;
        self.done_at = None;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Input for creating an obligation
#[derive(Debug, Clone, Deserialize)]
pub struct NewObligation {
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub party_name: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl NewObligation {
    /// Validates the amount and builds the obligation
    pub fn build(self) -> Result<Obligation, ObligationError> {
        let mut obligation = Obligation::new(self.title, self.amount)?;
        if let Some(party_name) = self.party_name {
            obligation = obligation.with_party(party_name);
        }
        if let Some(due_date) = self.due_date {
            obligation = obligation.with_due_date(due_date);
        }
        obligation.description = self.description;
        obligation.notes = self.notes;
        Ok(obligation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_obligation_is_open() {
        let obligation = Obligation::new("Rent", dec!(2000)).unwrap();
        assert_eq!(obligation.status, ObligationStatus::Open);
        assert!(obligation.done_at.is_none());
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(matches!(
            Obligation::new("Bad", dec!(-1)),
            Err(ObligationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_done_sets_done_at() {
        let mut obligation = Obligation::new("Rent", dec!(2000)).unwrap();
        obligation.mark_done().unwrap();

        assert_eq!(obligation.status, ObligationStatus::Done);
        assert!(obligation.done_at.is_some());
    }

    #[test]
    fn test_double_done_fails() {
        let mut obligation = Obligation::new("Rent", dec!(2000)).unwrap();
        obligation.mark_done().unwrap();

        assert!(matches!(
            obligation.mark_done(),
            Err(ObligationError::AlreadyDone(_))
        ));
    }

    #[test]
    fn test_reopen_clears_done_at() {
        let mut obligation = Obligation::new("Rent", dec!(2000)).unwrap();
        obligation.mark_done().unwrap();
        obligation.reopen().unwrap();

        assert_eq!(obligation.status, ObligationStatus::Open);
        assert!(obligation.done_at.is_none());
    }

    #[test]
    fn test_reopen_when_open_fails() {
        let mut obligation = Obligation::new("Rent", dec!(2000)).unwrap();
        assert!(matches!(
            obligation.reopen(),
            Err(ObligationError::AlreadyOpen(_))
        ));
    }
}
