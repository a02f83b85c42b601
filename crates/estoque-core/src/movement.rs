//! # Movement History
//!
//! Append-only log of stock movements plus the filters of the history view.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::types::{Movement, MovementType};

/// Input for a new movement; id and timestamp are assigned by the log.
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub product_id: String,
    pub batch_id: Option<String>,
    pub kind: MovementType,
    pub quantity: i64,
    pub notes: Option<String>,
    pub user_id: Option<String>,
}

impl NewMovement {
    pub fn new(product_id: impl Into<String>, kind: MovementType, quantity: i64) -> Self {
        NewMovement {
            product_id: product_id.into(),
            batch_id: None,
            kind,
            quantity,
            notes: None,
            user_id: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }
}

/// The movement history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MovementLog {
    entries: Vec<Movement>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from existing movements (seed data).
    pub fn from_movements(entries: Vec<Movement>) -> Self {
        MovementLog { entries }
    }

    /// Records a movement happening now.
    pub fn record(&mut self, movement: NewMovement) -> &Movement {
        self.record_at(movement, Utc::now())
    }

    pub fn record_at(&mut self, movement: NewMovement, date: DateTime<Utc>) -> &Movement {
        self.entries.push(Movement {
            id: Uuid::new_v4().to_string(),
            product_id: movement.product_id,
            batch_id: movement.batch_id,
            kind: movement.kind,
            quantity: movement.quantity,
            date,
            notes: movement.notes,
            user_id: movement.user_id,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[Movement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Movements matching `filter`, newest first.
    pub fn filter(&self, filter: &MovementFilter) -> Vec<&Movement> {
        let mut matched: Vec<&Movement> =
            self.entries.iter().filter(|m| filter.matches(m)).collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }

    /// Movements dated within `[start, end]` (inclusive calendar days).
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &Movement> {
        self.entries.iter().filter(move |m| {
            let day = m.date.date_naive();
            day >= start && day <= end
        })
    }
}

/// Filters of the movement history view. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    /// Substring of the product id.
    pub search: String,
    pub kind: Option<MovementType>,
    /// Same calendar day (UTC).
    pub date: Option<NaiveDate>,
    pub user_id: Option<String>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &Movement) -> bool {
        let search = self.search.trim();
        if !search.is_empty() && !movement.product_id.contains(search) {
            return false;
        }

        if let Some(kind) = self.kind {
            if movement.kind != kind {
                return false;
            }
        }

        if let Some(date) = self.date {
            if movement.date.date_naive() != date {
                return false;
            }
        }

        if let Some(user_id) = &self.user_id {
            if movement.user_id.as_deref() != Some(user_id.as_str()) {
                return false;
            }
        }

        true
    }
}
