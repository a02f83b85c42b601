//! # Restock State
//!
//! The products ticked on the restock screen and every list of the session.

use estoque_core::restock::{RestockBook, RestockSelection};

#[derive(Debug, Clone)]
pub struct RestockState {
    pub(crate) selection: RestockSelection,
    pub(crate) book: RestockBook,
}

impl RestockState {
    /// `default_list_name` replaces blank list names.
    pub fn new(default_list_name: &str) -> Self {
        RestockState {
            selection: RestockSelection::new(),
            book: RestockBook::with_default_name(default_list_name),
        }
    }

    pub fn with_book(book: RestockBook) -> Self {
        RestockState {
            selection: RestockSelection::new(),
            book,
        }
    }

    pub fn selection(&self) -> &RestockSelection {
        &self.selection
    }

    pub fn book(&self) -> &RestockBook {
        &self.book
    }
}
