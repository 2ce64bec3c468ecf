//! Order request types.
//!
//! Orders are stored exactly as the client sends them, so there is no
//! `Order` struct here: only the pieces a handler reads.

use serde::Deserialize;

use crate::store::{Document, Filter};

/// Query string of `GET /orders`.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub email: Option<String>,
}

impl OrdersQuery {
    /// Exact match on `email` when given, otherwise every order.
    pub fn filter(&self) -> Filter {
        match &self.email {
            Some(email) => Filter::all().eq("email", email.as_str()),
            None => Filter::all(),
        }
    }
}

/// Body of `PATCH /orders/{id}`.
///
/// # JSON Example
///
/// ```json
/// { "status": "confirmed" }
/// ```
///
/// Any other members are ignored.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

impl StatusUpdate {
    /// The `$set` document: `status` and nothing else.
    pub fn into_set(self) -> Document {
        let mut set = Document::new();
        set.insert("status".to_string(), self.status.into());
        set
    }
}
