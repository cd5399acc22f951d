//! Pallet filtering — composes an arbitrary subset of optional request
//! parameters into one conjunctive, parameterized query predicate.
//!
//! The same composer feeds pallet lookup, block, and unblock. Clauses are
//! appended in declaration order and the binding list stays parallel to the
//! placeholders, so positional binding is always correct regardless of which
//! filters are present.

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::error::DecodeError;

/// Recognised filter parameters, in declaration order. Each fragment holds
/// exactly one placeholder.
const FILTERS: &[(&str, &str)] = &[
    ("cookie", " AND product_name = ?"),
    ("after", " AND production_date > ?"),
    ("before", " AND production_date < ?"),
];

/// The optional filters of one request. Ephemeral — lives only for the
/// duration of the request that carried it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    /// Exact product-name match.
    pub cookie: Option<String>,
    /// Production date strictly after this bound.
    pub after: Option<String>,
    /// Production date strictly before this bound.
    pub before: Option<String>,
}

impl FilterRequest {
    fn value_of(&self, name: &str) -> Option<&str> {
        match name {
            "cookie" => self.cookie.as_deref(),
            "after" => self.after.as_deref(),
            "before" => self.before.as_deref(),
            _ => None,
        }
    }

    /// The same window with the cookie filter forced to `cookie`. Block and
    /// unblock take the product name as a mandatory argument and fold it in
    /// here so the predicate is composed identically to lookup.
    pub fn with_cookie(&self, cookie: &str) -> Self {
        Self {
            cookie: Some(cookie.to_string()),
            after: self.after.clone(),
            before: self.before.clone(),
        }
    }
}

/// An always-true base predicate plus zero or more appended filter clauses,
/// with their bound values kept in a parallel list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<&'static str>,
    bindings: Vec<String>,
}

impl Predicate {
    fn new() -> Self {
        Self {
            clauses: Vec::new(),
            bindings: Vec::new(),
        }
    }

    fn push(&mut self, clause: &'static str, value: String) {
        self.clauses.push(clause);
        self.bindings.push(value);
    }

    /// Render the WHERE body: the always-true base followed by every
    /// appended clause.
    pub fn where_sql(&self) -> String {
        let mut sql = String::from("1 = 1");
        for clause in &self.clauses {
            sql.push_str(clause);
        }
        sql
    }

    /// Bound values, in the order their placeholders appear.
    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Decode one present filter value. Date bounds must be an ISO date or
/// timestamp; the cookie name passes through unchanged. Values are stored
/// and compared as ISO-8601 text, which orders lexicographically.
fn decode_value(name: &'static str, raw: &str) -> Result<String, DecodeError> {
    match name {
        "after" | "before" => {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
                || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").is_ok()
            {
                Ok(raw.to_string())
            } else {
                Err(DecodeError::InvalidDate {
                    name,
                    value: raw.to_string(),
                })
            }
        }
        _ => Ok(raw.to_string()),
    }
}

/// Walk the declared filter table and append one clause per present
/// parameter. Absent parameters contribute nothing; a present value that
/// fails to decode rejects the whole request instead of binding a sentinel.
pub fn compose(request: &FilterRequest) -> Result<Predicate, DecodeError> {
    let mut predicate = Predicate::new();
    for &(name, fragment) in FILTERS {
        if let Some(raw) = request.value_of(name) {
            predicate.push(fragment, decode_value(name, raw)?);
        }
    }
    Ok(predicate)
}
