//! Row validation: email syntax checking.
//!
//! The check is syntax-only. There is no DNS lookup, no mailbox verification, and no
//! attempt at full RFC 5322 compliance; the accepted grammar is exactly the one
//! documented on [`email_is_valid`], so tests can encode it precisely.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{NormalizedRecord, ValidationOutcome};

/// Lazy-initialized email syntax regex.
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("invalid email regex")
    })
}

/// Returns `true` when `email` matches the accepted syntax.
///
/// Accepted grammar: a local part of one or more `[A-Za-z0-9._%+-]`, an `@`, a domain
/// of one or more `[A-Za-z0-9.-]`, and a final label after the last dot of at least
/// two letters.
pub fn email_is_valid(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate one normalized row.
///
/// On failure the outcome carries the normalized email value and the 1-indexed source
/// line so the caller can report it. No side effects here; reporting belongs to the
/// caller.
pub fn validate(record: NormalizedRecord, line: usize) -> ValidationOutcome {
    if email_is_valid(&record.email) {
        ValidationOutcome::Valid(record)
    } else {
        let reason = format!("invalid email format '{}'", record.email);
        ValidationOutcome::Invalid {
            record,
            reason,
            line,
        }
    }
}
