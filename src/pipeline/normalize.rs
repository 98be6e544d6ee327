//! Field normalization: deterministic text correction applied before validation.

use crate::types::{NormalizedRecord, RawRecord};

/// Normalize one raw row into a corrected record.
///
/// Rules:
///
/// - strip all whitespace (surrounding and internal) from every field
/// - strip `!` characters from name and surname
/// - lowercase every field
/// - capitalize the first letter of name and surname
/// - if the surname contains an apostrophe, capitalize the letter immediately
///   following the first apostrophe ("o'brien" -> "O'Brien")
///
/// Pure and total: never fails, and idempotent (normalizing an already-normalized
/// record yields the same record). Empty fields pass through unchanged; whether they
/// load is decided downstream by validation.
pub fn normalize(raw: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        name: capitalize_first(&clean_name(&raw.name)),
        surname: capitalize_after_apostrophe(&capitalize_first(&clean_name(&raw.surname))),
        email: clean_email(&raw.email),
    }
}

/// Strip whitespace and exclamation marks, then lowercase.
fn clean_name(field: &str) -> String {
    field
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '!')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strip whitespace, then lowercase. Emails keep their punctuation.
fn clean_email(field: &str) -> String {
    field
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn capitalize_first(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize_after_apostrophe(surname: &str) -> String {
    match surname.find('\'') {
        Some(idx) => {
            // idx + 1 is a char boundary: '\'' is one byte.
            let (head, tail) = surname.split_at(idx + 1);
            let mut chars = tail.chars();
            match chars.next() {
                Some(c) => format!("{head}{}{}", c.to_uppercase(), chars.as_str()),
                None => surname.to_string(),
            }
        }
        None => surname.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::types::{NormalizedRecord, RawRecord};

    fn raw(name: &str, surname: &str, email: &str) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
            line: 2,
        }
    }

    #[test]
    fn capitalizes_name_and_surname_and_lowercases_email() {
        let out = normalize(&raw("john", "o'brien", "JOHN@EXAMPLE.COM"));
        assert_eq!(
            out,
            NormalizedRecord {
                name: "John".to_string(),
                surname: "O'Brien".to_string(),
                email: "john@example.com".to_string(),
            }
        );
    }

    #[test]
    fn strips_internal_and_surrounding_whitespace() {
        let out = normalize(&raw("  j o hn ", " smi th", " a b@example.com "));
        assert_eq!(out.name, "John");
        assert_eq!(out.surname, "Smith");
        assert_eq!(out.email, "ab@example.com");
    }

    #[test]
    fn strips_exclamation_marks_from_names_only() {
        let out = normalize(&raw("!john!", "sm!ith", "john@example.com"));
        assert_eq!(out.name, "John");
        assert_eq!(out.surname, "Smith");
    }

    #[test]
    fn only_first_apostrophe_triggers_capitalization() {
        let out = normalize(&raw("ada", "d'arcy'x", "ada@example.com"));
        assert_eq!(out.surname, "D'Arcy'x");
    }

    #[test]
    fn apostrophe_in_name_is_left_alone() {
        let out = normalize(&raw("o'mar", "smith", "omar@example.com"));
        assert_eq!(out.name, "O'mar");
    }

    #[test]
    fn trailing_apostrophe_has_nothing_to_capitalize() {
        let out = normalize(&raw("ada", "brien'", "ada@example.com"));
        assert_eq!(out.surname, "Brien'");
    }

    #[test]
    fn empty_fields_pass_through() {
        let out = normalize(&raw("", "  ", ""));
        assert_eq!(out.name, "");
        assert_eq!(out.surname, "");
        assert_eq!(out.email, "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            raw("john", "o'brien", "JOHN@EXAMPLE.COM"),
            raw(" MIXED case ", "mc donald", "Mixed.Case+tag@Example.Co.UK"),
            raw("!ada!", "love lace", "ada@example.com"),
            raw("", "'", ""),
        ];

        for input in &inputs {
            let once = normalize(input);
            let again = normalize(&RawRecord {
                name: once.name.clone(),
                surname: once.surname.clone(),
                email: once.email.clone(),
                line: input.line,
            });
            assert_eq!(once, again, "normalize not idempotent for {input:?}");
        }
    }
}
