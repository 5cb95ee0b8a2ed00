//! Format rules applied to field values on top of the required check
//!
//! Rules are plain predicates keyed by field name. Adding a validator for a
//! new field means registering it here; the aggregation in
//! [`BookingForm`](super::BookingForm) never changes.

use std::collections::BTreeMap;
use std::fmt;

use super::field::FormField;

/// A predicate over an already-trimmed, non-empty field value
pub type FormatRule = fn(&str) -> bool;

/// Outcome of validating one field. An empty message means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field: String,
    pub message: String,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.message.is_empty()
    }
}

/// Lookup of format rules by field name
#[derive(Clone)]
pub struct FormatRules {
    rules: BTreeMap<&'static str, FormatRule>,
}

impl fmt::Debug for FormatRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}

impl FormatRules {
    /// A registry with no format rules; only requiredness is checked
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Register (or replace) the rule for a field name
    pub fn with_rule(mut self, field: &'static str, rule: FormatRule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<FormatRule> {
        self.rules.get(field).copied()
    }

    /// Validate a raw value for the named field
    pub fn check(&self, name: &str, value: &str, required: bool) -> String {
        let value = value.trim();
        if value.is_empty() {
            return if required {
                format!("{name} is required")
            } else {
                String::new()
            };
        }
        match self.get(name) {
            Some(rule) if !rule(value) => format!("Please enter a valid {name}"),
            _ => String::new(),
        }
    }

    /// Validate a form field
    pub fn validate_field(&self, field: &FormField) -> ValidationResult {
        ValidationResult {
            field: field.name.clone(),
            message: self.check(&field.name, field.as_text(), field.required),
        }
    }
}

impl Default for FormatRules {
    fn default() -> Self {
        Self::empty()
            .with_rule("email", is_valid_email)
            .with_rule("phone", is_valid_phone)
    }
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let is_part = |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '@');
    if !is_part(local) || !is_part(domain) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// At least seven characters of digits, `+`, `-`, `(`, `)` or whitespace
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().count() >= 7
        && value.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    mod email {
        use super::*;

        #[test]
        fn test_accepts_plain_addresses() {
            assert!(is_valid_email("user@domain.tld"));
            assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
            assert!(is_valid_email("a@b.c"));
        }

        #[test]
        fn test_rejects_missing_at() {
            assert!(!is_valid_email("user.domain.tld"));
        }

        #[test]
        fn test_rejects_missing_dot_after_at() {
            assert!(!is_valid_email("user@domain"));
            assert!(!is_valid_email("first.last@localhost"));
        }

        #[test]
        fn test_rejects_dot_at_domain_edges() {
            assert!(!is_valid_email("user@.com"));
            assert!(!is_valid_email("user@domain."));
        }

        #[test]
        fn test_rejects_second_at() {
            assert!(!is_valid_email("user@@domain.tld"));
            assert!(!is_valid_email("us@er@domain.tld"));
        }

        #[test]
        fn test_rejects_embedded_whitespace() {
            assert!(!is_valid_email("us er@domain.tld"));
            assert!(!is_valid_email("user@dom ain.tld"));
            assert!(!is_valid_email("user@domain.tld\nBcc: x@y.z"));
        }

        #[test]
        fn test_rejects_empty_parts() {
            assert!(!is_valid_email("@domain.tld"));
            assert!(!is_valid_email("user@"));
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn test_accepts_common_formats() {
            assert!(is_valid_phone("5551234"));
            assert!(is_valid_phone("+1 (555) 123-4567"));
            assert!(is_valid_phone("020 7946 0958"));
        }

        #[test]
        fn test_rejects_short_numbers() {
            assert!(!is_valid_phone("555123"));
            assert!(!is_valid_phone("+1"));
        }

        #[test]
        fn test_rejects_letters() {
            assert!(!is_valid_phone("555-CALL-NOW"));
            assert!(!is_valid_phone("5551234x"));
        }
    }

    mod check {
        use super::*;

        #[test]
        fn test_blank_required_value_names_the_field() {
            let rules = FormatRules::default();
            for name in ["name", "email", "phone", "date"] {
                let message = rules.check(name, "   ", true);
                assert_eq!(message, format!("{name} is required"));
            }
        }

        #[test]
        fn test_blank_optional_value_is_valid() {
            let rules = FormatRules::default();
            assert!(rules.check("message", "", false).is_empty());
        }

        #[test]
        fn test_format_failure_message() {
            let rules = FormatRules::default();
            assert_eq!(
                rules.check("email", "not-an-email", true),
                "Please enter a valid email"
            );
            assert_eq!(rules.check("phone", "12", true), "Please enter a valid phone");
        }

        #[test]
        fn test_value_is_trimmed_before_rule() {
            let rules = FormatRules::default();
            assert!(rules.check("email", "  user@domain.tld  ", true).is_empty());
        }

        #[test]
        fn test_field_without_rule_only_needs_a_value() {
            let rules = FormatRules::default();
            assert!(rules.check("date", "whenever", true).is_empty());
        }

        #[test]
        fn test_custom_rule_is_applied() {
            let rules = FormatRules::empty().with_rule("time", |v| v.contains(':'));
            assert_eq!(rules.check("time", "noon", true), "Please enter a valid time");
            assert!(rules.check("time", "12:00", true).is_empty());
            assert!(rules.check("email", "anything", true).is_empty());
        }

        #[test]
        fn test_validate_field_reports_name() {
            let rules = FormatRules::default();
            let field = FormField::text("email", "Email", true, false);
            let result = rules.validate_field(&field);
            assert_eq!(result.field, "email");
            assert!(!result.is_valid());
        }
    }
}
