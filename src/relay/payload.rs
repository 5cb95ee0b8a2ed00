//! Posted booking data and its sanitization

use serde::{Deserialize, Serialize};

/// The seven booking fields as posted by the form. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub service: String,
    pub message: String,
}

impl SubmissionPayload {
    /// Decode an `application/x-www-form-urlencoded` body. A body that does
    /// not decode is treated as if no field was posted.
    pub fn from_form_body(body: &[u8]) -> Self {
        serde_urlencoded::from_bytes(body).unwrap_or_else(|err| {
            tracing::debug!("undecodable booking body, using empty fields: {err}");
            Self::default()
        })
    }

    /// Trim every field, HTML-escape all but `email`, and strip `email` down
    /// to characters legal in an address
    pub fn sanitize(&self) -> Sanitized {
        Sanitized(SubmissionPayload {
            name: escape_html(self.name.trim()),
            email: sanitize_email(self.email.trim()),
            phone: escape_html(self.phone.trim()),
            date: escape_html(self.date.trim()),
            time: escape_html(self.time.trim()),
            service: escape_html(self.service.trim()),
            message: escape_html(self.message.trim()),
        })
    }
}

/// A payload whose values are safe to embed in the notification mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized(SubmissionPayload);

impl std::ops::Deref for Sanitized {
    type Target = SubmissionPayload;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Escape the five HTML special characters
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Drop every character that cannot appear in an e-mail address
pub fn sanitize_email(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}
