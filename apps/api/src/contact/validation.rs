use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Raw contact form body as posted by the front end.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// A submission that passed validation. Text fields are trimmed and
/// HTML-escaped; the email is lower-cased.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

const NAME_LEN: (usize, usize) = (2, 100);
const SUBJECT_LEN: (usize, usize) = (5, 200);
const MESSAGE_LEN: (usize, usize) = (10, 1000);

/// Validates every field and reports all failures at once.
pub fn validate_contact(req: &ContactRequest) -> Result<ContactMessage, Vec<FieldError>> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    let subject = req.subject.trim();
    let message = req.message.trim();

    let mut errors = Vec::new();
    check_length(&mut errors, "name", name, NAME_LEN);
    if !EMAIL.is_match(&email) {
        errors.push(FieldError {
            field: "email",
            message: "must be a valid email address".to_string(),
        });
    }
    check_length(&mut errors, "subject", subject, SUBJECT_LEN);
    check_length(&mut errors, "message", message, MESSAGE_LEN);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactMessage {
        id: Uuid::new_v4(),
        name: escape_html(name),
        email,
        subject: escape_html(subject),
        message: escape_html(message),
        received_at: Utc::now(),
    })
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(FieldError {
            field,
            message: format!("must be between {min} and {max} characters"),
        });
    }
}

/// Escapes characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}
