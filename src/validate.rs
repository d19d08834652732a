use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{MemberDraft, OrganizationDraft, Role, TeamDraft};

/// Per-field validation messages, keyed by field name. BTreeMap keeps the
/// report order stable for display and for tests.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Permissive shape check, not RFC 5322: one `@`, no whitespace, and at
/// least one dot in the domain part.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checked against the raw input, so surrounding whitespace fails the
/// shape test rather than being silently forgiven.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn is_known_role(value: &str) -> bool {
    Role::from_name(value.trim()).is_some()
}

/// Collects every failing field rather than stopping at the first, so a
/// form can light up all problems in one pass.
pub fn organization_draft(draft: &OrganizationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&draft.name) {
        errors.insert("name", "Organization name is required");
    }
    if is_blank(&draft.description) {
        errors.insert("description", "Description is required");
    }
    errors
}

pub fn team_draft(draft: &TeamDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&draft.name) {
        errors.insert("name", "Team name is required");
    }
    if is_blank(&draft.description) {
        errors.insert("description", "Description is required");
    }
    errors
}

pub fn member_draft(draft: &MemberDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&draft.name) {
        errors.insert("name", "Name is required");
    }
    if is_blank(&draft.email) {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&draft.email) {
        errors.insert("email", "Please enter a valid email address");
    }
    if is_blank(&draft.role) {
        errors.insert("role", "Role is required");
    } else if !is_known_role(&draft.role) {
        errors.insert("role", "Please select a valid role");
    }
    errors
}
