use std::collections::HashSet;

use anyhow::anyhow;

use crate::error::{LibError, Result};
use crate::models::{Directory, MemberId, OrgId};
use crate::validate;

/// A structural defect in a directory snapshot. Mutations are expected to
/// keep these impossible; the audit exists to catch a bug early rather
/// than to police callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyViolation {
    /// The same identifier appears on more than one entity, in any
    /// combination of kinds.
    DuplicateId { id: String },
    /// A stored entity carries a blank required field.
    BlankField {
        entity: &'static str,
        id: String,
        field: &'static str,
    },
    /// A stored member email no longer passes the shape check.
    MalformedEmail { member_id: MemberId, email: String },
    /// The selection points at an organization that is not in the
    /// directory.
    StaleSelection { org_id: OrgId },
}

impl HierarchyViolation {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "duplicate_id",
            Self::BlankField { .. } => "blank_field",
            Self::MalformedEmail { .. } => "malformed_email",
            Self::StaleSelection { .. } => "stale_selection",
        }
    }

    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "Directory identifiers must be unique",
            Self::BlankField { .. } => "Stored entities must keep their required fields",
            Self::MalformedEmail { .. } => "Stored member emails must stay well formed",
            Self::StaleSelection { .. } => "The selected organization must exist",
        }
    }
}

/// Walks the whole forest once and reports every violation found.
pub fn hierarchy_violations(
    directory: &Directory,
    selected: Option<&OrgId>,
) -> Vec<HierarchyViolation> {
    let mut violations = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut record_id = |id: &str, violations: &mut Vec<HierarchyViolation>| {
        if !seen_ids.insert(id.to_string()) {
            violations.push(HierarchyViolation::DuplicateId { id: id.to_string() });
        }
    };

    for org in &directory.organizations {
        record_id(org.id.as_str(), &mut violations);
        if validate::is_blank(&org.name) {
            violations.push(HierarchyViolation::BlankField {
                entity: "organization",
                id: org.id.to_string(),
                field: "name",
            });
        }
        if validate::is_blank(&org.description) {
            violations.push(HierarchyViolation::BlankField {
                entity: "organization",
                id: org.id.to_string(),
                field: "description",
            });
        }

        for team in &org.teams {
            record_id(team.id.as_str(), &mut violations);
            if validate::is_blank(&team.name) {
                violations.push(HierarchyViolation::BlankField {
                    entity: "team",
                    id: team.id.to_string(),
                    field: "name",
                });
            }
            if validate::is_blank(&team.description) {
                violations.push(HierarchyViolation::BlankField {
                    entity: "team",
                    id: team.id.to_string(),
                    field: "description",
                });
            }

            for member in &team.members {
                record_id(member.id.as_str(), &mut violations);
                if validate::is_blank(&member.name) {
                    violations.push(HierarchyViolation::BlankField {
                        entity: "member",
                        id: member.id.to_string(),
                        field: "name",
                    });
                }
                if !validate::is_valid_email(&member.email) {
                    violations.push(HierarchyViolation::MalformedEmail {
                        member_id: member.id.clone(),
                        email: member.email.clone(),
                    });
                }
            }
        }
    }

    if let Some(org_id) = selected {
        let known = directory.organizations.iter().any(|org| org.id == *org_id);
        if !known {
            violations.push(HierarchyViolation::StaleSelection {
                org_id: org_id.clone(),
            });
        }
    }

    violations
}

/// Fails on the first violation, with the full list preserved in the
/// error source for diagnostics.
pub fn ensure_hierarchy(directory: &Directory, selected: Option<&OrgId>) -> Result<()> {
    let violations = hierarchy_violations(directory, selected);
    match violations.first() {
        None => Ok(()),
        Some(violation) => Err(LibError::invalid_with_code(
            violation.error_code(),
            violation.public_message(),
            anyhow!("directory hierarchy violations: {violations:?}"),
        )),
    }
}
