use anyhow::anyhow;

use crate::validate::FieldErrors;

pub type Result<T> = std::result::Result<T, LibError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
}

/// Structured payload a consumer can act on without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetails {
    /// Field name to message, every failing field reported at once.
    InvalidFields { errors: FieldErrors },
    /// The id a mutation targeted no longer exists; the view should refresh.
    MissingTarget { entity: &'static str, id: String },
}

#[derive(Debug)]
pub struct LibError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub public: &'static str,
    pub details: Option<ErrorDetails>,
    pub source: anyhow::Error,
}

impl LibError {
    pub fn invalid(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            code: "invalid_input",
            public,
            details: None,
            source,
        }
    }

    pub fn invalid_with_code(
        code: &'static str,
        public: &'static str,
        source: anyhow::Error,
    ) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            code,
            public,
            details: None,
            source,
        }
    }

    pub fn invalid_fields(errors: FieldErrors, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            code: "invalid_input",
            public: "One or more fields are invalid",
            details: Some(ErrorDetails::InvalidFields { errors }),
            source,
        }
    }

    pub fn organization_not_found(id: &str) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            code: "organization_not_found",
            public: "Organization not found",
            details: Some(ErrorDetails::MissingTarget {
                entity: "organization",
                id: id.to_string(),
            }),
            source: anyhow!("organization {id} is not present in the directory"),
        }
    }

    pub fn team_not_found(id: &str) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            code: "team_not_found",
            public: "Team not found",
            details: Some(ErrorDetails::MissingTarget {
                entity: "team",
                id: id.to_string(),
            }),
            source: anyhow!("team {id} is not present in the directory"),
        }
    }

    pub fn member_not_found(id: &str) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            code: "member_not_found",
            public: "Member not found",
            details: Some(ErrorDetails::MissingTarget {
                entity: "member",
                id: id.to_string(),
            }),
            source: anyhow!("member {id} is not present in the directory"),
        }
    }
}
