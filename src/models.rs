use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::error::{LibError, Result};
use crate::id;
use crate::validate;

/// Opaque organization identifier, unique for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrgId(String);

impl OrgId {
    pub fn generate() -> Self {
        Self(id::token())
    }

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LibError::invalid(
                "Identifier must not be blank",
                anyhow!("blank organization id {value:?}"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrgId {
    type Err = LibError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Opaque team identifier; ids are unique across every entity kind, not
/// merely within the owning organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    pub fn generate() -> Self {
        Self(id::token())
    }

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LibError::invalid(
                "Identifier must not be blank",
                anyhow!("blank team id {value:?}"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TeamId {
    type Err = LibError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Opaque member identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn generate() -> Self {
        Self(id::token())
    }

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LibError::invalid(
                "Identifier must not be blank",
                anyhow!("blank member id {value:?}"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MemberId {
    type Err = LibError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Fixed set of member roles. `as_str` is the display form and the only
/// accepted spelling on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Developer,
    Designer,
    Manager,
    Analyst,
    Tester,
    #[serde(rename = "Product Owner")]
    ProductOwner,
}

impl Role {
    pub const ALL: [Self; 6] = [
        Self::Developer,
        Self::Designer,
        Self::Manager,
        Self::Analyst,
        Self::Tester,
        Self::ProductOwner,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Manager => "Manager",
            Self::Analyst => "Analyst",
            Self::Tester => "Tester",
            Self::ProductOwner => "Product Owner",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "Developer" => Some(Self::Developer),
            "Designer" => Some(Self::Designer),
            "Manager" => Some(Self::Manager),
            "Analyst" => Some(Self::Analyst),
            "Tester" => Some(Self::Tester),
            "Product Owner" => Some(Self::ProductOwner),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Team {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Organization {
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Members across all teams, recomputed on every call.
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(Team::member_count).sum()
    }
}

/// The whole forest. Insertion order of organizations, teams and members
/// is display order and survives every unrelated mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

/// Flat per-organization projection with derived counts, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    pub id: OrgId,
    pub name: String,
    pub description: String,
    pub team_count: usize,
    pub member_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDraft {
    pub name: String,
    pub description: String,
}

impl OrganizationDraft {
    /// Validates the draft and, on success, builds the organization with a
    /// freshly minted id and an empty team sequence.
    pub fn normalize(self) -> Result<Organization> {
        let errors = validate::organization_draft(&self);
        if !errors.is_empty() {
            return Err(LibError::invalid_fields(
                errors,
                anyhow!("organization draft failed field validation"),
            ));
        }

        Ok(Organization {
            id: OrgId::generate(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            teams: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
}

impl TeamDraft {
    pub fn normalize(self) -> Result<Team> {
        let errors = validate::team_draft(&self);
        if !errors.is_empty() {
            return Err(LibError::invalid_fields(
                errors,
                anyhow!("team draft failed field validation"),
            ));
        }

        Ok(Team {
            id: TeamId::generate(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            members: Vec::new(),
        })
    }
}

/// Form input for a new member. `role` stays a free string here so the
/// validator can report unknown values alongside the other fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl MemberDraft {
    pub fn normalize(self) -> Result<Member> {
        let errors = validate::member_draft(&self);
        if !errors.is_empty() {
            return Err(LibError::invalid_fields(
                errors,
                anyhow!("member draft failed field validation"),
            ));
        }

        let role = Role::from_name(self.role.trim()).expect("role membership was just validated");
        Ok(Member {
            id: MemberId::generate(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role,
            is_admin: self.is_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorDetails;

    #[test]
    fn normalize_organization_mints_distinct_ids() {
        let first = OrganizationDraft {
            name: "Acme".to_string(),
            description: "Widgets".to_string(),
        }
        .normalize()
        .expect("draft should normalize");
        let second = OrganizationDraft {
            name: "Acme".to_string(),
            description: "Widgets".to_string(),
        }
        .normalize()
        .expect("draft should normalize");

        assert_ne!(first.id, second.id);
        assert!(first.teams.is_empty());
    }

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        let team = TeamDraft {
            name: "  Platform  ".to_string(),
            description: " Keeps the lights on ".to_string(),
        }
        .normalize()
        .expect("draft should normalize");

        assert_eq!(team.name, "Platform");
        assert_eq!(team.description, "Keeps the lights on");
    }

    #[test]
    fn normalize_member_resolves_role_and_defaults_admin_off() {
        let member = MemberDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "Product Owner".to_string(),
            is_admin: false,
        }
        .normalize()
        .expect("draft should normalize");

        assert_eq!(member.role, Role::ProductOwner);
        assert!(!member.is_admin);
    }

    #[test]
    fn normalize_member_rejects_unknown_role() {
        let err = MemberDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "Wizard".to_string(),
            is_admin: false,
        }
        .normalize()
        .expect_err("unknown role should fail");

        match err.details {
            Some(ErrorDetails::InvalidFields { errors }) => {
                assert_eq!(errors.get("role"), Some(&"Please select a valid role"));
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_name("developer"), None);
    }

    #[test]
    fn member_serializes_with_camel_case_admin_flag() {
        let member = Member {
            id: MemberId::new("m1").expect("valid id"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::ProductOwner,
            is_admin: true,
        };

        let value = serde_json::to_value(&member).expect("member should serialize");
        assert_eq!(
            value,
            json!({
                "id": "m1",
                "name": "Ada",
                "email": "ada@example.com",
                "role": "Product Owner",
                "isAdmin": true,
            })
        );
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(OrgId::new("  ").is_err());
        assert!("".parse::<TeamId>().is_err());
        assert!(MemberId::new(" m2 ").is_ok_and(|id| id.as_str() == "m2"));
    }
}
