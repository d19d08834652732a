use serde::{Deserialize, Serialize};

use crate::error::{LibError, Result};
use crate::invariants;
use crate::models::{
    Directory, Member, MemberDraft, MemberId, Organization, OrganizationDraft, OrgId, Team,
    TeamDraft, TeamId,
};
use crate::queries;

/// High-level directory actions, one variant per user-facing intent.
///
/// Deletions are applied as soon as they reach the store; consumers that
/// owe the user a confirmation step run it before dispatching.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum DirectoryOperation {
    CreateOrganization {
        draft: OrganizationDraft,
    },
    DeleteOrganization {
        org_id: OrgId,
    },
    CreateTeam {
        org_id: OrgId,
        draft: TeamDraft,
    },
    DeleteTeam {
        org_id: OrgId,
        team_id: TeamId,
    },
    AddMember {
        org_id: OrgId,
        team_id: TeamId,
        draft: MemberDraft,
    },
    RemoveMember {
        org_id: OrgId,
        team_id: TeamId,
        member_id: MemberId,
    },
    ToggleMemberAdmin {
        org_id: OrgId,
        team_id: TeamId,
        member_id: MemberId,
    },
    SelectOrganization {
        org_id: Option<OrgId>,
    },
    VisibleOrganizations,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DirectoryOperationResult {
    OrganizationCreated { organization: Organization },
    OrganizationDeleted { organization: Organization },
    TeamCreated { team: Team },
    TeamDeleted { team: Team },
    MemberAdded { member: Member },
    MemberRemoved { member: Member },
    MemberAdminToggled { member: Member },
    SelectionChanged { selected: Option<OrgId> },
    VisibleOrganizations { organizations: Vec<Organization> },
}

/// Owns the directory and the selection. Every mutation funnels through
/// `&mut self`, so writes serialize naturally and readers only ever see
/// settled snapshots.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    directory: Directory,
    selected_org: Option<OrgId>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store over an existing snapshot, auditing it first so a
    /// bad seed fails loudly instead of surfacing as a later mutation bug.
    pub fn with_directory(directory: Directory) -> Result<Self> {
        invariants::ensure_hierarchy(&directory, None)?;
        Ok(Self {
            directory,
            selected_org: None,
        })
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn selected_organization(&self) -> Option<&OrgId> {
        self.selected_org.as_ref()
    }

    pub fn execute(&mut self, operation: DirectoryOperation) -> Result<DirectoryOperationResult> {
        match operation {
            DirectoryOperation::CreateOrganization { draft } => {
                let organization = self.create_organization(draft)?;
                Ok(DirectoryOperationResult::OrganizationCreated { organization })
            }
            DirectoryOperation::DeleteOrganization { org_id } => {
                let organization = self.delete_organization(&org_id)?;
                Ok(DirectoryOperationResult::OrganizationDeleted { organization })
            }
            DirectoryOperation::CreateTeam { org_id, draft } => {
                let team = self.create_team(&org_id, draft)?;
                Ok(DirectoryOperationResult::TeamCreated { team })
            }
            DirectoryOperation::DeleteTeam { org_id, team_id } => {
                let team = self.delete_team(&org_id, &team_id)?;
                Ok(DirectoryOperationResult::TeamDeleted { team })
            }
            DirectoryOperation::AddMember {
                org_id,
                team_id,
                draft,
            } => {
                let member = self.add_member(&org_id, &team_id, draft)?;
                Ok(DirectoryOperationResult::MemberAdded { member })
            }
            DirectoryOperation::RemoveMember {
                org_id,
                team_id,
                member_id,
            } => {
                let member = self.remove_member(&org_id, &team_id, &member_id)?;
                Ok(DirectoryOperationResult::MemberRemoved { member })
            }
            DirectoryOperation::ToggleMemberAdmin {
                org_id,
                team_id,
                member_id,
            } => {
                let member = self.toggle_member_admin(&org_id, &team_id, &member_id)?;
                Ok(DirectoryOperationResult::MemberAdminToggled { member })
            }
            DirectoryOperation::SelectOrganization { org_id } => {
                let selected = self.select_organization(org_id)?;
                Ok(DirectoryOperationResult::SelectionChanged { selected })
            }
            DirectoryOperation::VisibleOrganizations => {
                let organizations = self.visible_organizations().into_iter().cloned().collect();
                Ok(DirectoryOperationResult::VisibleOrganizations { organizations })
            }
        }
    }

    /// Validates the draft, appends the new organization at the end of
    /// the directory, and returns it with its freshly minted id.
    pub fn create_organization(&mut self, draft: OrganizationDraft) -> Result<Organization> {
        let organization = draft.normalize()?;
        self.directory.organizations.push(organization.clone());
        tracing::info!(
            org_id = %organization.id,
            name = %organization.name,
            "organization created"
        );
        self.assert_consistent();
        Ok(organization)
    }

    /// Removes the organization with everything under it and returns the
    /// removed subtree. A selection pointing at it is cleared.
    pub fn delete_organization(&mut self, org_id: &OrgId) -> Result<Organization> {
        let org_index = self
            .organization_index(org_id)
            .ok_or_else(|| organization_missing(org_id))?;
        let organization = self.directory.organizations.remove(org_index);
        if self.selected_org.as_ref() == Some(org_id) {
            self.selected_org = None;
        }
        tracing::info!(
            org_id = %organization.id,
            teams = organization.team_count(),
            members = organization.member_count(),
            "organization deleted with its teams and members"
        );
        self.assert_consistent();
        Ok(organization)
    }

    /// The organization is resolved before the draft is validated, so a
    /// bad id surfaces as not-found even when the draft is also bad.
    pub fn create_team(&mut self, org_id: &OrgId, draft: TeamDraft) -> Result<Team> {
        let org_index = self
            .organization_index(org_id)
            .ok_or_else(|| organization_missing(org_id))?;
        let team = draft.normalize()?;
        self.directory.organizations[org_index]
            .teams
            .push(team.clone());
        tracing::info!(org_id = %org_id, team_id = %team.id, name = %team.name, "team created");
        self.assert_consistent();
        Ok(team)
    }

    pub fn delete_team(&mut self, org_id: &OrgId, team_id: &TeamId) -> Result<Team> {
        let org_index = self
            .organization_index(org_id)
            .ok_or_else(|| organization_missing(org_id))?;
        let org = &mut self.directory.organizations[org_index];
        let team_slot = org
            .teams
            .iter()
            .position(|team| team.id == *team_id)
            .ok_or_else(|| team_missing(team_id))?;
        let team = org.teams.remove(team_slot);
        tracing::info!(
            org_id = %org_id,
            team_id = %team.id,
            members = team.member_count(),
            "team deleted with its members"
        );
        self.assert_consistent();
        Ok(team)
    }

    pub fn add_member(
        &mut self,
        org_id: &OrgId,
        team_id: &TeamId,
        draft: MemberDraft,
    ) -> Result<Member> {
        let org_index = self
            .organization_index(org_id)
            .ok_or_else(|| organization_missing(org_id))?;
        let org = &mut self.directory.organizations[org_index];
        let team_slot = org
            .teams
            .iter()
            .position(|team| team.id == *team_id)
            .ok_or_else(|| team_missing(team_id))?;
        let member = draft.normalize()?;
        org.teams[team_slot].members.push(member.clone());
        tracing::info!(
            org_id = %org_id,
            team_id = %team_id,
            member_id = %member.id,
            role = %member.role,
            "member added"
        );
        self.assert_consistent();
        Ok(member)
    }

    pub fn remove_member(
        &mut self,
        org_id: &OrgId,
        team_id: &TeamId,
        member_id: &MemberId,
    ) -> Result<Member> {
        let org_index = self
            .organization_index(org_id)
            .ok_or_else(|| organization_missing(org_id))?;
        let org = &mut self.directory.organizations[org_index];
        let team_slot = org
            .teams
            .iter()
            .position(|team| team.id == *team_id)
            .ok_or_else(|| team_missing(team_id))?;
        let team = &mut org.teams[team_slot];
        let member_slot = team
            .members
            .iter()
            .position(|member| member.id == *member_id)
            .ok_or_else(|| member_missing(member_id))?;
        let member = team.members.remove(member_slot);
        tracing::info!(
            org_id = %org_id,
            team_id = %team_id,
            member_id = %member.id,
            "member removed"
        );
        self.assert_consistent();
        Ok(member)
    }

    /// Flips the admin flag and returns the member as stored afterwards.
    pub fn toggle_member_admin(
        &mut self,
        org_id: &OrgId,
        team_id: &TeamId,
        member_id: &MemberId,
    ) -> Result<Member> {
        let org_index = self
            .organization_index(org_id)
            .ok_or_else(|| organization_missing(org_id))?;
        let org = &mut self.directory.organizations[org_index];
        let team_slot = org
            .teams
            .iter()
            .position(|team| team.id == *team_id)
            .ok_or_else(|| team_missing(team_id))?;
        let team = &mut org.teams[team_slot];
        let member_slot = team
            .members
            .iter()
            .position(|member| member.id == *member_id)
            .ok_or_else(|| member_missing(member_id))?;
        let member = &mut team.members[member_slot];
        member.is_admin = !member.is_admin;
        let member = member.clone();
        tracing::info!(
            org_id = %org_id,
            team_id = %team_id,
            member_id = %member.id,
            is_admin = member.is_admin,
            "member admin flag toggled"
        );
        self.assert_consistent();
        Ok(member)
    }

    /// Selecting an unknown organization is rejected up front, so the
    /// stored selection can only ever point at a live entry or nothing.
    pub fn select_organization(&mut self, org_id: Option<OrgId>) -> Result<Option<OrgId>> {
        if let Some(org_id) = &org_id {
            if self.organization_index(org_id).is_none() {
                return Err(organization_missing(org_id));
            }
        }
        self.selected_org = org_id;
        tracing::info!(selected = ?self.selected_org, "organization selection changed");
        self.assert_consistent();
        Ok(self.selected_org.clone())
    }

    pub fn visible_organizations(&self) -> Vec<&Organization> {
        queries::visible_organizations(&self.directory, self.selected_org.as_ref())
    }

    fn organization_index(&self, org_id: &OrgId) -> Option<usize> {
        self.directory
            .organizations
            .iter()
            .position(|org| org.id == *org_id)
    }

    fn assert_consistent(&self) {
        if cfg!(debug_assertions) {
            let violations =
                invariants::hierarchy_violations(&self.directory, self.selected_org.as_ref());
            assert!(
                violations.is_empty(),
                "mutation left the directory inconsistent: {violations:?}"
            );
        }
    }
}

fn organization_missing(org_id: &OrgId) -> LibError {
    tracing::debug!(org_id = %org_id, "organization lookup missed, state unchanged");
    LibError::organization_not_found(org_id.as_str())
}

fn team_missing(team_id: &TeamId) -> LibError {
    tracing::debug!(team_id = %team_id, "team lookup missed, state unchanged");
    LibError::team_not_found(team_id.as_str())
}

fn member_missing(member_id: &MemberId) -> LibError {
    tracing::debug!(member_id = %member_id, "member lookup missed, state unchanged");
    LibError::member_not_found(member_id.as_str())
}
