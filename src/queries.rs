use crate::models::{
    Directory, Member, MemberId, Organization, OrganizationSummary, OrgId, Team, TeamId,
};

/// Applies the selection filter. No selection shows the whole directory,
/// a live selection narrows to that organization, and a stale selection
/// shows nothing until the consumer clears or replaces it.
pub fn visible_organizations<'a>(
    directory: &'a Directory,
    selected: Option<&OrgId>,
) -> Vec<&'a Organization> {
    match selected {
        None => directory.organizations.iter().collect(),
        Some(org_id) => directory
            .organizations
            .iter()
            .filter(|org| org.id == *org_id)
            .collect(),
    }
}

pub fn find_organization<'a>(directory: &'a Directory, org_id: &OrgId) -> Option<&'a Organization> {
    directory.organizations.iter().find(|org| org.id == *org_id)
}

pub fn find_team<'a>(
    directory: &'a Directory,
    org_id: &OrgId,
    team_id: &TeamId,
) -> Option<&'a Team> {
    find_organization(directory, org_id)?
        .teams
        .iter()
        .find(|team| team.id == *team_id)
}

pub fn find_member<'a>(
    directory: &'a Directory,
    org_id: &OrgId,
    team_id: &TeamId,
    member_id: &MemberId,
) -> Option<&'a Member> {
    find_team(directory, org_id, team_id)?
        .members
        .iter()
        .find(|member| member.id == *member_id)
}

/// Members across the whole directory, recomputed on every call.
pub fn total_members(directory: &Directory) -> usize {
    directory
        .organizations
        .iter()
        .map(Organization::member_count)
        .sum()
}

/// One summary per organization, in directory order, with counts derived
/// from the current snapshot.
pub fn organization_summaries(directory: &Directory) -> Vec<OrganizationSummary> {
    directory
        .organizations
        .iter()
        .map(|org| OrganizationSummary {
            id: org.id.clone(),
            name: org.name.clone(),
            description: org.description.clone(),
            team_count: org.team_count(),
            member_count: org.member_count(),
        })
        .collect()
}
