use std::fmt;

use crate::operations::DirectoryOperationResult;

/// Visual weight a consumer should give the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Destructive,
}

/// Ephemeral success notice derived from an applied operation. These are
/// produced on demand and never stored alongside the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: String,
    pub tone: Tone,
}

impl Notification {
    fn new(title: &'static str, description: String) -> Self {
        Self {
            title,
            description,
            tone: Tone::Default,
        }
    }

    fn destructive(title: &'static str, description: String) -> Self {
        Self {
            title,
            description,
            tone: Tone::Destructive,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Maps a successful result to its notification. Selection changes and
/// read-only results stay silent; failures never reach this function
/// because they surface as errors instead of results.
pub fn notification(result: &DirectoryOperationResult) -> Option<Notification> {
    match result {
        DirectoryOperationResult::OrganizationCreated { organization } => Some(Notification::new(
            "Organization Created",
            format!("{} has been successfully created.", organization.name),
        )),
        DirectoryOperationResult::OrganizationDeleted { organization } => {
            Some(Notification::destructive(
                "Organization Deleted",
                format!("{} has been successfully deleted.", organization.name),
            ))
        }
        DirectoryOperationResult::TeamCreated { team } => Some(Notification::new(
            "Team Created",
            format!("{} has been added to the organization.", team.name),
        )),
        DirectoryOperationResult::TeamDeleted { .. } => Some(Notification::destructive(
            "Team Deleted",
            "Team has been successfully deleted.".to_string(),
        )),
        DirectoryOperationResult::MemberAdded { member } => Some(Notification::new(
            "Member Added",
            format!("{} has been added to the team.", member.name),
        )),
        DirectoryOperationResult::MemberRemoved { .. } => Some(Notification::destructive(
            "Member Removed",
            "Member has been successfully removed from the team.".to_string(),
        )),
        DirectoryOperationResult::MemberAdminToggled { .. } => Some(Notification::new(
            "Admin Status Updated",
            "Member admin status has been successfully updated.".to_string(),
        )),
        DirectoryOperationResult::SelectionChanged { .. } => None,
        DirectoryOperationResult::VisibleOrganizations { .. } => None,
    }
}
