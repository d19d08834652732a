pub mod error;
pub mod events;
pub mod id;
pub mod invariants;
pub mod models;
pub mod operations;
pub mod queries;
pub mod validate;

pub mod prelude {
    pub use crate::error::{ErrorDetails, ErrorKind, LibError, Result};
    pub use crate::events::{notification, Notification, Tone};
    pub use crate::invariants::{ensure_hierarchy, hierarchy_violations, HierarchyViolation};
    pub use crate::models::{
        Directory, Member, MemberDraft, MemberId, Organization, OrganizationDraft,
        OrganizationSummary, OrgId, Role, Team, TeamDraft, TeamId,
    };
    pub use crate::operations::{DirectoryOperation, DirectoryOperationResult, DirectoryStore};
    pub use crate::queries::{
        find_member, find_organization, find_team, organization_summaries, total_members,
        visible_organizations,
    };
    pub use crate::validate::FieldErrors;
}
