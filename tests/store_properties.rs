use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::json;

use org_directory::id;
use org_directory::prelude::*;

/// One raw script step. Targets are slots rather than ids so the script
/// can be generated before the store exists; `resolve` maps a slot onto a
/// live id, or onto a deliberately missing one, against the current
/// snapshot.
#[derive(Debug, Clone)]
enum ScriptStep {
    CreateOrganization {
        name: String,
        description: String,
    },
    DeleteOrganization {
        slot: usize,
    },
    CreateTeam {
        slot: usize,
        name: String,
        description: String,
    },
    DeleteTeam {
        org_slot: usize,
        team_slot: usize,
    },
    AddMember {
        org_slot: usize,
        team_slot: usize,
        name: String,
        email: String,
        role: String,
        admin: bool,
    },
    RemoveMember {
        org_slot: usize,
        team_slot: usize,
        member_slot: usize,
    },
    ToggleAdmin {
        org_slot: usize,
        team_slot: usize,
        member_slot: usize,
    },
    Select {
        slot: usize,
        clear: bool,
    },
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-Za-z][A-Za-z ]{0,14}",
        1 => " {0,3}",
    ]
}

fn email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z]{1,8}@[a-z]{1,8}\\.[a-z]{2,3}",
        1 => "[a-z ]{0,10}",
    ]
}

fn role_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(Role::ALL.map(|role| role.as_str()).to_vec())
            .prop_map(|role| role.to_string()),
        1 => Just("Wizard".to_string()),
    ]
}

fn step_strategy() -> impl Strategy<Value = ScriptStep> {
    prop_oneof![
        (text_strategy(), text_strategy())
            .prop_map(|(name, description)| ScriptStep::CreateOrganization { name, description }),
        any::<usize>().prop_map(|slot| ScriptStep::DeleteOrganization { slot }),
        (any::<usize>(), text_strategy(), text_strategy()).prop_map(|(slot, name, description)| {
            ScriptStep::CreateTeam {
                slot,
                name,
                description,
            }
        }),
        (any::<usize>(), any::<usize>()).prop_map(|(org_slot, team_slot)| ScriptStep::DeleteTeam {
            org_slot,
            team_slot,
        }),
        (
            any::<usize>(),
            any::<usize>(),
            text_strategy(),
            email_strategy(),
            role_strategy(),
            any::<bool>(),
        )
            .prop_map(
                |(org_slot, team_slot, name, email, role, admin)| ScriptStep::AddMember {
                    org_slot,
                    team_slot,
                    name,
                    email,
                    role,
                    admin,
                }
            ),
        (any::<usize>(), any::<usize>(), any::<usize>()).prop_map(
            |(org_slot, team_slot, member_slot)| ScriptStep::RemoveMember {
                org_slot,
                team_slot,
                member_slot,
            }
        ),
        (any::<usize>(), any::<usize>(), any::<usize>()).prop_map(
            |(org_slot, team_slot, member_slot)| ScriptStep::ToggleAdmin {
                org_slot,
                team_slot,
                member_slot,
            }
        ),
        (any::<usize>(), any::<bool>())
            .prop_map(|(slot, clear)| ScriptStep::Select { slot, clear }),
    ]
}

fn org_target(store: &DirectoryStore, slot: usize) -> OrgId {
    let orgs = &store.directory().organizations;
    if orgs.is_empty() || slot % (orgs.len() + 1) == orgs.len() {
        OrgId::new("missing-org").expect("valid id")
    } else {
        orgs[slot % (orgs.len() + 1)].id.clone()
    }
}

fn team_target(store: &DirectoryStore, org_id: &OrgId, slot: usize) -> TeamId {
    match find_organization(store.directory(), org_id) {
        Some(org) if !org.teams.is_empty() && slot % (org.teams.len() + 1) != org.teams.len() => {
            org.teams[slot % (org.teams.len() + 1)].id.clone()
        }
        _ => TeamId::new("missing-team").expect("valid id"),
    }
}

fn member_target(
    store: &DirectoryStore,
    org_id: &OrgId,
    team_id: &TeamId,
    slot: usize,
) -> MemberId {
    match find_team(store.directory(), org_id, team_id) {
        Some(team)
            if !team.members.is_empty() && slot % (team.members.len() + 1) != team.members.len() =>
        {
            team.members[slot % (team.members.len() + 1)].id.clone()
        }
        _ => MemberId::new("missing-member").expect("valid id"),
    }
}

fn resolve(store: &DirectoryStore, step: ScriptStep) -> DirectoryOperation {
    match step {
        ScriptStep::CreateOrganization { name, description } => {
            DirectoryOperation::CreateOrganization {
                draft: OrganizationDraft { name, description },
            }
        }
        ScriptStep::DeleteOrganization { slot } => DirectoryOperation::DeleteOrganization {
            org_id: org_target(store, slot),
        },
        ScriptStep::CreateTeam {
            slot,
            name,
            description,
        } => DirectoryOperation::CreateTeam {
            org_id: org_target(store, slot),
            draft: TeamDraft { name, description },
        },
        ScriptStep::DeleteTeam { org_slot, team_slot } => {
            let org_id = org_target(store, org_slot);
            let team_id = team_target(store, &org_id, team_slot);
            DirectoryOperation::DeleteTeam { org_id, team_id }
        }
        ScriptStep::AddMember {
            org_slot,
            team_slot,
            name,
            email,
            role,
            admin,
        } => {
            let org_id = org_target(store, org_slot);
            let team_id = team_target(store, &org_id, team_slot);
            DirectoryOperation::AddMember {
                org_id,
                team_id,
                draft: MemberDraft {
                    name,
                    email,
                    role,
                    is_admin: admin,
                },
            }
        }
        ScriptStep::RemoveMember {
            org_slot,
            team_slot,
            member_slot,
        } => {
            let org_id = org_target(store, org_slot);
            let team_id = team_target(store, &org_id, team_slot);
            let member_id = member_target(store, &org_id, &team_id, member_slot);
            DirectoryOperation::RemoveMember {
                org_id,
                team_id,
                member_id,
            }
        }
        ScriptStep::ToggleAdmin {
            org_slot,
            team_slot,
            member_slot,
        } => {
            let org_id = org_target(store, org_slot);
            let team_id = team_target(store, &org_id, team_slot);
            let member_id = member_target(store, &org_id, &team_id, member_slot);
            DirectoryOperation::ToggleMemberAdmin {
                org_id,
                team_id,
                member_id,
            }
        }
        ScriptStep::Select { slot, clear } => DirectoryOperation::SelectOrganization {
            org_id: if clear {
                None
            } else {
                Some(org_target(store, slot))
            },
        },
    }
}

proptest! {
    #[test]
    fn random_operation_scripts_never_corrupt_the_directory(
        steps in proptest::collection::vec(step_strategy(), 1..40)
    ) {
        let mut store = DirectoryStore::new();
        for step in steps {
            let operation = resolve(&store, step);
            let before = store.directory().clone();
            let selected_before = store.selected_organization().cloned();

            if store.execute(operation).is_err() {
                prop_assert_eq!(store.directory(), &before);
                prop_assert_eq!(store.selected_organization(), selected_before.as_ref());
            }

            let violations =
                hierarchy_violations(store.directory(), store.selected_organization());
            prop_assert!(violations.is_empty(), "audit found {violations:?}");
        }
    }
}

#[test]
fn a_large_mint_run_stays_collision_free() {
    let mut seen = HashSet::with_capacity(100_000);
    for _ in 0..100_000 {
        assert!(seen.insert(id::token()), "token repeated within one run");
    }
}

#[test]
fn json_operation_payloads_drive_the_store() {
    let mut store = DirectoryStore::new();
    let operation: DirectoryOperation = serde_json::from_value(json!({
        "operation": "create_organization",
        "draft": { "name": "Acme", "description": "Widgets" },
    }))
    .expect("payload should deserialize");

    let result = store.execute(operation).expect("create should apply");
    let notice = notification(&result).expect("creation should notify");
    assert_eq!(notice.title, "Organization Created");
    assert_eq!(store.directory().organizations.len(), 1);
}

#[test]
fn snapshots_serialize_with_camel_case_keys() {
    let mut store = DirectoryStore::new();
    let org = store
        .execute(serde_json::from_value(json!({
            "operation": "create_organization",
            "draft": { "name": "Acme", "description": "Widgets" },
        }))
        .expect("payload should deserialize"))
        .expect("create should apply");
    let org_id = match org {
        DirectoryOperationResult::OrganizationCreated { organization } => organization.id,
        other => panic!("expected organization created, got {other:?}"),
    };
    let team = store
        .create_team(
            &org_id,
            TeamDraft {
                name: "Platform".to_string(),
                description: "Infrastructure".to_string(),
            },
        )
        .expect("team should be created");
    store
        .add_member(
            &org_id,
            &team.id,
            MemberDraft {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: "Developer".to_string(),
                is_admin: true,
            },
        )
        .expect("member should be added");

    let value = serde_json::to_value(store.directory()).expect("snapshot should serialize");
    let member = &value["organizations"][0]["teams"][0]["members"][0];
    assert_eq!(member["isAdmin"], json!(true));
    assert_eq!(member["role"], json!("Developer"));

    let result = DirectoryOperationResult::SelectionChanged { selected: None };
    let tagged = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(tagged["result"], json!("selection_changed"));
}
