use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use org_directory::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let interactive = env_flag("DIRECTORY_TOUR_INTERACTIVE");
    let mut store = DirectoryStore::new();

    println!("== Building the directory ==");
    let acme = store
        .create_organization(OrganizationDraft {
            name: "Acme Corporation".to_string(),
            description: "Widgets for every occasion".to_string(),
        })
        .map_err(surface)?;
    let globex = store
        .create_organization(OrganizationDraft {
            name: "Globex".to_string(),
            description: "Consulting across time zones".to_string(),
        })
        .map_err(surface)?;

    let platform = store
        .create_team(
            &acme.id,
            TeamDraft {
                name: "Platform".to_string(),
                description: "Keeps the lights on".to_string(),
            },
        )
        .map_err(surface)?;
    store
        .create_team(
            &globex.id,
            TeamDraft {
                name: "Field Ops".to_string(),
                description: "On-site consulting crews".to_string(),
            },
        )
        .map_err(surface)?;

    let ada = store
        .add_member(
            &acme.id,
            &platform.id,
            MemberDraft {
                name: "Ada Lovelace".to_string(),
                email: "ada@acme.test".to_string(),
                role: "Developer".to_string(),
                is_admin: false,
            },
        )
        .map_err(surface)?;
    print_summaries(&store);

    println!("== Promoting a member ==");
    let promoted = store
        .toggle_member_admin(&acme.id, &platform.id, &ada.id)
        .map_err(surface)?;
    println!("  {} is_admin={}", promoted.name, promoted.is_admin);

    println!("== Narrowing the view with a selection ==");
    store
        .select_organization(Some(acme.id.clone()))
        .map_err(surface)?;
    for org in store.visible_organizations() {
        println!("  visible: {}", org.name);
    }
    store.select_organization(None).map_err(surface)?;

    println!("== Dispatching a JSON operation payload ==");
    let payload = json!({
        "operation": "add_member",
        "org_id": acme.id.clone(),
        "team_id": platform.id.clone(),
        "draft": {
            "name": "Grace Hopper",
            "email": "grace@acme.test",
            "role": "Manager",
            "isAdmin": true,
        },
    });
    let operation: DirectoryOperation =
        serde_json::from_value(payload).context("operation payload should deserialize")?;
    dispatch(&mut store, operation)?;
    print_summaries(&store);

    println!("== A stale id misses cleanly ==");
    let stale = "zzzzzzzzzzzz".parse::<OrgId>().map_err(surface)?;
    match store.delete_organization(&stale) {
        Ok(_) => return Err(anyhow!("the stale id should not resolve")),
        Err(err) => println!("  delete refused: {} (code {})", err.public, err.code),
    }

    println!("== Deleting with confirmation ==");
    if confirm("Delete the Platform team and its members?", interactive)? {
        dispatch(
            &mut store,
            DirectoryOperation::DeleteTeam {
                org_id: acme.id.clone(),
                team_id: platform.id.clone(),
            },
        )?;
    }
    store
        .select_organization(Some(acme.id.clone()))
        .map_err(surface)?;
    if confirm("Delete Acme Corporation entirely?", interactive)? {
        dispatch(
            &mut store,
            DirectoryOperation::DeleteOrganization {
                org_id: acme.id.clone(),
            },
        )?;
    }
    println!(
        "  selection after delete: {:?}",
        store.selected_organization()
    );
    print_summaries(&store);

    ensure_hierarchy(store.directory(), store.selected_organization()).map_err(surface)?;
    println!(
        "== Final audit passed, {} members on record ==",
        total_members(store.directory())
    );
    println!(
        "{}",
        serde_json::to_string_pretty(store.directory()).context("snapshot should serialize")?
    );

    Ok(())
}

fn dispatch(
    store: &mut DirectoryStore,
    operation: DirectoryOperation,
) -> anyhow::Result<DirectoryOperationResult> {
    let result = store.execute(operation).map_err(surface)?;
    if let Some(notice) = notification(&result) {
        match notice.tone {
            Tone::Destructive => println!("  !! {notice}"),
            Tone::Default => println!("  -> {notice}"),
        }
    }
    Ok(result)
}

fn print_summaries(store: &DirectoryStore) {
    for summary in organization_summaries(store.directory()) {
        println!(
            "  {}: {} teams • {} members",
            summary.name, summary.team_count, summary.member_count
        );
    }
}

/// Keeps LibError's public message and code while the source chain stays
/// attached for RUST_LOG=debug runs.
fn surface(err: LibError) -> anyhow::Error {
    err.source.context(format!("{} ({})", err.public, err.code))
}

fn confirm(prompt: &str, interactive: bool) -> anyhow::Result<bool> {
    if !interactive {
        println!("{prompt} [auto-confirmed]");
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    let normalized = answer.trim().to_ascii_lowercase();
    Ok(normalized == "y" || normalized == "yes")
}

fn env_flag(name: &str) -> bool {
    match env::var(name) {
        Ok(value) => {
            let normalized = value.trim().to_ascii_lowercase();
            normalized == "1" || normalized == "true" || normalized == "yes"
        }
        Err(_) => false,
    }
}
