//! Then steps for action lifecycle BDD scenarios.

use super::world::{ActionBoardWorld, run_async};
use misekai::action::domain::ActionStatus;
use rstest_bdd_macros::then;

#[then(r#"the action status is "{status}""#)]
fn action_status_is(world: &ActionBoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ActionStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let action = world.action()?;

    if action.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            action.status()
        ));
    }
    Ok(())
}

#[then("the action was auto-backlogged")]
fn action_was_auto_backlogged(world: &ActionBoardWorld) -> Result<(), eyre::Report> {
    if world.last_auto_backlogged != Some(true) {
        return Err(eyre::eyre!(
            "expected auto-backlog, got {:?}",
            world.last_auto_backlogged
        ));
    }
    Ok(())
}

#[then("the action was not auto-backlogged")]
fn action_was_not_auto_backlogged(world: &ActionBoardWorld) -> Result<(), eyre::Report> {
    if world.last_auto_backlogged != Some(false) {
        return Err(eyre::eyre!(
            "expected no auto-backlog, got {:?}",
            world.last_auto_backlogged
        ));
    }
    Ok(())
}

#[then(r#"the action is owned by "{name}""#)]
fn action_owned_by(world: &ActionBoardWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.person(&name)?.user_id();
    let owner = world.action()?.owner_id();
    if owner != expected {
        return Err(eyre::eyre!("expected owner {expected}, found {owner}"));
    }
    Ok(())
}

#[then("the due date history length is {count:usize}")]
fn history_has_entries(world: &ActionBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let id = world.action()?.id();
    let history = run_async(world.handlers.due_date_history(id))
        .data
        .ok_or_else(|| eyre::eyre!("history should load"))?;
    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            history.len()
        ));
    }
    Ok(())
}

#[then(r#"the latest history entry moved "{old}" to "{new}""#)]
fn latest_history_entry(
    world: &ActionBoardWorld,
    old: String,
    new: String,
) -> Result<(), eyre::Report> {
    let id = world.action()?.id();
    let history = run_async(world.handlers.due_date_history(id))
        .data
        .ok_or_else(|| eyre::eyre!("history should load"))?;
    let entry = history
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one history entry"))?;

    let found_old = entry.old_due_date().to_string();
    let found_new = entry.new_due_date().to_string();
    if found_old != old || found_new != new {
        return Err(eyre::eyre!(
            "expected {old} -> {new}, found {found_old} -> {found_new}"
        ));
    }
    Ok(())
}

#[then(r#"the request fails with "{message}""#)]
fn request_fails_with(world: &ActionBoardWorld, message: String) -> Result<(), eyre::Report> {
    if world.last_error.as_deref() != Some(message.as_str()) {
        return Err(eyre::eyre!(
            "expected error {message:?}, got {:?}",
            world.last_error
        ));
    }
    Ok(())
}

#[then(r#"the field "{field}" reports "{message}""#)]
fn field_reports(
    world: &ActionBoardWorld,
    field: String,
    message: String,
) -> Result<(), eyre::Report> {
    let messages = world
        .last_field_errors
        .as_ref()
        .and_then(|errors| errors.get(&field))
        .ok_or_else(|| eyre::eyre!("expected field errors for {field}"))?;
    if !messages.contains(&message) {
        return Err(eyre::eyre!("expected {message:?} for {field}, got {messages:?}"));
    }
    Ok(())
}
