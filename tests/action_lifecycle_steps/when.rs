//! When steps for action lifecycle BDD scenarios.

use super::world::{ActionBoardWorld, run_async};
use misekai::action::validation::{CreateActionPayload, UpdateActionPayload};
use rstest_bdd_macros::when;

#[when(r#""{name}" creates an action due "{due_date}""#)]
fn creates_action(
    world: &mut ActionBoardWorld,
    name: String,
    due_date: String,
) -> Result<(), eyre::Report> {
    world.sign_in(&name)?;
    let result = run_async(
        world
            .handlers
            .create_action(&CreateActionPayload::new("Plan the next release", due_date)),
    );
    world.record(result);
    Ok(())
}

#[when(r#""{name}" creates an action for "{owner}" due "{due_date}""#)]
fn creates_action_for(
    world: &mut ActionBoardWorld,
    name: String,
    owner: String,
    due_date: String,
) -> Result<(), eyre::Report> {
    world.sign_in(&name)?;
    let owner_id = world.person(&owner)?.user_id();
    let payload = CreateActionPayload::new("Delegated release task", due_date)
        .with_owner_id(owner_id.to_string());
    let result = run_async(world.handlers.create_action(&payload));
    world.record(result);
    Ok(())
}

#[when(r#"the due date is changed to "{due_date}""#)]
fn due_date_changed(world: &mut ActionBoardWorld, due_date: String) -> Result<(), eyre::Report> {
    let id = world.action()?.id();
    let result = run_async(
        world
            .handlers
            .update_action(id, &UpdateActionPayload::new().with_due_date(due_date)),
    );
    world.record(result);
    Ok(())
}

#[when("the action is deleted")]
fn action_deleted(world: &mut ActionBoardWorld) -> Result<(), eyre::Report> {
    let id = world.action()?.id();
    let result = run_async(world.handlers.delete_action(id));
    world.last_error = result.error;
    world.last_field_errors = result.field_errors;
    Ok(())
}
