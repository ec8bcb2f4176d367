//! Given steps for action lifecycle BDD scenarios.

use super::world::{ActionBoardWorld, run_async};
use misekai::action::{
    domain::UserRole,
    validation::{CreateActionPayload, UpdateActionPayload},
};
use rstest_bdd_macros::given;

#[given(r#"a team member "{name}""#)]
fn team_member(world: &mut ActionBoardWorld, name: String) -> Result<(), eyre::Report> {
    world.add_person(name, UserRole::TeamMember)?;
    Ok(())
}

#[given(r#"a project manager "{name}""#)]
fn project_manager(world: &mut ActionBoardWorld, name: String) -> Result<(), eyre::Report> {
    world.add_person(name, UserRole::Pm)?;
    Ok(())
}

#[given(r#""{name}" already has {count:u64} active actions"#)]
fn already_has_active_actions(
    world: &mut ActionBoardWorld,
    name: String,
    count: u64,
) -> Result<(), eyre::Report> {
    world.sign_in(&name)?;
    for index in 0..count {
        let result = run_async(world.handlers.create_action(&CreateActionPayload::new(
            format!("Existing work item {index}"),
            "2099-02-01",
        )));
        if result.auto_backlogged != Some(false) {
            return Err(eyre::eyre!(
                "setup action {index} was not created on target: {:?}",
                result.error
            ));
        }
    }
    Ok(())
}

#[given(r#""{name}" has an action due "{due_date}""#)]
fn has_action_due(
    world: &mut ActionBoardWorld,
    name: String,
    due_date: String,
) -> Result<(), eyre::Report> {
    world.sign_in(&name)?;
    let result = run_async(world.handlers.create_action(&CreateActionPayload::new(
        "Scenario action",
        due_date,
    )));
    let action = result
        .data
        .ok_or_else(|| eyre::eyre!("create action in scenario setup: {:?}", result.error))?;
    world.current_action = Some(action);
    Ok(())
}

#[given(r#"the action has been moved to "{status}""#)]
fn action_moved_to(world: &mut ActionBoardWorld, status: String) -> Result<(), eyre::Report> {
    let id = world.action()?.id();
    let result = run_async(
        world
            .handlers
            .update_action(id, &UpdateActionPayload::new().with_status(status)),
    );
    let action = result
        .data
        .ok_or_else(|| eyre::eyre!("update action in scenario setup: {:?}", result.error))?;
    world.current_action = Some(action);
    Ok(())
}
