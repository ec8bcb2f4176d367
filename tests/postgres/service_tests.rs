//! The lifecycle service running on the `PostgreSQL` adapters.

use super::helpers::{PostgresServer, insert_profile, postgres_server, prepare};
use eyre::{Result, ensure, eyre};
use misekai::action::{
    adapters::postgres::{PostgresActionRepository, PostgresProfileRepository},
    domain::{ActionStatus, Actor, Profile, ProfileId, UserRole},
    services::ActionLifecycleService,
    validation::{CreateActionPayload, DelayReasonPayload, UpdateActionPayload},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type PgService = ActionLifecycleService<
    PostgresActionRepository,
    PostgresActionRepository,
    PostgresProfileRepository,
    DefaultClock,
>;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wip_limit_and_history_on_postgres(postgres_server: Option<PostgresServer>) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let member = Actor::team_member(ProfileId::new());
    let pm = Actor::pm(ProfileId::new());
    insert_profile(
        &repos.database,
        &Profile::new(member.user_id(), "member@example.com", UserRole::TeamMember),
    )
    .await?;
    let service: PgService = ActionLifecycleService::new(
        Arc::clone(&repos.actions),
        Arc::clone(&repos.actions),
        Arc::clone(&repos.profiles),
        Arc::new(DefaultClock),
    );

    for index in 1..=5 {
        let payload = CreateActionPayload::new(format!("Postgres task {index}"), "2099-03-01");
        let created = service.create(&member, &payload).await?;
        ensure!(!created.auto_backlogged, "task {index} should stay on target");
    }
    let assigned = CreateActionPayload::new("Assigned overflow", "2099-03-02")
        .with_owner_id(member.user_id().to_string());
    let overflow = service.create(&pm, &assigned).await?;
    ensure!(overflow.auto_backlogged);
    ensure!(overflow.action.status() == ActionStatus::Backlog);

    let id = overflow.action.id();
    let payload = UpdateActionPayload::new()
        .with_due_date("2099-03-09")
        .with_status("delayed")
        .with_delay_reason(DelayReasonPayload::new("Blocked by the data migration"));
    let updated = service.update(&member, id, &payload).await?;
    ensure!(updated.status() == ActionStatus::Delayed);

    let history = service.due_date_history(&member, id).await?;
    let entry = history.first().ok_or_else(|| eyre!("expected one history entry"))?;
    ensure!(history.len() == 1);
    ensure!(entry.new_due_date().to_string() == "2099-03-09");
    ensure!(entry.changed_by() == member.user_id());
    ensure!(service.delay_reasons(&member, id).await?.len() == 1);
    ensure!(service.tab_counts(&member).await?.active == 6);
    Ok(())
}
