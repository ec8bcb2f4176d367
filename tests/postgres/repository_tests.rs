//! Row storage, atomic history writes and deletes on `PostgreSQL`.

use super::helpers::{PostgresServer, action, date, insert_profile, postgres_server, prepare};
use eyre::{Result, bail, ensure, eyre};
use misekai::action::{
    domain::{
        ActionId, ActionStatus, DelayCategory, DelayReason, DueDateHistoryEntry, HistoryEntryId,
        PersistedHistoryEntryData, Profile, ProfileId, ProfileStatus, UserRole,
    },
    ports::{ActionRepository, ActionRepositoryError, DelayReasonRepository, ProfileRepository},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_actions_round_trip(postgres_server: Option<PostgresServer>) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let stored = action(ProfileId::new(), ActionStatus::Complete, date(3, 1)?);
    repos.actions.store(&stored).await?;

    let loaded = repos
        .actions
        .find_by_id(stored.id())
        .await?
        .ok_or_else(|| eyre!("stored action should load"))?;
    ensure!(loaded.description() == stored.description());
    ensure!(loaded.owner_id() == stored.owner_id());
    ensure!(loaded.due_date() == stored.due_date());
    ensure!(loaded.status() == ActionStatus::Complete);
    ensure!(loaded.notes().is_none());
    ensure!(loaded.completed_at().is_some());

    let duplicate = repos.actions.store(&stored).await;
    ensure!(
        matches!(duplicate, Err(ActionRepositoryError::DuplicateAction(id)) if id == stored.id()),
        "unexpected result {duplicate:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_history_insert_rolls_back_the_row(
    postgres_server: Option<PostgresServer>,
) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let original = action(ProfileId::new(), ActionStatus::OnTarget, date(1, 1)?);
    repos.actions.store(&original).await?;

    let mut rescheduled = original.clone();
    let change = rescheduled
        .reschedule(date(1, 15)?, &DefaultClock)
        .ok_or_else(|| eyre!("due date should change"))?;
    // Points at an action that does not exist, so the insert violates the
    // foreign key after the row update has run.
    let orphan = DueDateHistoryEntry::from_persisted(PersistedHistoryEntryData {
        id: HistoryEntryId::new(),
        action_id: ActionId::new(),
        old_due_date: change.old_due_date,
        new_due_date: change.new_due_date,
        changed_by: original.owner_id(),
        created_at: rescheduled.updated_at(),
    });

    let result = repos.actions.update(&rescheduled, Some(orphan)).await;
    ensure!(
        matches!(result, Err(ActionRepositoryError::Persistence(_))),
        "unexpected result {result:?}"
    );
    let kept = repos
        .actions
        .find_by_id(original.id())
        .await?
        .ok_or_else(|| eyre!("action should remain"))?;
    ensure!(kept.due_date() == date(1, 1)?, "row update was not rolled back");
    ensure!(repos.actions.due_date_history(original.id()).await?.is_empty());

    let entry =
        DueDateHistoryEntry::record(original.id(), change, original.owner_id(), &DefaultClock);
    repos.actions.update(&rescheduled, Some(entry.clone())).await?;
    let history = repos.actions.due_date_history(original.id()).await?;
    ensure!(history.iter().map(DueDateHistoryEntry::id).collect::<Vec<_>>() == [entry.id()]);
    ensure!(
        repos
            .actions
            .find_by_id(original.id())
            .await?
            .map(|stored| stored.due_date())
            == Some(date(1, 15)?)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_is_listed_newest_first(postgres_server: Option<PostgresServer>) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let mut tracked = action(ProfileId::new(), ActionStatus::OnTarget, date(1, 1)?);
    repos.actions.store(&tracked).await?;

    for next in [date(1, 15)?, date(2, 1)?] {
        let change = tracked
            .reschedule(next, &DefaultClock)
            .ok_or_else(|| eyre!("due date should change"))?;
        let entry =
            DueDateHistoryEntry::record(tracked.id(), change, tracked.owner_id(), &DefaultClock);
        repos.actions.update(&tracked, Some(entry)).await?;
    }

    let history = repos.actions.due_date_history(tracked.id()).await?;
    let moves: Vec<_> = history
        .iter()
        .map(|entry| (entry.old_due_date(), entry.new_due_date()))
        .collect();
    ensure!(
        moves == [(date(1, 15)?, date(2, 1)?), (date(1, 1)?, date(1, 15)?)],
        "unexpected history {moves:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_and_deletes_of_missing_rows_are_not_found(
    postgres_server: Option<PostgresServer>,
) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let ghost = action(ProfileId::new(), ActionStatus::OnTarget, date(1, 1)?);

    let updated = repos.actions.update(&ghost, None).await;
    let deleted = repos.actions.delete(ghost.id()).await;

    ensure!(matches!(updated, Err(ActionRepositoryError::NotFound(id)) if id == ghost.id()));
    ensure!(matches!(deleted, Err(ActionRepositoryError::NotFound(id)) if id == ghost.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_action_removes_its_logs(
    postgres_server: Option<PostgresServer>,
) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let doomed = action(ProfileId::new(), ActionStatus::Delayed, date(1, 1)?);
    repos.actions.store(&doomed).await?;
    repos
        .actions
        .append(&DelayReason::new(
            doomed.id(),
            "Waiting on the vendor contract",
            Some(DelayCategory::External),
            doomed.owner_id(),
            &DefaultClock,
        ))
        .await?;

    repos.actions.delete(doomed.id()).await?;

    ensure!(repos.actions.find_by_id(doomed.id()).await?.is_none());
    ensure!(repos.actions.list_for_action(doomed.id()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delay_reasons_are_listed_newest_first(
    postgres_server: Option<PostgresServer>,
) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let late = action(ProfileId::new(), ActionStatus::Delayed, date(1, 1)?);
    repos.actions.store(&late).await?;

    for (text, category) in [
        ("Supplier outage all week", Some(DelayCategory::External)),
        ("Reviewer out sick until Friday", None),
    ] {
        let reason = DelayReason::new(late.id(), text, category, late.owner_id(), &DefaultClock);
        repos.actions.append(&reason).await?;
    }

    let reasons = repos.actions.list_for_action(late.id()).await?;
    let Some(newest) = reasons.first() else {
        bail!("expected delay reasons");
    };
    ensure!(reasons.len() == 2);
    ensure!(newest.reason() == "Reviewer out sick until Friday");
    ensure!(newest.category().is_none());
    ensure!(reasons.last().and_then(|reason| reason.category()) == Some(DelayCategory::External));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_profiles_are_sorted_with_unnamed_last(
    postgres_server: Option<PostgresServer>,
) -> Result<()> {
    let Some(server) = postgres_server else {
        return Ok(());
    };
    let repos = prepare(server).await?;
    let unnamed = Profile::new(ProfileId::new(), "anon@example.com", UserRole::TeamMember);
    let bruno = Profile::new(ProfileId::new(), "bruno@example.com", UserRole::TeamMember)
        .with_full_name("Bruno");
    let ada = Profile::new(ProfileId::new(), "ada@example.com", UserRole::Pm).with_full_name("Ada");
    let gone = Profile::new(ProfileId::new(), "gone@example.com", UserRole::TeamMember)
        .with_full_name("Aaron")
        .with_status(ProfileStatus::Deactivated);
    for profile in [&unnamed, &bruno, &ada, &gone] {
        insert_profile(&repos.database, profile).await?;
    }

    let active = repos.profiles.list_active().await?;
    let emails: Vec<&str> = active.iter().map(|profile| profile.email.as_str()).collect();
    ensure!(
        emails == ["ada@example.com", "bruno@example.com", "anon@example.com"],
        "unexpected order {emails:?}"
    );
    ensure!(repos.profiles.find_by_id(gone.id).await? == Some(gone));
    ensure!(repos.profiles.find_by_id(ProfileId::new()).await?.is_none());
    Ok(())
}
