//! In-memory integration tests for listings and counts.

use super::helpers::{Board, board};
use eyre::{Result, ensure, eyre};
use misekai::action::{
    domain::{ActionPage, ActionStatus, TabCounts},
    validation::{ActionsQueryPayload, CreateActionPayload, UpdateActionPayload},
};
use rstest::rstest;

/// Seeds Alice with four on-target actions and one delayed action, and
/// Bruno with one backlog action.
async fn seed(board: &Board) -> Result<()> {
    board.act_as(board.alice);
    for (index, due) in ["2099-01-05", "2099-01-01", "2099-01-03", "2099-01-02", "2099-01-04"]
        .into_iter()
        .enumerate()
    {
        let created = board
            .handlers
            .create_action(&CreateActionPayload::new(format!("Alice item {index}"), due))
            .await;
        let action = created.data.ok_or_else(|| eyre!("{:?}", created.error))?;
        if index == 0 {
            let delayed = board
                .handlers
                .update_action(action.id(), &UpdateActionPayload::new().with_status("delayed"))
                .await;
            ensure!(delayed.is_ok());
        }
    }

    board.act_as(board.bruno);
    let parked = board
        .handlers
        .create_action(&CreateActionPayload::new("Bruno parked item", "2099-02-01"))
        .await;
    let action = parked.data.ok_or_else(|| eyre!("{:?}", parked.error))?;
    let moved = board
        .handlers
        .update_action(action.id(), &UpdateActionPayload::new().with_status("backlog"))
        .await;
    ensure!(moved.is_ok());
    Ok(())
}

async fn list(board: &Board, payload: &ActionsQueryPayload) -> Result<ActionPage> {
    let result = board.handlers.list_actions(payload).await;
    result
        .data
        .ok_or_else(|| eyre!("list failed: {:?} {:?}", result.error, result.field_errors))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_members_see_only_their_own_work(board: Board) -> Result<()> {
    seed(&board).await?;

    board.act_as(board.bruno);
    let page = list(&board, &ActionsQueryPayload::default()).await?;
    ensure!(page.meta.total == 1);
    ensure!(
        page.data
            .iter()
            .all(|action| action.owner_id() == board.bruno.user_id())
    );

    board.act_as(board.pm);
    let everything = list(&board, &ActionsQueryPayload::default()).await?;
    ensure!(everything.meta.total == 6);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_tab_is_sorted_by_due_date(board: Board) -> Result<()> {
    seed(&board).await?;
    board.act_as(board.pm);

    let payload = ActionsQueryPayload {
        tab: Some("active".to_owned()),
        ..ActionsQueryPayload::default()
    };
    let page = list(&board, &payload).await?;
    let dates: Vec<String> = page
        .data
        .iter()
        .map(|action| action.due_date().to_string())
        .collect();

    ensure!(
        dates == ["2099-01-01", "2099-01-02", "2099-01-03", "2099-01-04", "2099-01-05"],
        "unexpected order {dates:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_filter_and_descending_pages(board: Board) -> Result<()> {
    seed(&board).await?;
    board.act_as(board.alice);

    let delayed = list(
        &board,
        &ActionsQueryPayload {
            status: Some("delayed".to_owned()),
            ..ActionsQueryPayload::default()
        },
    )
    .await?;
    ensure!(delayed.meta.total == 1);
    ensure!(
        delayed
            .data
            .first()
            .map(|action| action.status())
            == Some(ActionStatus::Delayed)
    );

    let second_page = list(
        &board,
        &ActionsQueryPayload {
            sort_order: Some("desc".to_owned()),
            page: Some(2),
            limit: Some(2),
            ..ActionsQueryPayload::default()
        },
    )
    .await?;
    ensure!(second_page.meta.pages == 3);
    let dates: Vec<String> = second_page
        .data
        .iter()
        .map(|action| action.due_date().to_string())
        .collect();
    ensure!(dates == ["2099-01-03", "2099-01-02"], "unexpected page {dates:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_query_parameters_are_reported(board: Board) -> Result<()> {
    let result = board
        .handlers
        .list_actions(&ActionsQueryPayload {
            sort_by: Some("priority".to_owned()),
            limit: Some(500),
            ..ActionsQueryPayload::default()
        })
        .await;

    ensure!(result.error.as_deref() == Some("Validation failed"));
    let field_errors = result
        .field_errors
        .ok_or_else(|| eyre!("expected field errors"))?;
    ensure!(field_errors.contains("sortBy"));
    ensure!(field_errors.contains("limit"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tab_counts_follow_the_caller(board: Board) -> Result<()> {
    seed(&board).await?;

    board.act_as(board.alice);
    let alice = board.handlers.tab_counts().await.data;
    board.act_as(board.pm);
    let everyone = board.handlers.tab_counts().await.data;
    let by_status = board
        .handlers
        .status_counts()
        .await
        .data
        .ok_or_else(|| eyre!("status counts should load"))?;

    ensure!(alice == Some(TabCounts { active: 5, backlog: 0 }));
    ensure!(everyone == Some(TabCounts { active: 5, backlog: 1 }));
    ensure!(by_status.get(ActionStatus::Delayed) == 1);
    ensure!(by_status.get(ActionStatus::OnTarget) == 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_members_are_listed_by_name(board: Board) -> Result<()> {
    let members = board
        .handlers
        .active_team_members()
        .await
        .data
        .ok_or_else(|| eyre!("team members should load"))?;
    let names: Vec<Option<&str>> = members
        .iter()
        .map(|member| member.full_name.as_deref())
        .collect();
    ensure!(names == [Some("Alice"), Some("Bruno"), Some("Priya")]);
    Ok(())
}
