//! `PostgreSQL` repository implementations for action lifecycle storage.

use super::{
    models::{ActionRow, ActionUpdateRow, DelayReasonRow, HistoryRow, NewActionRow, ProfileRow},
    schema::{actions, delay_reasons, due_date_history, profiles},
};
use crate::action::{
    domain::{
        Action, ActionId, ActionQuery, ActionStatus, DelayCategory, DelayReason, DelayReasonId,
        DueDateHistoryEntry, HistoryEntryId, ListedActions, PersistedActionData,
        PersistedDelayReasonData, PersistedHistoryEntryData, Profile, ProfileId, ProfileStatus,
        SortField, SortOrder, StatusCounts, UserRole,
    },
    ports::{
        ActionRepository, ActionRepositoryError, ActionRepositoryResult, DelayReasonRepository,
        ProfileRepository,
    },
};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by action adapters.
pub type ActionPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for ActionRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

async fn run_blocking<F, T>(pool: &ActionPgPool, f: F) -> ActionRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> ActionRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let shared_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared_pool
            .get()
            .map_err(ActionRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(ActionRepositoryError::persistence)?
}

/// `PostgreSQL`-backed store for actions, their due-date history and delay
/// reasons.
#[derive(Debug, Clone)]
pub struct PostgresActionRepository {
    pool: ActionPgPool,
}

impl PostgresActionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ActionPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActionRepository for PostgresActionRepository {
    async fn store(&self, action: &Action) -> ActionRepositoryResult<()> {
        let action_id = action.id();
        let new_row = to_new_row(action);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(actions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ActionRepositoryError::DuplicateAction(action_id)
                    }
                    _ => ActionRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        action: &Action,
        history: Option<DueDateHistoryEntry>,
    ) -> ActionRepositoryResult<()> {
        let action_id = action.id();
        let changes = to_update_row(action);
        let history_row = history.as_ref().map(to_history_row);

        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, ActionRepositoryError, _>(|tx| {
                let updated = diesel::update(actions::table.find(action_id.into_inner()))
                    .set(&changes)
                    .execute(tx)?;
                if updated == 0 {
                    return Err(ActionRepositoryError::NotFound(action_id));
                }
                if let Some(row) = history_row {
                    diesel::insert_into(due_date_history::table)
                        .values(&row)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn delete(&self, id: ActionId) -> ActionRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(actions::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ActionRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ActionRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ActionId) -> ActionRepositoryResult<Option<Action>> {
        run_blocking(&self.pool, move |connection| {
            let row = actions::table
                .find(id.into_inner())
                .select(ActionRow::as_select())
                .first::<ActionRow>(connection)
                .optional()
                .map_err(ActionRepositoryError::persistence)?;
            row.map(row_to_action).transpose()
        })
        .await
    }

    async fn count_active_for_owner(&self, owner: ProfileId) -> ActionRepositoryResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let active: Vec<&'static str> =
                ActionStatus::ACTIVE.iter().map(|status| status.as_str()).collect();
            let count: i64 = actions::table
                .filter(actions::owner_id.eq(owner.into_inner()))
                .filter(actions::status.eq_any(active))
                .count()
                .get_result(connection)
                .map_err(ActionRepositoryError::persistence)?;
            u64::try_from(count).map_err(ActionRepositoryError::persistence)
        })
        .await
    }

    async fn list(&self, query: &ActionQuery) -> ActionRepositoryResult<ListedActions> {
        let owned_query = query.clone();
        run_blocking(&self.pool, move |connection| {
            let total_rows: i64 = scoped_actions(&owned_query)
                .count()
                .get_result(connection)
                .map_err(ActionRepositoryError::persistence)?;

            let offset =
                i64::try_from(owned_query.offset()).map_err(ActionRepositoryError::persistence)?;
            let rows = ordered(
                scoped_actions(&owned_query),
                owned_query.sort_by(),
                owned_query.sort_order(),
            )
            .offset(offset)
            .limit(i64::from(owned_query.limit()))
            .select(ActionRow::as_select())
            .load::<ActionRow>(connection)
            .map_err(ActionRepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_action)
                .collect::<ActionRepositoryResult<Vec<_>>>()?;
            let total =
                u64::try_from(total_rows).map_err(ActionRepositoryError::persistence)?;
            Ok(ListedActions { items, total })
        })
        .await
    }

    async fn count_by_status(
        &self,
        owner: Option<ProfileId>,
    ) -> ActionRepositoryResult<StatusCounts> {
        run_blocking(&self.pool, move |connection| {
            let grouped: Vec<(String, i64)> = match owner {
                Some(owner_id) => actions::table
                    .filter(actions::owner_id.eq(owner_id.into_inner()))
                    .group_by(actions::status)
                    .select((actions::status, count_star()))
                    .load(connection),
                None => actions::table
                    .group_by(actions::status)
                    .select((actions::status, count_star()))
                    .load(connection),
            }
            .map_err(ActionRepositoryError::persistence)?;

            let mut counts = StatusCounts::default();
            for (stored_status, stored_count) in grouped {
                let status = ActionStatus::try_from(stored_status.as_str())
                    .map_err(ActionRepositoryError::persistence)?;
                let count =
                    u64::try_from(stored_count).map_err(ActionRepositoryError::persistence)?;
                counts.add(status, count);
            }
            Ok(counts)
        })
        .await
    }

    async fn due_date_history(
        &self,
        id: ActionId,
    ) -> ActionRepositoryResult<Vec<DueDateHistoryEntry>> {
        run_blocking(&self.pool, move |connection| {
            let rows = due_date_history::table
                .filter(due_date_history::action_id.eq(id.into_inner()))
                .order(due_date_history::created_at.desc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(ActionRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_history_entry).collect())
        })
        .await
    }
}

#[async_trait]
impl DelayReasonRepository for PostgresActionRepository {
    async fn append(&self, reason: &DelayReason) -> ActionRepositoryResult<()> {
        let row = to_delay_reason_row(reason);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(delay_reasons::table)
                .values(&row)
                .execute(connection)
                .map_err(ActionRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_action(
        &self,
        action_id: ActionId,
    ) -> ActionRepositoryResult<Vec<DelayReason>> {
        run_blocking(&self.pool, move |connection| {
            let rows = delay_reasons::table
                .filter(delay_reasons::action_id.eq(action_id.into_inner()))
                .order(delay_reasons::created_at.desc())
                .select(DelayReasonRow::as_select())
                .load::<DelayReasonRow>(connection)
                .map_err(ActionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_delay_reason).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed profile directory.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: ActionPgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ActionPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> ActionRepositoryResult<Option<Profile>> {
        run_blocking(&self.pool, move |connection| {
            let row = profiles::table
                .find(id.into_inner())
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ActionRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list_active(&self) -> ActionRepositoryResult<Vec<Profile>> {
        run_blocking(&self.pool, move |connection| {
            let rows = profiles::table
                .filter(profiles::status.eq(ProfileStatus::Active.as_str()))
                .order((profiles::full_name.asc(), profiles::email.asc()))
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(ActionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }
}

fn scoped_actions(query: &ActionQuery) -> actions::BoxedQuery<'static, Pg> {
    let statuses: Vec<&'static str> = query
        .status_scope()
        .into_iter()
        .map(ActionStatus::as_str)
        .collect();
    let mut scoped = actions::table
        .filter(actions::status.eq_any(statuses))
        .into_boxed();
    if let Some(owner) = query.owner() {
        scoped = scoped.filter(actions::owner_id.eq(owner.into_inner()));
    }
    scoped
}

fn ordered(
    scoped: actions::BoxedQuery<'static, Pg>,
    sort_by: SortField,
    sort_order: SortOrder,
) -> actions::BoxedQuery<'static, Pg> {
    let sorted = match (sort_by, sort_order) {
        (SortField::DueDate, SortOrder::Asc) => scoped.order(actions::due_date.asc()),
        (SortField::DueDate, SortOrder::Desc) => scoped.order(actions::due_date.desc()),
        (SortField::CreatedAt, SortOrder::Asc) => scoped.order(actions::created_at.asc()),
        (SortField::CreatedAt, SortOrder::Desc) => scoped.order(actions::created_at.desc()),
        (SortField::Status, SortOrder::Asc) => scoped.order(actions::status.asc()),
        (SortField::Status, SortOrder::Desc) => scoped.order(actions::status.desc()),
    };
    sorted.then_order_by(actions::id.asc())
}

fn to_new_row(action: &Action) -> NewActionRow {
    NewActionRow {
        id: action.id().into_inner(),
        description: action.description().to_owned(),
        owner_id: action.owner_id().into_inner(),
        due_date: action.due_date(),
        status: action.status().as_str().to_owned(),
        notes: action.notes().map(str::to_owned),
        completed_at: action.completed_at(),
        created_at: action.created_at(),
        updated_at: action.updated_at(),
    }
}

fn to_update_row(action: &Action) -> ActionUpdateRow {
    ActionUpdateRow {
        description: action.description().to_owned(),
        owner_id: action.owner_id().into_inner(),
        due_date: action.due_date(),
        status: action.status().as_str().to_owned(),
        notes: action.notes().map(str::to_owned),
        completed_at: action.completed_at(),
        updated_at: action.updated_at(),
    }
}

fn row_to_action(row: ActionRow) -> ActionRepositoryResult<Action> {
    let status =
        ActionStatus::try_from(row.status.as_str()).map_err(ActionRepositoryError::persistence)?;
    Ok(Action::from_persisted(PersistedActionData {
        id: ActionId::from_uuid(row.id),
        description: row.description,
        owner_id: ProfileId::from_uuid(row.owner_id),
        due_date: row.due_date,
        status,
        notes: row.notes,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_history_row(entry: &DueDateHistoryEntry) -> HistoryRow {
    HistoryRow {
        id: entry.id().into_inner(),
        action_id: entry.action_id().into_inner(),
        old_due_date: entry.old_due_date(),
        new_due_date: entry.new_due_date(),
        changed_by: entry.changed_by().into_inner(),
        created_at: entry.created_at(),
    }
}

const fn row_to_history_entry(row: HistoryRow) -> DueDateHistoryEntry {
    DueDateHistoryEntry::from_persisted(PersistedHistoryEntryData {
        id: HistoryEntryId::from_uuid(row.id),
        action_id: ActionId::from_uuid(row.action_id),
        old_due_date: row.old_due_date,
        new_due_date: row.new_due_date,
        changed_by: ProfileId::from_uuid(row.changed_by),
        created_at: row.created_at,
    })
}

fn to_delay_reason_row(reason: &DelayReason) -> DelayReasonRow {
    DelayReasonRow {
        id: reason.id().into_inner(),
        action_id: reason.action_id().into_inner(),
        reason: reason.reason().to_owned(),
        category: reason.category().map(|category| category.as_str().to_owned()),
        created_by: reason.created_by().into_inner(),
        created_at: reason.created_at(),
    }
}

fn row_to_delay_reason(row: DelayReasonRow) -> ActionRepositoryResult<DelayReason> {
    let category = row
        .category
        .as_deref()
        .map(DelayCategory::try_from)
        .transpose()
        .map_err(ActionRepositoryError::persistence)?;
    Ok(DelayReason::from_persisted(PersistedDelayReasonData {
        id: DelayReasonId::from_uuid(row.id),
        action_id: ActionId::from_uuid(row.action_id),
        reason: row.reason,
        category,
        created_by: ProfileId::from_uuid(row.created_by),
        created_at: row.created_at,
    }))
}

fn row_to_profile(row: ProfileRow) -> ActionRepositoryResult<Profile> {
    let role = UserRole::try_from(row.role.as_str()).map_err(ActionRepositoryError::persistence)?;
    let status =
        ProfileStatus::try_from(row.status.as_str()).map_err(ActionRepositoryError::persistence)?;
    Ok(Profile {
        id: ProfileId::from_uuid(row.id),
        email: row.email,
        full_name: row.full_name,
        role,
        status,
    })
}
