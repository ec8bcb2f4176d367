//! Request boundary: resolves the caller, runs the service and converts
//! every outcome into an [`ActionResult`].

use super::{ActionLifecycleService, ActionResult, ActionServiceError};
use crate::action::{
    domain::{
        Action, ActionDomainError, ActionId, ActionPage, Actor, DelayReason, DueDateHistoryEntry,
        Profile, StatusCounts, TabCounts,
    },
    ports::{
        ActionRepository, ActionRepositoryError, CacheInvalidator, CacheKey,
        DelayReasonRepository, IdentityProvider, ProfileRepository,
    },
    validation::{ActionsQueryPayload, CreateActionPayload, FieldErrors, UpdateActionPayload},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

const NOT_FOUND: &str = "Action not found";
const COMPLETED_NOT_DELETABLE: &str = "Cannot delete a completed action";
const OWNER_NOT_PERMITTED: &str = "Only project managers can assign actions to other users";
const OWNER_INACTIVE: &str = "Owner must be an active team member";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Create,
    Update,
    Delete,
    View,
}

impl Operation {
    fn unauthenticated(self) -> String {
        match self {
            Self::Create => "You must be logged in to create an action".to_owned(),
            Self::Update => "You must be logged in to update an action".to_owned(),
            Self::Delete => "You must be logged in to delete an action".to_owned(),
            Self::View => "You must be logged in to view actions".to_owned(),
        }
    }

    fn failed(self, reason: &str) -> String {
        match self {
            Self::Create => format!("Failed to create action: {reason}"),
            Self::Update => format!("Failed to update action: {reason}"),
            Self::Delete => format!("Failed to delete action: {reason}"),
            Self::View => format!("Failed to load actions: {reason}"),
        }
    }
}

/// Handler boundary for action requests.
///
/// Never panics or returns an error: every outcome is an [`ActionResult`].
/// Successful writes invalidate the list, detail and count views.
#[derive(Clone)]
pub struct ActionHandlers<R, D, P, C>
where
    R: ActionRepository,
    D: DelayReasonRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    service: ActionLifecycleService<R, D, P, C>,
    identity: Arc<dyn IdentityProvider>,
    cache: Arc<dyn CacheInvalidator>,
}

impl<R, D, P, C> ActionHandlers<R, D, P, C>
where
    R: ActionRepository,
    D: DelayReasonRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handler boundary.
    #[must_use]
    pub const fn new(
        service: ActionLifecycleService<R, D, P, C>,
        identity: Arc<dyn IdentityProvider>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            service,
            identity,
            cache,
        }
    }

    /// Returns the wrapped service.
    #[must_use]
    pub const fn service(&self) -> &ActionLifecycleService<R, D, P, C> {
        &self.service
    }

    /// Creates an action for the signed-in caller.
    pub async fn create_action(&self, payload: &CreateActionPayload) -> ActionResult<Action> {
        let actor = match self.actor(Operation::Create).await {
            Ok(actor) => actor,
            Err(result) => return result,
        };
        match self.service.create(&actor, payload).await {
            Ok(created) => {
                self.cache.invalidate(&CacheKey::after_write(created.action.id()));
                ActionResult::ok(created.action).with_auto_backlogged(created.auto_backlogged)
            }
            Err(err) => failure(err, Operation::Create),
        }
    }

    /// Applies a partial update to an action.
    pub async fn update_action(
        &self,
        id: ActionId,
        payload: &UpdateActionPayload,
    ) -> ActionResult<Action> {
        let actor = match self.actor(Operation::Update).await {
            Ok(actor) => actor,
            Err(result) => return result,
        };
        match self.service.update(&actor, id, payload).await {
            Ok(action) => {
                self.cache.invalidate(&CacheKey::after_write(id));
                ActionResult::ok(action)
            }
            Err(err @ ActionServiceError::DelayReasonNotRecorded { .. }) => {
                // The row itself was written.
                self.cache.invalidate(&CacheKey::after_write(id));
                failure(err, Operation::Update)
            }
            Err(err) => failure(err, Operation::Update),
        }
    }

    /// Deletes an action that is not complete. Returns the deleted id.
    pub async fn delete_action(&self, id: ActionId) -> ActionResult<ActionId> {
        let actor = match self.actor(Operation::Delete).await {
            Ok(actor) => actor,
            Err(result) => return result,
        };
        match self.service.delete(&actor, id).await {
            Ok(()) => {
                self.cache.invalidate(&CacheKey::after_write(id));
                ActionResult::ok(id)
            }
            Err(err) => failure(err, Operation::Delete),
        }
    }

    /// Loads one action visible to the caller.
    pub async fn get_action(&self, id: ActionId) -> ActionResult<Action> {
        match self.actor(Operation::View).await {
            Ok(actor) => into_result(self.service.get(&actor, id).await),
            Err(result) => result,
        }
    }

    /// Lists one page of actions visible to the caller.
    pub async fn list_actions(&self, query: &ActionsQueryPayload) -> ActionResult<ActionPage> {
        match self.actor(Operation::View).await {
            Ok(actor) => into_result(self.service.list(&actor, query).await),
            Err(result) => result,
        }
    }

    /// Counts visible actions per tab.
    pub async fn tab_counts(&self) -> ActionResult<TabCounts> {
        match self.actor(Operation::View).await {
            Ok(actor) => into_result(self.service.tab_counts(&actor).await),
            Err(result) => result,
        }
    }

    /// Counts visible actions per status.
    pub async fn status_counts(&self) -> ActionResult<StatusCounts> {
        match self.actor(Operation::View).await {
            Ok(actor) => into_result(self.service.status_counts(&actor).await),
            Err(result) => result,
        }
    }

    /// Lists due-date history for an action, newest first.
    pub async fn due_date_history(&self, id: ActionId) -> ActionResult<Vec<DueDateHistoryEntry>> {
        match self.actor(Operation::View).await {
            Ok(actor) => into_result(self.service.due_date_history(&actor, id).await),
            Err(result) => result,
        }
    }

    /// Lists delay reasons for an action, newest first.
    pub async fn delay_reasons(&self, id: ActionId) -> ActionResult<Vec<DelayReason>> {
        match self.actor(Operation::View).await {
            Ok(actor) => into_result(self.service.delay_reasons(&actor, id).await),
            Err(result) => result,
        }
    }

    /// Lists active profiles that can own actions.
    pub async fn active_team_members(&self) -> ActionResult<Vec<Profile>> {
        if let Err(result) = self.actor(Operation::View).await {
            return result;
        }
        into_result(self.service.active_team_members().await)
    }

    async fn actor<T>(&self, operation: Operation) -> Result<Actor, ActionResult<T>> {
        match self.identity.current_actor().await {
            Ok(Some(actor)) => Ok(actor),
            Ok(None) => {
                debug!(?operation, "rejecting unauthenticated request");
                Err(ActionResult::failure(operation.unauthenticated()))
            }
            Err(err) => {
                warn!(?operation, error = %err, "identity lookup failed");
                Err(ActionResult::failure(operation.failed(&err.to_string())))
            }
        }
    }
}

fn into_result<T>(outcome: Result<T, ActionServiceError>) -> ActionResult<T> {
    outcome.map_or_else(|err| failure(err, Operation::View), ActionResult::ok)
}

fn failure<T>(err: ActionServiceError, operation: Operation) -> ActionResult<T> {
    debug!(?operation, error = %err, "action request failed");
    match err {
        ActionServiceError::Validation(field_errors) => ActionResult::invalid(field_errors),
        ActionServiceError::NotFound(_)
        | ActionServiceError::Repository(ActionRepositoryError::NotFound(_)) => {
            ActionResult::failure(NOT_FOUND)
        }
        ActionServiceError::Domain(ActionDomainError::CompletedActionNotDeletable(_)) => {
            ActionResult::failure(COMPLETED_NOT_DELETABLE)
        }
        ActionServiceError::Domain(ActionDomainError::OwnerAssignmentNotPermitted { .. }) => {
            ActionResult::invalid(FieldErrors::single("owner_id", OWNER_NOT_PERMITTED))
        }
        ActionServiceError::Domain(ActionDomainError::InactiveOwner(_)) => {
            ActionResult::invalid(FieldErrors::single("owner_id", OWNER_INACTIVE))
        }
        ActionServiceError::Repository(source) => {
            ActionResult::failure(operation.failed(&storage_reason(&source)))
        }
        ActionServiceError::DelayReasonNotRecorded { source, .. } => ActionResult::failure(
            format!("Failed to record delay reason: {}", storage_reason(&source)),
        ),
    }
}

fn storage_reason(err: &ActionRepositoryError) -> String {
    match err {
        ActionRepositoryError::Persistence(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
