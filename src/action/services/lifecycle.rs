//! Service layer for the action lifecycle and WIP-limited assignment.

use crate::action::{
    config::ActionRules,
    domain::{
        Action, ActionDomainError, ActionId, ActionPage, ActionStatus, Actor, DelayReason,
        DueDateHistoryEntry, NewAction, PageMeta, Profile, ProfileId, StatusCounts, TabCounts,
    },
    ports::{
        ActionRepository, ActionRepositoryError, DelayReasonRepository, ProfileRepository,
    },
    validation::{
        ActionValidator, ActionsQueryPayload, CreateActionPayload, FieldErrors,
        UpdateActionPayload,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for action lifecycle operations.
#[derive(Debug, Error)]
pub enum ActionServiceError {
    /// One or more payload fields were rejected.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The action does not exist.
    #[error("action not found: {0}")]
    NotFound(ActionId),

    /// A business rule was violated.
    #[error(transparent)]
    Domain(#[from] ActionDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ActionRepositoryError),

    /// The action was updated but its delay reason could not be stored.
    #[error("delay reason for action {action_id} was not recorded: {source}")]
    DelayReasonNotRecorded {
        /// The updated action.
        action_id: ActionId,
        /// The storage failure.
        source: ActionRepositoryError,
    },
}

/// Result type for action lifecycle service operations.
pub type ActionServiceResult<T> = Result<T, ActionServiceError>;

/// Outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAction {
    /// The stored action.
    pub action: Action,
    /// `true` when the WIP limit routed the action to backlog.
    pub auto_backlogged: bool,
}

/// Action lifecycle orchestration service.
///
/// Validates payloads, applies the capability check and the WIP limit, and
/// keeps due-date history and delay reasons in step with action updates.
#[derive(Clone)]
pub struct ActionLifecycleService<R, D, P, C>
where
    R: ActionRepository,
    D: DelayReasonRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    actions: Arc<R>,
    delay_reasons: Arc<D>,
    profiles: Arc<P>,
    clock: Arc<C>,
    validator: ActionValidator,
}

impl<R, D, P, C> ActionLifecycleService<R, D, P, C>
where
    R: ActionRepository,
    D: DelayReasonRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default [`ActionRules`].
    #[must_use]
    pub fn new(actions: Arc<R>, delay_reasons: Arc<D>, profiles: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            actions,
            delay_reasons,
            profiles,
            clock,
            validator: ActionValidator::default(),
        }
    }

    /// Replaces the business rules.
    #[must_use]
    pub const fn with_rules(mut self, rules: ActionRules) -> Self {
        self.validator = ActionValidator::with_rules(rules);
        self
    }

    /// Returns the rules in force.
    #[must_use]
    pub const fn rules(&self) -> &ActionRules {
        self.validator.rules()
    }

    /// Creates an action owned by the caller or, for project managers, by
    /// the requested owner.
    ///
    /// When the owner already holds `wip_limit` active actions the new action
    /// starts in backlog and [`CreatedAction::auto_backlogged`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::Validation`] for invalid payloads,
    /// [`ActionServiceError::Domain`] when the owner assignment is not
    /// allowed, and [`ActionServiceError::Repository`] when storage fails.
    pub async fn create(
        &self,
        actor: &Actor,
        payload: &CreateActionPayload,
    ) -> ActionServiceResult<CreatedAction> {
        let today = self.clock.utc().date_naive();
        let input = self
            .validator
            .validate_create(payload, today)
            .map_err(ActionServiceError::Validation)?;

        let owner_id = match input.owner_id {
            Some(requested) => self.authorize_owner(actor, requested).await?,
            None => actor.user_id(),
        };

        let active = self.actions.count_active_for_owner(owner_id).await?;
        let auto_backlogged = active >= self.rules().wip_limit;
        let status = if auto_backlogged {
            ActionStatus::Backlog
        } else {
            ActionStatus::OnTarget
        };
        if auto_backlogged {
            info!(
                owner_id = %owner_id,
                active,
                wip_limit = self.rules().wip_limit,
                "WIP limit reached; routing new action to backlog"
            );
        }

        let action = Action::new(
            NewAction {
                description: input.description,
                owner_id,
                due_date: input.due_date,
                notes: input.notes,
            },
            status,
            &*self.clock,
        );
        self.actions.store(&action).await?;
        info!(action_id = %action.id(), owner_id = %owner_id, status = %status, "action created");

        Ok(CreatedAction {
            action,
            auto_backlogged,
        })
    }

    /// Applies a partial update to an action.
    ///
    /// Only project managers may change the owner. A team member may resend
    /// the current owner, which leaves ownership untouched.
    ///
    /// A changed due date is recorded in the history together with the row.
    /// A delay reason supplied with `status = delayed` is appended after the
    /// row is saved.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::Validation`] for invalid payloads,
    /// [`ActionServiceError::NotFound`] for unknown actions,
    /// [`ActionServiceError::Domain`] when reassignment is not allowed,
    /// [`ActionServiceError::Repository`] when the update fails, and
    /// [`ActionServiceError::DelayReasonNotRecorded`] when only the delay
    /// reason failed to store.
    pub async fn update(
        &self,
        actor: &Actor,
        id: ActionId,
        payload: &UpdateActionPayload,
    ) -> ActionServiceResult<Action> {
        let input = self
            .validator
            .validate_update(payload)
            .map_err(ActionServiceError::Validation)?;

        let mut action = self.find_visible(actor, id).await?;
        if let Some(requested) = input.changes.owner_id {
            self.authorize_reassignment(actor, &action, requested).await?;
        }

        let applied = action.apply(input.changes, &*self.clock);
        let history = applied.due_date_change.map(|change| {
            DueDateHistoryEntry::record(id, change, actor.user_id(), &*self.clock)
        });
        if let Some(change) = applied.due_date_change {
            debug!(
                action_id = %id,
                old_due_date = %change.old_due_date,
                new_due_date = %change.new_due_date,
                "recording due date change"
            );
        }
        self.actions.update(&action, history).await?;

        if let Some(transition) = applied.transition {
            info!(
                action_id = %id,
                from = %transition.from,
                to = %transition.to,
                "action status updated"
            );
        }

        if let Some(reason_input) = input.delay_reason {
            let reason = DelayReason::new(
                id,
                reason_input.reason,
                reason_input.category,
                actor.user_id(),
                &*self.clock,
            );
            if let Err(source) = self.delay_reasons.append(&reason).await {
                warn!(action_id = %id, error = %source, "failed to record delay reason");
                return Err(ActionServiceError::DelayReasonNotRecorded {
                    action_id: id,
                    source,
                });
            }
        }

        Ok(action)
    }

    /// Deletes an action unless it is complete.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::NotFound`] for unknown or foreign
    /// actions, [`ActionServiceError::Domain`] for complete actions, and
    /// [`ActionServiceError::Repository`] when storage fails.
    pub async fn delete(&self, actor: &Actor, id: ActionId) -> ActionServiceResult<()> {
        let action = self.find_visible(actor, id).await?;
        action.ensure_deletable().inspect_err(|_| {
            debug!(action_id = %id, actor = %actor.user_id(), "refusing to delete completed action");
        })?;
        self.actions.delete(id).await?;
        info!(action_id = %id, actor = %actor.user_id(), "action deleted");
        Ok(())
    }

    /// Retrieves one action visible to `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::NotFound`] for unknown actions and for
    /// actions a team member does not own, and
    /// [`ActionServiceError::Repository`] when the lookup fails.
    pub async fn get(&self, actor: &Actor, id: ActionId) -> ActionServiceResult<Action> {
        self.find_visible(actor, id).await
    }

    /// Lists one page of actions visible to `actor`.
    ///
    /// Team members only see their own actions; any owner filter they send
    /// is replaced by their own id.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::Validation`] for invalid query
    /// parameters and [`ActionServiceError::Repository`] when storage fails.
    pub async fn list(
        &self,
        actor: &Actor,
        payload: &ActionsQueryPayload,
    ) -> ActionServiceResult<ActionPage> {
        let mut query = self
            .validator
            .validate_query(payload)
            .map_err(ActionServiceError::Validation)?;
        if !actor.capabilities().can_view_all {
            query = query.with_owner(Some(actor.user_id()));
        }

        let listed = self.actions.list(&query).await?;
        Ok(ActionPage {
            meta: PageMeta::for_query(&query, listed.total),
            data: listed.items,
        })
    }

    /// Counts the actions visible to `actor` per status.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::Repository`] when storage fails.
    pub async fn status_counts(&self, actor: &Actor) -> ActionServiceResult<StatusCounts> {
        let owner = visible_owner(actor);
        Ok(self.actions.count_by_status(owner).await?)
    }

    /// Counts the actions visible to `actor` per tab.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::Repository`] when storage fails.
    pub async fn tab_counts(&self, actor: &Actor) -> ActionServiceResult<TabCounts> {
        Ok(self.status_counts(actor).await?.tabs())
    }

    /// Returns due-date history for an action, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::NotFound`] when the action is not
    /// visible to `actor` and [`ActionServiceError::Repository`] when
    /// storage fails.
    pub async fn due_date_history(
        &self,
        actor: &Actor,
        id: ActionId,
    ) -> ActionServiceResult<Vec<DueDateHistoryEntry>> {
        self.find_visible(actor, id).await?;
        Ok(self.actions.due_date_history(id).await?)
    }

    /// Returns delay reasons for an action, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::NotFound`] when the action is not
    /// visible to `actor` and [`ActionServiceError::Repository`] when
    /// storage fails.
    pub async fn delay_reasons(
        &self,
        actor: &Actor,
        id: ActionId,
    ) -> ActionServiceResult<Vec<DelayReason>> {
        self.find_visible(actor, id).await?;
        Ok(self.delay_reasons.list_for_action(id).await?)
    }

    /// Returns active profiles that can own actions, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`ActionServiceError::Repository`] when storage fails.
    pub async fn active_team_members(&self) -> ActionServiceResult<Vec<Profile>> {
        Ok(self.profiles.list_active().await?)
    }

    /// Loads an action, hiding rows a team member does not own.
    async fn find_visible(&self, actor: &Actor, id: ActionId) -> ActionServiceResult<Action> {
        let action = self
            .actions
            .find_by_id(id)
            .await?
            .ok_or(ActionServiceError::NotFound(id))?;
        if visible_owner(actor).is_some_and(|owner| owner != action.owner_id()) {
            debug!(
                action_id = %id,
                actor = %actor.user_id(),
                "action outside the caller's scope"
            );
            return Err(ActionServiceError::NotFound(id));
        }
        Ok(action)
    }

    /// Checks that `actor` may name `requested` as owner of a new action.
    async fn authorize_owner(
        &self,
        actor: &Actor,
        requested: ProfileId,
    ) -> ActionServiceResult<ProfileId> {
        if requested == actor.user_id() {
            return Ok(requested);
        }
        self.ensure_assignable(actor, requested).await
    }

    /// Checks that `actor` may move `action` to `requested`.
    async fn authorize_reassignment(
        &self,
        actor: &Actor,
        action: &Action,
        requested: ProfileId,
    ) -> ActionServiceResult<()> {
        if requested == action.owner_id() {
            return Ok(());
        }
        self.ensure_assignable(actor, requested).await?;
        Ok(())
    }

    async fn ensure_assignable(
        &self,
        actor: &Actor,
        requested: ProfileId,
    ) -> ActionServiceResult<ProfileId> {
        if !actor.capabilities().can_assign_owner {
            warn!(actor = %actor.user_id(), requested = %requested, "owner assignment rejected");
            return Err(ActionDomainError::OwnerAssignmentNotPermitted {
                actor: actor.user_id(),
            }
            .into());
        }
        match self.profiles.find_by_id(requested).await? {
            Some(profile) if profile.is_active() => Ok(requested),
            _ => Err(ActionDomainError::InactiveOwner(requested).into()),
        }
    }
}

const fn visible_owner(actor: &Actor) -> Option<ProfileId> {
    if actor.capabilities().can_view_all {
        None
    } else {
        Some(actor.user_id())
    }
}
