//! Filtering, sorting and pagination types for action listings.

use super::{Action, ActionStatus, ParseListingError, ProfileId};
use serde::{Deserialize, Serialize};

/// Coarse grouping of statuses shown as tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTab {
    /// `on_target` and `delayed`.
    Active,
    /// `backlog` only.
    Backlog,
}

impl ActionTab {
    /// Returns the statuses shown under this tab.
    #[must_use]
    pub const fn statuses(self) -> &'static [ActionStatus] {
        match self {
            Self::Active => &ActionStatus::ACTIVE,
            Self::Backlog => &[ActionStatus::Backlog],
        }
    }
}

impl TryFrom<&str> for ActionTab {
    type Error = ParseListingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "backlog" => Ok(Self::Backlog),
            _ => Err(ParseListingError {
                kind: "tab",
                value: value.to_owned(),
            }),
        }
    }
}

/// Column used to order listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Order by due date.
    #[default]
    DueDate,
    /// Order by creation time.
    CreatedAt,
    /// Order by the stored status name.
    Status,
}

impl TryFrom<&str> for SortField {
    type Error = ParseListingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due_date" => Ok(Self::DueDate),
            "created_at" => Ok(Self::CreatedAt),
            "status" => Ok(Self::Status),
            _ => Err(ParseListingError {
                kind: "sort field",
                value: value.to_owned(),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseListingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseListingError {
                kind: "sort order",
                value: value.to_owned(),
            }),
        }
    }
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionQuery {
    status: Option<ActionStatus>,
    tab: Option<ActionTab>,
    owner: Option<ProfileId>,
    sort_by: SortField,
    sort_order: SortOrder,
    page: u32,
    limit: u32,
}

impl Default for ActionQuery {
    fn default() -> Self {
        Self {
            status: None,
            tab: None,
            owner: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl ActionQuery {
    /// Page size used when none is requested.
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Creates a query for the first page of every action.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by a single status. `None` means all statuses.
    #[must_use]
    pub const fn with_status(mut self, status: Option<ActionStatus>) -> Self {
        self.status = status;
        self
    }

    /// Restricts the listing to a tab.
    #[must_use]
    pub const fn with_tab(mut self, tab: Option<ActionTab>) -> Self {
        self.tab = tab;
        self
    }

    /// Restricts the listing to one owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: Option<ProfileId>) -> Self {
        self.owner = owner;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn sorted_by(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Sets the page window. Callers validate the bounds beforehand.
    #[must_use]
    pub const fn paged(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Returns the requested status filter.
    #[must_use]
    pub const fn status(&self) -> Option<ActionStatus> {
        self.status
    }

    /// Returns the requested tab.
    #[must_use]
    pub const fn tab(&self) -> Option<ActionTab> {
        self.tab
    }

    /// Returns the owner restriction.
    #[must_use]
    pub const fn owner(&self) -> Option<ProfileId> {
        self.owner
    }

    /// Returns the sort column.
    #[must_use]
    pub const fn sort_by(&self) -> SortField {
        self.sort_by
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Returns the statuses this query matches.
    ///
    /// A tab takes precedence over the status filter. Inside the active tab
    /// a status of `on_target` or `delayed` narrows the result; any other
    /// status filter is ignored while a tab is set.
    #[must_use]
    pub fn status_scope(&self) -> Vec<ActionStatus> {
        match (self.tab, self.status) {
            (Some(ActionTab::Active), Some(status)) if status.is_active() => vec![status],
            (Some(tab), _) => tab.statuses().to_vec(),
            (None, Some(status)) => vec![status],
            (None, None) => ActionStatus::ALL.to_vec(),
        }
    }

    /// Returns `true` when `action` satisfies the status and owner filters.
    #[must_use]
    pub fn matches(&self, action: &Action) -> bool {
        self.status_scope().contains(&action.status())
            && self.owner.is_none_or(|owner| owner == action.owner_id())
    }
}

/// Rows matching a query plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedActions {
    /// The requested page.
    pub items: Vec<Action>,
    /// Total rows matching the filters.
    pub total: u64,
}

/// Pagination metadata returned with a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total rows matching the filters.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of pages, `ceil(total / limit)`.
    pub pages: u64,
}

impl PageMeta {
    /// Computes metadata for `total` rows under `query`.
    #[must_use]
    pub fn for_query(query: &ActionQuery, total: u64) -> Self {
        let limit = u64::from(query.limit()).max(1);
        Self {
            total,
            page: query.page(),
            limit: query.limit(),
            pages: total.div_ceil(limit),
        }
    }
}

/// A page of actions with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPage {
    /// Actions on this page.
    pub data: Vec<Action>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Number of actions in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Actions on target.
    pub on_target: u64,
    /// Delayed actions.
    pub delayed: u64,
    /// Completed actions.
    pub complete: u64,
    /// Backlogged actions.
    pub backlog: u64,
}

impl StatusCounts {
    /// Adds `count` actions of `status`.
    pub const fn add(&mut self, status: ActionStatus, count: u64) {
        match status {
            ActionStatus::OnTarget => self.on_target += count,
            ActionStatus::Delayed => self.delayed += count,
            ActionStatus::Complete => self.complete += count,
            ActionStatus::Backlog => self.backlog += count,
        }
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn get(&self, status: ActionStatus) -> u64 {
        match status {
            ActionStatus::OnTarget => self.on_target,
            ActionStatus::Delayed => self.delayed,
            ActionStatus::Complete => self.complete,
            ActionStatus::Backlog => self.backlog,
        }
    }

    /// Returns the counts grouped by tab.
    #[must_use]
    pub const fn tabs(&self) -> TabCounts {
        TabCounts {
            active: self.on_target + self.delayed,
            backlog: self.backlog,
        }
    }
}

/// Number of actions under each tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCounts {
    /// `on_target` plus `delayed`.
    pub active: u64,
    /// `backlog`.
    pub backlog: u64,
}
