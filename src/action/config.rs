//! Tunable business rules for the action lifecycle.

use serde::{Deserialize, Serialize};

/// Limits applied by validation and the WIP-limit enforcer.
///
/// Deserialises from partial documents; missing keys fall back to the
/// defaults.
///
/// # Examples
///
/// ```
/// use misekai::action::config::ActionRules;
///
/// let rules: ActionRules = serde_json::from_str(r#"{"wip_limit": 3}"#).expect("valid rules");
/// assert_eq!(rules.wip_limit, 3);
/// assert_eq!(rules.max_notes_chars, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRules {
    /// Active actions an owner may hold before new ones go to backlog.
    pub wip_limit: u64,
    /// Minimum description length in characters.
    pub min_description_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
    /// Maximum notes length in characters.
    pub max_notes_chars: usize,
    /// Minimum delay reason length in characters.
    pub min_reason_chars: usize,
    /// Maximum delay reason length in characters.
    pub max_reason_chars: usize,
    /// Largest page size a listing may request.
    pub max_page_limit: u32,
    /// Page size used when a listing does not ask for one.
    pub default_page_limit: u32,
}

impl ActionRules {
    /// Default work-in-progress limit.
    pub const DEFAULT_WIP_LIMIT: u64 = 5;

    /// Returns a copy with a different WIP limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, wip_limit: u64) -> Self {
        self.wip_limit = wip_limit;
        self
    }
}

impl Default for ActionRules {
    fn default() -> Self {
        Self {
            wip_limit: Self::DEFAULT_WIP_LIMIT,
            min_description_chars: 5,
            max_description_chars: 500,
            max_notes_chars: 2000,
            min_reason_chars: 10,
            max_reason_chars: 500,
            max_page_limit: 100,
            default_page_limit: 20,
        }
    }
}
