//! Window rule configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rule for matching windows.
///
/// All specified properties must match (AND logic). At least one property
/// must be specified.
///
/// Call [`WindowRule::prepare()`] after loading rules to cache lowercase
/// copies of the string fields used during matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowRule {
    /// Match by bundle identifier (e.g., "com.apple.finder"). Exact, case-insensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// Match by window title (substring match).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Match by application name (substring match).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(skip)]
    #[schemars(skip)]
    pub(crate) app_id_lower: Option<String>,

    #[serde(skip)]
    #[schemars(skip)]
    pub(crate) title_lower: Option<String>,

    #[serde(skip)]
    #[schemars(skip)]
    pub(crate) app_name_lower: Option<String>,
}

impl WindowRule {
    /// Returns true if the rule has at least one matching criterion.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.app_id.is_some() || self.title.is_some() || self.app_name.is_some()
    }

    /// Caches lowercase versions of the string fields.
    pub fn prepare(&mut self) {
        self.app_id_lower = self.app_id.as_ref().map(|s| s.to_ascii_lowercase());
        self.title_lower = self.title.as_ref().map(|s| s.to_lowercase());
        self.app_name_lower = self.app_name.as_ref().map(|s| s.to_lowercase());
    }

    #[must_use]
    pub fn app_id_lowercase(&self) -> Option<&str> {
        self.app_id_lower.as_deref().or(self.app_id.as_deref())
    }

    #[must_use]
    pub fn title_lowercase(&self) -> Option<&str> {
        self.title_lower.as_deref().or(self.title.as_deref())
    }

    #[must_use]
    pub fn app_name_lowercase(&self) -> Option<&str> {
        self.app_name_lower.as_deref().or(self.app_name.as_deref())
    }
}
