//! Window rule matching.
//!
//! Rules from the `tiling.floating` and `tiling.ignore` configuration lists
//! decide how a window takes part in a tiling pass.
//!
//! # Rule Matching
//!
//! Rules use AND logic - all specified properties must match for a rule to match.
//! At least one property must be specified for a rule to be valid.
//!
//! # Examples
//!
//! ```text
//! // Rule: appId = "com.apple.finder"
//! // Matches: Any Finder window
//!
//! // Rule: appId = "com.apple.Safari", title = "Settings"
//! // Matches: Safari windows with "Settings" in title (AND logic)
//! ```

use super::window::WindowInfo;
use crate::config::{TilingConfig, WindowRule};

/// Checks if a window matches a rule.
///
/// All specified properties in the rule must match (AND logic).
/// Returns `false` if the rule has no matching criteria.
///
/// # Matching Behavior
///
/// - `app_id`: Case-insensitive exact match against the bundle identifier.
///   Windows without a bundle identifier never match.
/// - `app_name`: Case-insensitive substring match
/// - `title`: Case-insensitive substring match
#[must_use]
pub fn matches_window(rule: &WindowRule, window: &WindowInfo) -> bool {
    if !rule.is_valid() {
        return false;
    }

    if let Some(app_id) = rule.app_id_lowercase() {
        let Some(bundle_id) = window.bundle_id.as_deref() else {
            return false;
        };
        if !bundle_id.eq_ignore_ascii_case(app_id) {
            return false;
        }
    }

    if let Some(app_name) = rule.app_name_lowercase()
        && !window.app_name.to_lowercase().contains(app_name)
    {
        return false;
    }

    if let Some(title) = rule.title_lowercase()
        && !window.title.to_lowercase().contains(title)
    {
        return false;
    }

    true
}

/// Checks if any rule in the list matches the window.
#[must_use]
pub fn any_rule_matches(rules: &[WindowRule], window: &WindowInfo) -> bool {
    rules.iter().any(|rule| matches_window(rule, window))
}

/// How a window takes part in a pass, according to the configured rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleClass {
    /// No rule applies.
    Managed,
    /// Matched a floating rule: kept, but never placed.
    Floating,
    /// Matched an ignore rule: dropped from the pass.
    Ignored,
}

/// Classifies a window. Ignore rules win over floating rules.
#[must_use]
pub fn classify(config: &TilingConfig, window: &WindowInfo) -> RuleClass {
    if any_rule_matches(&config.ignore, window) {
        RuleClass::Ignored
    } else if any_rule_matches(&config.floating, window) {
        RuleClass::Floating
    } else {
        RuleClass::Managed
    }
}
