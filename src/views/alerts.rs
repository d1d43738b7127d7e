//! Alert list view: search, newest-first ordering, and compact bodies.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::models::{Alert, AlertAttributes};
use crate::time::{UNKNOWN_TIME, format_timestamp, parse_timestamp};

/// Bodies longer than this many characters are truncated unless expanded.
pub const MAX_BODY_CHARS: usize = 140;
pub const DEFAULT_HEADER: &str = "Service Alert";
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
const ELLIPSIS: char = '…';

/// Which alerts currently show their full description, keyed by alert id.
///
/// Owned by the caller; the builder only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedAlerts(HashMap<String, bool>);

impl ExpandedAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Flips one alert and returns its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let state = self.0.entry(id.to_string()).or_insert(false);
        *state = !*state;
        *state
    }
}

impl<S: Into<String>> FromIterator<S> for ExpandedAlerts {
    /// Marks every given id as expanded.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|id| (id.into(), true)).collect())
    }
}

/// Coarse display class derived from the numeric severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Default,
    High,
    Medium,
    Low,
}

impl SeverityTier {
    pub fn from_severity(severity: Option<f64>) -> Self {
        match severity {
            None => SeverityTier::Default,
            Some(s) if s >= 7.0 => SeverityTier::High,
            Some(s) if s >= 4.0 => SeverityTier::Medium,
            Some(_) => SeverityTier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::Default => "default",
            SeverityTier::High => "high",
            SeverityTier::Medium => "medium",
            SeverityTier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Badge {
    Effect(String),
    Severity(f64),
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Effect(effect) => f.write_str(effect),
            Badge::Severity(severity) => write!(f, "Severity {severity}"),
        }
    }
}

/// One alert, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertItem {
    pub id: String,
    pub header: String,
    pub body: String,
    /// The full description exceeds [`MAX_BODY_CHARS`], whether or not it is
    /// currently expanded.
    pub has_more: bool,
    pub expanded: bool,
    pub sent_at: Option<DateTime<FixedOffset>>,
    pub sent: String,
    pub updated: Option<String>,
    pub tier: SeverityTier,
    pub badges: Vec<Badge>,
}

impl AlertItem {
    fn new(
        alert: &Alert,
        sent_at: Option<DateTime<FixedOffset>>,
        expanded: &ExpandedAlerts,
    ) -> Self {
        let attrs = &alert.attributes;
        let header = non_empty(attrs.header.as_deref()).unwrap_or(DEFAULT_HEADER);
        let description = non_empty(attrs.description.as_deref()).unwrap_or(DEFAULT_DESCRIPTION);

        let is_expanded = expanded.is_expanded(&alert.id);
        let body = if is_expanded {
            Cow::Borrowed(description)
        } else {
            truncate_body(description, MAX_BODY_CHARS)
        };

        let mut badges = Vec::new();
        if let Some(effect) = non_empty(attrs.effect.as_deref()) {
            badges.push(Badge::Effect(effect.to_string()));
        }
        if let Some(severity) = attrs.severity {
            badges.push(Badge::Severity(severity));
        }

        Self {
            id: alert.id.clone(),
            header: header.to_string(),
            body: body.into_owned(),
            has_more: description.chars().count() > MAX_BODY_CHARS,
            expanded: is_expanded,
            sent_at,
            sent: sent_at
                .map(|t| format_timestamp(&t))
                .unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            updated: non_empty(attrs.updated_at.as_deref())
                .and_then(parse_timestamp)
                .map(|t| format_timestamp(&t)),
            tier: SeverityTier::from_severity(attrs.severity),
            badges,
        }
    }

    /// Label for the expand/collapse control, if the body is long enough to
    /// need one.
    pub fn toggle_label(&self) -> Option<&'static str> {
        match (self.has_more, self.expanded) {
            (false, _) => None,
            (true, false) => Some("More details"),
            (true, true) => Some("Show less"),
        }
    }
}

/// Counts shown above the list, and the message for an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertListSummary {
    pub shown: usize,
    pub total: usize,
    pub searched: bool,
}

impl AlertListSummary {
    pub fn new(shown: usize, total: usize, query: &str) -> Self {
        Self {
            shown,
            total,
            searched: !query.trim().is_empty(),
        }
    }

    pub fn counts_label(&self) -> String {
        format!("Showing {} of {}", self.shown, self.total)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match (self.shown, self.searched) {
            (0, true) => Some("No alerts found for your search."),
            (0, false) => Some("No alerts found."),
            _ => None,
        }
    }
}

/// Builds the display list for `alerts`.
///
/// A non-blank `query` keeps only alerts whose header or description contains
/// it, ignoring case. Results are ordered newest first by
/// [`resolve_alert_time`]; alerts without a usable time come last, and equal
/// times keep their input order. `alerts` itself is left untouched.
pub fn build_alert_items(
    alerts: &[Alert],
    query: &str,
    expanded: &ExpandedAlerts,
) -> Vec<AlertItem> {
    let needle = query.trim().to_lowercase();

    let mut matched: Vec<(&Alert, Option<DateTime<FixedOffset>>)> = alerts
        .iter()
        .filter(|alert| needle.is_empty() || matches_query(&alert.attributes, &needle))
        .map(|alert| (alert, resolve_alert_time(&alert.attributes)))
        .collect();

    // `None` orders below every timestamp, so a descending sort puts it last.
    matched.sort_by(|(_, a), (_, b)| b.cmp(a));

    matched
        .into_iter()
        .map(|(alert, sent_at)| AlertItem::new(alert, sent_at, expanded))
        .collect()
}

/// The timestamp an alert is sorted and labelled by.
///
/// `created_at` is used when present and non-empty, otherwise `updated_at`.
/// If the chosen value does not parse, the alert has no time; the other field
/// is not consulted.
pub fn resolve_alert_time(attrs: &AlertAttributes) -> Option<DateTime<FixedOffset>> {
    first_present(&[attrs.created_at.as_deref(), attrs.updated_at.as_deref()])
        .and_then(parse_timestamp)
}

/// Cuts `text` to `max_chars` characters, trims trailing whitespace and adds
/// an ellipsis. Text within the limit is returned as is.
pub fn truncate_body(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{}", text[..cut].trim_end(), ELLIPSIS)),
    }
}

fn matches_query(attrs: &AlertAttributes, needle: &str) -> bool {
    [attrs.header.as_deref(), attrs.description.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(needle))
}

fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().flatten().copied().find(|s| !s.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
