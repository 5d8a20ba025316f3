use serde::{Deserialize, Serialize};

use crate::event::ActivityEvent;

/// Page size used when the caller gives none, or a non-positive one.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// One page of an actor's events, oldest first.
///
/// `next_cursor` is the decimal offset of the first event not returned, or
/// `None` once the end of the sequence has been reached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    pub items: Vec<ActivityEvent>,
    pub next_cursor: Option<String>,
}

impl EventsPage {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Resolve an opaque cursor to a read offset.
///
/// Absent, non-numeric, and negative cursors all mean "start".
pub fn resolve_offset(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.trim().parse::<i64>().ok())
        .filter(|offset| *offset >= 0)
        .map(|offset| offset as usize)
        .unwrap_or(0)
}

/// Resolve a requested page size, falling back to [`DEFAULT_PAGE_LIMIT`].
pub fn resolve_limit(limit: Option<i64>) -> usize {
    match limit {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_PAGE_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_defaults_to_zero() {
        assert_eq!(resolve_offset(None), 0);
        assert_eq!(resolve_offset(Some("")), 0);
        assert_eq!(resolve_offset(Some("abc")), 0);
        assert_eq!(resolve_offset(Some("-3")), 0);
        assert_eq!(resolve_offset(Some("7")), 7);
    }

    #[test]
    fn limit_defaults_to_twenty() {
        assert_eq!(resolve_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(resolve_limit(Some(0)), DEFAULT_PAGE_LIMIT);
        assert_eq!(resolve_limit(Some(-5)), DEFAULT_PAGE_LIMIT);
        assert_eq!(resolve_limit(Some(3)), 3);
    }

    #[test]
    fn page_serializes_null_cursor() {
        let value = serde_json::to_value(EventsPage::empty()).unwrap();
        assert_eq!(value, serde_json::json!({ "items": [], "nextCursor": null }));
    }
}
