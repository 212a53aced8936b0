//! List filter and its URL-fragment route.
//!
//! The filter lives in the fragment as a query parameter, e.g.
//! `#/?filter=active`. Anything missing or unrecognized means `All`.

use std::fmt;

use crate::types::Todo;

/// Which subset of todos the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Wire name, as sent in `/todos?filter=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Parse a wire name. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" => Some(Filter::Completed),
            _ => None,
        }
    }

    /// Read the `filter` parameter out of a URL fragment.
    ///
    /// Accepts the fragment with or without the leading `#` and `/`, with or
    /// without the `?`. The first `filter=` parameter wins.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.trim_start_matches('#').trim_start_matches('/');
        let query = match fragment.split_once('?') {
            Some((_, query)) => query,
            None => fragment,
        };
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "filter")
            .and_then(|(_, value)| Filter::from_name(value))
            .unwrap_or_default()
    }

    /// The fragment that selects this filter.
    pub fn to_fragment(&self) -> String {
        format!("#/?filter={}", self.as_str())
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
