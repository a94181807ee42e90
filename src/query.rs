//! Filter objects to query strings.
//!
//! Absent and empty values are left out entirely: the server treats a present
//! but empty filter differently from a missing one.

use std::fmt::{Debug, Display};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value` unless the value is `None` or renders as `""`.
    pub fn param<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.pairs.push((key.to_string(), value));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// `?k=v&...`, or `""` when nothing survived. Never a bare `?`.
    pub fn build(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }
}

pub trait ToQuery {
    fn to_query(&self) -> QueryBuilder;

    fn to_query_string(&self) -> String {
        self.to_query().build()
    }
}

/// A list query that carries paging. Absent paging echoes as page 1 of 10.
pub trait ListQuery: ToQuery + Clone + Debug + Send + Sync + 'static {
    fn page(&self) -> Option<u32>;
    fn page_size(&self) -> Option<u32>;

    fn page_or_default(&self) -> u32 {
        self.page().unwrap_or(DEFAULT_PAGE)
    }

    fn page_size_or_default(&self) -> u32 {
        self.page_size().unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort direction. Parses any letter case, renders lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}
