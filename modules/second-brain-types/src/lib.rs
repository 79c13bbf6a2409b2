//! Shared types for the second brain service and its clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Hard cap on how many memories a list request returns.
pub const LIST_LIMIT: usize = 200;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_SOURCE: &str = "dashboard";

/// Columns selected for every memory read.
pub const MEMORY_COLUMNS: &str = "id,title,category,tags,content,created_at,source";

// =====================================================
// Domain Types
// =====================================================

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[serde(rename = "YouTube")]
    #[strum(serialize = "YouTube")]
    YouTube,
    #[serde(rename = "Shadow Operator")]
    #[strum(serialize = "Shadow Operator")]
    ShadowOperator,
    Body,
    Move,
    Books,
    #[serde(rename = "AI")]
    #[strum(serialize = "AI")]
    Ai,
    #[default]
    Other,
}

impl Category {
    pub fn all() -> Vec<Category> {
        Category::iter().collect()
    }

    /// Reads a stored label, falling back to `Other` for null or unknown values.
    pub fn from_stored(label: Option<&str>) -> Category {
        label
            .and_then(|l| Category::from_str(l.trim()).ok())
            .unwrap_or_default()
    }
}

/// A captured note, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MemoryRow")]
pub struct Memory {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub content: String,
    pub created_at: String,
    pub source: String,
}

impl Memory {
    /// Case-insensitive substring match against title, content or any tag.
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Raw row shape of the `memories` table. Nullable columns are mapped to
/// their defaults when converted into a [`Memory`].
#[derive(Debug, Deserialize)]
struct MemoryRow {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    // text[] columns may hold NULL elements
    #[serde(default)]
    tags: Option<Vec<Option<String>>>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl From<MemoryRow> for Memory {
    fn from(row: MemoryRow) -> Self {
        Memory {
            id: row.id,
            title: row.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            category: Category::from_stored(row.category.as_deref()),
            tags: row.tags.unwrap_or_default().into_iter().flatten().collect(),
            content: row.content.unwrap_or_default(),
            created_at: row
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            source: row.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        }
    }
}

// Row ids are uuids upstream, but integer keys are accepted too.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unsupported memory id: {}",
            other
        ))),
    }
}

// =====================================================
// Drafts
// =====================================================

/// User-supplied, not yet persisted memory fields. Every field is optional;
/// `tags` stays a raw JSON value so that non-array input can be coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Title or content is required")]
    MissingTitleAndContent,
    #[error("Invalid category")]
    UnknownCategory(String),
}

/// A validated draft with every default applied, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub title: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub content: String,
    pub source: String,
}

impl MemoryDraft {
    pub fn new(title: &str, category: Category, tags: Vec<String>, content: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            category: Some(category.to_string()),
            tags: Some(Value::from(tags)),
            content: Some(content.to_string()),
            source: Some(DEFAULT_SOURCE.to_string()),
        }
    }

    /// Applies insert defaults. Rejects only when both title and content are
    /// blank, or when a category outside the closed set is named.
    pub fn normalize(self) -> Result<NewMemory, DraftError> {
        let title = non_blank(self.title);
        let content = non_blank(self.content);
        if title.is_none() && content.is_none() {
            return Err(DraftError::MissingTitleAndContent);
        }

        let category = match non_blank(self.category) {
            None => Category::Other,
            Some(label) => Category::from_str(label.trim())
                .map_err(|_| DraftError::UnknownCategory(label))?,
        };

        let tags = match self.tags {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(NewMemory {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            category,
            tags,
            content: content.unwrap_or_default(),
            source: self
                .source
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Splits comma separated tag input, trimming each tag and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// =====================================================
// Filtering
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Category::from_str(s).map(CategoryFilter::Only)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

/// Filters by category and query, then orders newest first.
///
/// Timestamps are compared as ISO-8601 strings, which matches chronological
/// order as long as they share a timezone representation.
pub fn filter_memories<'a>(
    memories: &'a [Memory],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a Memory> {
    let needle = query.trim().to_lowercase();
    let mut out: Vec<&Memory> = memories
        .iter()
        .filter(|m| category.matches(m.category))
        .filter(|m| needle.is_empty() || m.matches_query(&needle))
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

// =====================================================
// HTTP Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMemoriesResponse {
    pub memories: Vec<Memory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMemoryResponse {
    pub memory: Memory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
}
