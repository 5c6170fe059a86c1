// ============================================================================
// GENERATION MODELS - Remote-owned records, fetched and cached per page
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Explicit `null` reads as the type's default, like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Queued => "queued",
            GenerationStatus::Running => "running",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
            GenerationStatus::Cancelled => "cancelled",
            GenerationStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> String {
        crate::utils::capitalize(self.as_str())
    }

    /// Badge class; anything unrecognised is drawn like a cancelled job
    pub fn badge_class(&self) -> &'static str {
        match self {
            GenerationStatus::Completed => "badge badge-completed",
            GenerationStatus::Running => "badge badge-running",
            GenerationStatus::Queued => "badge badge-queued",
            GenerationStatus::Failed => "badge badge-failed",
            GenerationStatus::Cancelled | GenerationStatus::Unknown => "badge badge-cancelled",
        }
    }
}

/// One row of the generations list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: GenerationStatus,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub generation_time_seconds: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub current_version: Option<u32>,
    #[serde(default)]
    pub last_updated_by: Option<String>,
}

impl Generation {
    pub fn mode_label(&self) -> &str {
        self.mode.as_deref().filter(|m| !m.is_empty()).unwrap_or("manual")
    }

    pub fn is_viewable(&self) -> bool {
        self.status == GenerationStatus::Completed
    }

    pub fn is_owned_by(&self, email: Option<&str>) -> bool {
        matches!((self.email.as_deref(), email), (Some(owner), Some(me)) if owner == me)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Mine,
    Published,
}

impl ListFilter {
    pub const ALL: [ListFilter; 3] = [ListFilter::All, ListFilter::Mine, ListFilter::Published];

    pub fn as_query(&self) -> &'static str {
        match self {
            ListFilter::All => "all",
            ListFilter::Mine => "mine",
            ListFilter::Published => "published",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListFilter::All => "All",
            ListFilter::Mine => "Mine",
            ListFilter::Published => "Published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pagination {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationPage {
    #[serde(default)]
    pub generations: Vec<Generation>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pre-generation analysis of an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PrelightReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ui_story: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_tokens: u64,
    #[serde(default)]
    pub estimated_cost: Option<serde_json::Value>,
}

impl PrelightReport {
    /// The backend sends the estimate either preformatted or as a number
    pub fn estimated_cost_label(&self) -> String {
        match &self.estimated_cost {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => format!("{:.4}", v),
                None => n.to_string(),
            },
            _ => "0.0000".to_string(),
        }
    }
}

/// Elapsed time as reported by the backend, number or preformatted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationTime {
    Seconds(f64),
    Text(String),
}

impl fmt::Display for GenerationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationTime::Seconds(s) => write!(f, "{:.1} seconds", s),
            GenerationTime::Text(s) => write!(f, "{} seconds", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub generation_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_key: String,
    #[serde(default)]
    pub generation_time_seconds: Option<GenerationTime>,
    #[serde(default)]
    pub markdown: Option<String>,
}

impl GenerationResult {
    pub fn has_document(&self) -> bool {
        self.markdown.as_deref().is_some_and(|m| !m.is_empty())
    }
}

pub const DEFAULT_FILENAME: &str = "output.md";

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_version() -> u32 {
    1
}

/// Null or blank names fall back to `output.md`
fn filename_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(default_filename))
}

/// Versions start at 1; null or 0 mean "first"
fn version_or_first<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let version = Option::<u32>::deserialize(deserializer)?;
    Ok(version.filter(|v| *v > 0).unwrap_or_else(default_version))
}

/// Full document as returned by /generations/:id/view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationView {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default = "default_filename", deserialize_with = "filename_or_default")]
    pub filename: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub issue_key: Option<String>,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default = "default_version", deserialize_with = "version_or_first")]
    pub current_version: u32,
    #[serde(default)]
    pub last_updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdate {
    pub content: String,
    #[serde(default)]
    pub current_version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublishState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub published_by: Option<String>,
}
