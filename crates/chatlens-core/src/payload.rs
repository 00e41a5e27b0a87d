//! Wire shapes exchanged with the analytics backend.
//!
//! Every `AnalyticsResults` field is optional on the wire. Absent and `null` fields both take
//! the documented default (0 for counts, empty for series), and the whole payload is validated
//! once in [`parse_results`] / [`StatsResponse::from_json`] so use sites never re-check it.

use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Selection sentinel meaning "every participant".
pub const OVERALL: &str = "Overall";

/// Pseudo-user the backend assigns to system lines (joins, leaves, subject changes).
pub const GROUP_NOTIFICATION: &str = "group_notification";

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts may arrive as whole floats (`12.0`); fractional or negative values are rejected.
fn count_or_default<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountRepr {
        Int(u64),
        Float(f64),
    }

    match Option::<CountRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(CountRepr::Int(n)) => Ok(n),
        Some(CountRepr::Float(v)) if v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 => {
            Ok(v as u64)
        }
        Some(CountRepr::Float(v)) => Err(D::Error::custom(format!(
            "expected a non-negative whole count, got {v}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequency {
    pub text: String,
    pub frequency: f64,
}

impl WordFrequency {
    pub fn new(text: impl Into<String>, frequency: f64) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

impl<S: Into<String>> From<(S, f64)> for WordFrequency {
    fn from((text, frequency): (S, f64)) -> Self {
        Self::new(text, frequency)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordFrequencyRepr {
    Pair(String, f64),
    Object {
        #[serde(alias = "word")]
        text: String,
        #[serde(alias = "count")]
        frequency: f64,
    },
}

impl<'de> Deserialize<'de> for WordFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match WordFrequencyRepr::deserialize(deserializer)? {
            WordFrequencyRepr::Pair(text, frequency)
            | WordFrequencyRepr::Object { text, frequency } => Self { text, frequency },
        })
    }
}

impl Serialize for WordFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.text, self.frequency).serialize(serializer)
    }
}

/// One bucket of a per-day / per-month / per-hour series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub label: String,
    pub count: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimelinePointRepr {
    Pair(String, f64),
    Object {
        #[serde(alias = "time", alias = "period")]
        label: String,
        #[serde(alias = "message", alias = "messages")]
        count: f64,
    },
}

impl<'de> Deserialize<'de> for TimelinePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match TimelinePointRepr::deserialize(deserializer)? {
            TimelinePointRepr::Pair(label, count) | TimelinePointRepr::Object { label, count } => {
                Self { label, count }
            }
        })
    }
}

impl Serialize for TimelinePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.label, self.count).serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EmojiCountRepr {
    Pair(String, #[serde(deserialize_with = "count_or_default")] u64),
    Object {
        emoji: String,
        #[serde(deserialize_with = "count_or_default")]
        count: u64,
    },
}

impl<'de> Deserialize<'de> for EmojiCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match EmojiCountRepr::deserialize(deserializer)? {
            EmojiCountRepr::Pair(emoji, count) | EmojiCountRepr::Object { emoji, count } => {
                Self { emoji, count }
            }
        })
    }
}

impl Serialize for EmojiCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.emoji, self.count).serialize(serializer)
    }
}

/// Precomputed metrics for one selection, as returned under `results`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResults {
    #[serde(default, deserialize_with = "count_or_default")]
    pub num_messages: u64,
    #[serde(default, deserialize_with = "count_or_default")]
    pub num_words: u64,
    #[serde(default, deserialize_with = "count_or_default")]
    pub num_medias: u64,
    #[serde(default, deserialize_with = "count_or_default")]
    pub num_links: u64,
    /// Most active participants, busiest first. Only meaningful for the `Overall` selection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_users: Vec<String>,
    /// Message count per entry of `top_users`, index-aligned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_share: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emoji: Vec<EmojiCount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_timeline: Vec<TimelinePoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_timeline: Vec<TimelinePoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hourly_activity: Vec<TimelinePoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub word_cloud: Vec<WordFrequency>,
}

impl AnalyticsResults {
    /// Rejects values no chart can display. Length mismatches between `top_users` and
    /// `message_share` are tolerated; consumers zip the two.
    pub fn validate(&self) -> Result<()> {
        if let Some((i, v)) = self
            .message_share
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(Error::invalid_payload(format!(
                "message_share[{i}] is not a finite number ({v})"
            )));
        }
        for (field, series) in [
            ("daily_timeline", &self.daily_timeline),
            ("monthly_timeline", &self.monthly_timeline),
            ("hourly_activity", &self.hourly_activity),
        ] {
            if let Some(p) = series.iter().find(|p| !p.count.is_finite()) {
                return Err(Error::invalid_payload(format!(
                    "{field} entry {:?} has a non-finite count",
                    p.label
                )));
            }
        }
        if let Some(w) = self.word_cloud.iter().find(|w| !w.frequency.is_finite()) {
            return Err(Error::invalid_payload(format!(
                "word_cloud entry {:?} has a non-finite frequency",
                w.text
            )));
        }
        Ok(())
    }

    pub fn has_top_users(&self) -> bool {
        !self.top_users.is_empty()
    }
}

/// `{"results": {...}}` as returned by the stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: AnalyticsResults,
}

impl StatsResponse {
    pub fn from_json(text: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(text)?;
        response.results.validate()?;
        Ok(response)
    }
}

/// Accepts either a stats response envelope or a bare results object.
///
/// An envelope goes through [`StatsResponse`], so `{"results": null}` means empty results here
/// too.
pub fn parse_results(text: &str) -> Result<AnalyticsResults> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(Error::invalid_payload("expected a JSON object"));
    };
    let results: AnalyticsResults = if map.contains_key("results") {
        serde_json::from_value::<StatsResponse>(Value::Object(map))?.results
    } else {
        serde_json::from_value(Value::Object(map))?
    };
    results.validate()?;
    tracing::debug!(
        num_messages = results.num_messages,
        top_users = results.top_users.len(),
        words = results.word_cloud.len(),
        "parsed analytics results"
    );
    Ok(results)
}

/// Which participant the statistics are computed for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum UserSelection {
    #[default]
    Overall,
    User(String),
}

impl UserSelection {
    pub fn parse(raw: &str) -> Self {
        if raw == OVERALL {
            Self::Overall
        } else {
            Self::User(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Overall => OVERALL,
            Self::User(name) => name,
        }
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, Self::Overall)
    }
}

impl From<&str> for UserSelection {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for UserSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UserSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// `{"user_list": [...]}` as returned by the upload endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_list: Vec<String>,
}

impl UploadResponse {
    /// Dropdown entries in backend order, without system pseudo-users or blanks.
    pub fn selections(&self) -> Vec<UserSelection> {
        self.user_list
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty() && *u != GROUP_NOTIFICATION)
            .map(UserSelection::parse)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRequest {
    pub selected_user: UserSelection,
    pub file_name: String,
}

impl StatsRequest {
    pub fn new(selected_user: UserSelection, file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(Error::invalid_payload(
                "upload a chat file before requesting statistics",
            ));
        }
        if let UserSelection::User(name) = &selected_user {
            if name.trim().is_empty() {
                return Err(Error::invalid_payload(
                    "select a user before requesting statistics",
                ));
            }
        }
        Ok(Self {
            selected_user,
            file_name,
        })
    }
}

/// `{"error": "..."}` body of a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.error.as_deref() {
            Some(msg) if !msg.trim().is_empty() => msg,
            _ => fallback,
        }
    }
}
