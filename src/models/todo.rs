use chrono::prelude::{DateTime, Utc};
use chrono::SubsecRound;
use serde::{Deserialize, Serialize};

pub type TodoId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// A fresh, uncompleted todo stamped with the current time.
    ///
    /// The timestamp is cut to milliseconds so that what is stored on disk
    /// reads back as the same value.
    pub fn new(id: TodoId, text: String) -> Self {
        Todo {
            id,
            text,
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Body of create and update-text requests.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TodoText {
    #[serde(default)]
    pub text: Option<String>,
}

impl TodoText {
    /// The trimmed text, or `None` when it is missing or blank.
    pub fn trimmed(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

// ISO-8601 with millisecond precision and a `Z` suffix, e.g.
// `2026-10-17T09:30:00.123Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
