//! Request and result types for the job analysis pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Job posting plus freelancer profile, as posted by the browser extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub skills: String,
    pub user_profile: String,
    pub user_skills: String,
}

/// A field the model emits either as prose or as a nested object
/// (e.g. `{"total_hours": 40, "phases": [...]}`).
#[derive(Debug, Clone, PartialEq)]
pub enum FlexibleField {
    Text(String),
    Structured(Map<String, Value>),
}

impl Default for FlexibleField {
    fn default() -> Self {
        FlexibleField::Text(String::new())
    }
}

impl FlexibleField {
    pub fn is_empty(&self) -> bool {
        match self {
            FlexibleField::Text(text) => text.is_empty(),
            FlexibleField::Structured(map) => map.is_empty(),
        }
    }
}

impl From<Value> for FlexibleField {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FlexibleField::default(),
            Value::String(text) => FlexibleField::Text(text),
            Value::Object(map) => FlexibleField::Structured(map),
            other => FlexibleField::Text(other.to_string()),
        }
    }
}

impl Serialize for FlexibleField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlexibleField::Text(text) => serializer.serialize_str(text),
            FlexibleField::Structured(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FlexibleField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FlexibleField::from)
    }
}

/// Structured output of a job analysis.
///
/// Missing keys and explicit `null`s both fall back to the field's empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "null_as_default")]
    pub proposal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub spec_sheet_prompt: String,
    pub time_estimate: FlexibleField,
    pub workload_division: FlexibleField,
    #[serde(deserialize_with = "null_as_default")]
    pub questions_for_client: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tips_and_advice: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tone_analysis: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
