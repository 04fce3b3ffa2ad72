use serde::{Deserialize, Deserializer, Serialize};

/// Acknowledgement of an upload. The service echoes what it stored; every
/// field is optional so a bare `{}` still counts as success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadAck {
    /// Database ids come back as numbers; kept as text either way.
    #[serde(deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub size: Option<u64>,
    pub category: Option<String>,
    #[serde(rename = "uploadedBy")]
    pub uploaded_by: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|id| match id {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Number(number) => number.to_string(),
        }),
    )
}
