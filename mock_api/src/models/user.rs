use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user as the collection returns it. Fields other than id, name and email
/// are kept as sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredUser {
    /// Builds the stored form of a create or update body. A missing `name` is
    /// composed from `firstName` and `lastName`.
    pub fn from_body(id: u64, body: &Map<String, Value>) -> Self {
        let name = match body.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => [text(body, "firstName"), text(body, "lastName")]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        };

        let extra = body
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "id" | "name" | "email"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        StoredUser {
            id,
            name,
            email: text(body, "email").to_string(),
            extra,
        }
    }
}

fn text<'a>(body: &'a Map<String, Value>, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}
