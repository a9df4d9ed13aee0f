use crate::error::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Top level of the projections API response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionsPayload {
    #[serde(default)]
    pub data: Vec<ApiObject>,
    #[serde(default)]
    pub included: Vec<ApiObject>,
}

impl ProjectionsPayload {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A JSON:API style resource object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiObject {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: Map<String, Value>,
}

impl ApiObject {
    pub fn id_text(&self) -> Option<String> {
        self.id.as_ref().and_then(value_text)
    }

    /// Attribute rendered as text; `None` when absent or null
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.get(key).and_then(value_text)
    }

    /// `relationships.<name>.data.id`
    pub fn related_id(&self, relationship: &str) -> Option<String> {
        self.relationships
            .get(relationship)
            .and_then(|r| r.get("data"))
            .and_then(|d| d.get("id"))
            .and_then(value_text)
    }
}

/// Strings as-is, numbers and booleans in their JSON spelling
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tolerates_missing_collections() {
        let payload = ProjectionsPayload::parse(r#"{"meta": {}}"#).unwrap();
        assert!(payload.data.is_empty());
        assert!(payload.included.is_empty());
    }

    #[test]
    fn test_attribute_rendering() {
        let obj: ApiObject = serde_json::from_value(json!({
            "id": 123,
            "type": "projection",
            "attributes": {"line_score": 24.5, "stat_type": "Points", "odds_type": null},
            "relationships": {"new_player": {"data": {"id": "9001", "type": "new_player"}}}
        }))
        .unwrap();

        assert_eq!(obj.id_text().as_deref(), Some("123"));
        assert_eq!(obj.attribute("line_score").as_deref(), Some("24.5"));
        assert_eq!(obj.attribute("stat_type").as_deref(), Some("Points"));
        assert_eq!(obj.attribute("odds_type"), None);
        assert_eq!(obj.related_id("new_player").as_deref(), Some("9001"));
        assert_eq!(obj.related_id("league"), None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ProjectionsPayload::parse("{not json").is_err());
    }
}
