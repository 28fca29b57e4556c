use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SourceCategory {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One catalog entry. Unknown fields ride along in `extra` so the cached
/// catalog stays a faithful copy of what the source served.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SourceItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SourceCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceItem {
    pub fn new(name: &str, image_url: &str, category: Option<&str>) -> Self {
        SourceItem {
            name: name.to_string(),
            image_url: image_url.to_string(),
            category: category.map(|c| SourceCategory {
                name: c.to_string(),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    pub fn src_url(&self) -> &str {
        self.image_url.split('?').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn src_url_drops_query_suffix() {
        let item = SourceItem::new("party", "https://cdn.example/a/party.gif?1500000000", None);
        assert_eq!(item.src_url(), "https://cdn.example/a/party.gif");
    }

    #[test]
    fn deserializes_slackmojis_shape() {
        let raw = r#"{"id":7,"name":"nba-logo","image_url":"https://x/nba.png?1",
            "category":{"id":3,"name":"NBA"}}"#;
        let item: SourceItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.name, "nba-logo");
        assert_eq!(item.category.as_ref().map(|c| c.name.as_str()), Some("NBA"));
        assert_eq!(item.extra.get("id"), Some(&Value::from(7)));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["category"]["id"], Value::from(3));
    }

    #[test]
    fn null_category_is_absent() {
        let raw = r#"{"name":"x","image_url":"https://x/x.png","category":null}"#;
        let item: SourceItem = serde_json::from_str(raw).unwrap();
        assert!(item.category.is_none());
    }
}
