//! Rows returned by the source's OData endpoint.
//!
//! Only the fields the adapter reads are modelled; everything else in a row
//! is ignored. Boolean flags arrive as `"1"`/`"0"` strings on most servers,
//! so they go through [`flag`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use plm_oslc::{DataType, ItemTypeName, PropertyDescriptor, RelationshipDescriptor};

/// The `{"@odata.context": .., "value": [..]}` collection wrapper.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ODataCollection<T> {
    #[serde(rename = "@odata.context", default)]
    pub context: Option<String>,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Deserialize a loosely typed flag: `"1"`, `1`, `true` and `"true"` are set;
/// anything else, including `null`, is unset.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Deserialize a string-or-number field into its string form.
fn lexical<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemTypeRow {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_versionable: bool,
}

impl ItemTypeRow {
    pub fn item_type(&self) -> ItemTypeName {
        ItemTypeName::from_source(self.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PropertyRow {
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    /// Name of the referenced item type for `item` properties.
    #[serde(rename = "data_source@aras.name", default)]
    pub data_source: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_required: bool,
}

impl PropertyRow {
    pub fn to_descriptor(&self) -> PropertyDescriptor {
        let data_type = DataType::parse(self.data_type.as_deref().unwrap_or("string"));
        let target = self
            .data_source
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(ItemTypeName::from_source);
        PropertyDescriptor::new(self.name.as_str(), data_type, self.is_required, target)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RelationshipRow {
    pub name: String,
}

impl RelationshipRow {
    pub fn to_descriptor(&self) -> RelationshipDescriptor {
        RelationshipDescriptor {
            name: ItemTypeName::from_source(self.name.as_str()),
        }
    }
}

/// `config_id` either expanded (`{"id": ..}`) or as a bare id.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConfigRef {
    Expanded { id: String },
    Bare(String),
}

impl ConfigRef {
    pub fn id(&self) -> &str {
        match self {
            ConfigRef::Expanded { id } | ConfigRef::Bare(id) => id,
        }
    }
}

/// One item (one generation of a configuration).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemRow {
    pub id: String,
    #[serde(default)]
    pub keyed_name: Option<String>,
    #[serde(default, deserialize_with = "lexical")]
    pub generation: Option<String>,
    #[serde(default)]
    pub config_id: Option<ConfigRef>,
}

impl ItemRow {
    /// The configuration id, falling back to the item id for rows whose
    /// `config_id` was not returned.
    pub fn config_id(&self) -> &str {
        self.config_id.as_ref().map(ConfigRef::id).unwrap_or(self.id.as_str())
    }
}
