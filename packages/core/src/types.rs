//! Schema descriptors discovered from the source.
//!
//! These types are built fresh for each request from the source's property,
//! relationship and item-type listings, and are the only input the shape
//! synthesiser needs: [`ItemSchema`] bundles [`PropertyDescriptor`]s,
//! [`RelationshipDescriptor`]s and the versionability flag.

use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;

use crate::naming::ItemTypeName;
use crate::vocab::oslc;

/// A property's declared data type in the source.
///
/// Unrecognised names parse to [`DataType::Other`], which maps to
/// `xsd:string` in shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    String,
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Decimal,
    /// A reference to an item of another type.
    Item,
    Other(String),
}

impl DataType {
    /// Parse the source's lowercase data type name. Never fails.
    pub fn parse(name: &str) -> Self {
        match name {
            "string" => DataType::String,
            "text" => DataType::Text,
            "integer" => DataType::Integer,
            "float" => DataType::Float,
            "boolean" => DataType::Boolean,
            "date" => DataType::Date,
            "decimal" => DataType::Decimal,
            "item" => DataType::Item,
            other => DataType::Other(other.to_string()),
        }
    }

    /// The literal value type this data type maps to.
    ///
    /// [`DataType::Item`] only reaches this when the property names no
    /// referenced type; like unknown types it falls back to string.
    pub fn value_type(&self) -> ValueType {
        match self {
            DataType::String | DataType::Text => ValueType::String,
            DataType::Integer => ValueType::Integer,
            DataType::Float => ValueType::Float,
            DataType::Boolean => ValueType::Boolean,
            DataType::Date => ValueType::DateTime,
            DataType::Decimal => ValueType::Decimal,
            DataType::Item | DataType::Other(_) => ValueType::String,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "string"),
            DataType::Text => write!(f, "text"),
            DataType::Integer => write!(f, "integer"),
            DataType::Float => write!(f, "float"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Date => write!(f, "date"),
            DataType::Decimal => write!(f, "decimal"),
            DataType::Item => write!(f, "item"),
            DataType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Literal value types used in shapes (`oslc:valueType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Decimal,
    /// A link to another resource (`oslc:Resource`).
    Resource,
}

impl ValueType {
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            ValueType::String => xsd::STRING,
            ValueType::Integer => xsd::INTEGER,
            ValueType::Float => xsd::FLOAT,
            ValueType::Boolean => xsd::BOOLEAN,
            ValueType::DateTime => xsd::DATE_TIME,
            ValueType::Decimal => xsd::DECIMAL,
            ValueType::Resource => NamedNodeRef::new_unchecked(oslc::RESOURCE),
        }
    }
}

/// Property cardinality (`oslc:occurs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    ExactlyOne,
    ZeroOrOne,
    ZeroOrMany,
}

impl Occurrence {
    pub fn iri(self) -> NamedNodeRef<'static> {
        NamedNodeRef::new_unchecked(match self {
            Occurrence::ExactlyOne => oslc::EXACTLY_ONE,
            Occurrence::ZeroOrOne => oslc::ZERO_OR_ONE,
            Occurrence::ZeroOrMany => oslc::ZERO_OR_MANY,
        })
    }

    /// `true` for `Exactly-one` and `Zero-or-one`.
    pub fn is_single(self) -> bool {
        !matches!(self, Occurrence::ZeroOrMany)
    }
}

/// One property of an item type, as listed by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
    /// Target type when `data_type` is [`DataType::Item`].
    pub referenced_item_type: Option<ItemTypeName>,
}

impl PropertyDescriptor {
    /// Build a descriptor. The `id` property is always typed as string,
    /// whatever the source declares for it.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        required: bool,
        referenced_item_type: Option<ItemTypeName>,
    ) -> Self {
        let name = name.into();
        let data_type = if name == "id" { DataType::String } else { data_type };
        Self {
            name,
            data_type,
            required,
            referenced_item_type,
        }
    }

    /// The referenced type, if this property is a cross-type reference.
    pub fn reference_target(&self) -> Option<&ItemTypeName> {
        match self.data_type {
            DataType::Item => self.referenced_item_type.as_ref(),
            _ => None,
        }
    }
}

/// A to-many association from an item type to another item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    pub name: ItemTypeName,
}

/// Everything Schema Discovery learns about one item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSchema {
    pub item_type: ItemTypeName,
    pub properties: Vec<PropertyDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
    pub versionable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_parse_and_display() {
        for name in ["string", "text", "integer", "float", "boolean", "date", "decimal", "item"] {
            assert_eq!(DataType::parse(name).to_string(), name);
        }
        assert_eq!(DataType::parse("md5"), DataType::Other("md5".into()));
    }

    #[test]
    fn value_type_mapping() {
        assert_eq!(DataType::Text.value_type(), ValueType::String);
        assert_eq!(DataType::Date.value_type(), ValueType::DateTime);
        assert_eq!(DataType::Decimal.value_type(), ValueType::Decimal);
        assert_eq!(DataType::parse("sequence").value_type(), ValueType::String);
        assert_eq!(ValueType::DateTime.iri(), xsd::DATE_TIME);
    }

    #[test]
    fn id_property_is_forced_to_string() {
        let p = PropertyDescriptor::new("id", DataType::Integer, true, None);
        assert_eq!(p.data_type, DataType::String);
        let q = PropertyDescriptor::new("weight", DataType::Integer, false, None);
        assert_eq!(q.data_type, DataType::Integer);
    }

    #[test]
    fn reference_target_requires_item_type() {
        let material = ItemTypeName::from_source("Material");
        let p = PropertyDescriptor::new("material", DataType::Item, false, Some(material.clone()));
        assert_eq!(p.reference_target(), Some(&material));

        let dangling = PropertyDescriptor::new("owner", DataType::Item, false, None);
        assert_eq!(dangling.reference_target(), None);

        let literal = PropertyDescriptor::new("name", DataType::String, false, Some(material));
        assert_eq!(literal.reference_target(), None);
    }
}
