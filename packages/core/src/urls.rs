//! The URL scheme of produced resources.
//!
//! Every URL the adapter emits is derived from one service root
//! (`{public_base}/api/oslc`) and one vocabulary namespace for item-type
//! classes:
//!
//! | Resource | URL |
//! |----------|-----|
//! | Service provider | `{root}` |
//! | Query capability | `{root}/{Type}` |
//! | Resource shape | `{root}/{Type}/resourceShape` |
//! | Item | `{root}/{Type}/{configId}` |
//! | Components | `{root}/config/{Type}/components` |
//! | Component | `{root}/config/{Type}/component/{configId}` |
//! | Configurations | `{component}/configurations` |
//! | Stream | `{component}/stream/{streamId}` |
//!
//! `{Type}` is always the dot form of the item type name.

use crate::naming::{url_safe, ItemTypeName};

/// Query parameter carrying a configuration context on item URLs.
pub const CONFIG_CONTEXT_PARAM: &str = "oslc_config.context";

/// Builder for every produced URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    root: String,
    vocab_ns: String,
}

impl ServiceUrls {
    /// `root` is the service provider URL; a trailing `/` is dropped.
    pub fn new(root: impl Into<String>, vocab_ns: impl Into<String>) -> Self {
        let root = root.into().trim_end_matches('/').to_string();
        Self {
            root,
            vocab_ns: vocab_ns.into(),
        }
    }

    pub fn service_provider(&self) -> &str {
        &self.root
    }

    pub fn vocab_ns(&self) -> &str {
        &self.vocab_ns
    }

    /// Class IRI of an item type, e.g. `{ns}Part.Document`.
    pub fn resource_type(&self, item_type: &ItemTypeName) -> String {
        format!("{}{}", self.vocab_ns, item_type.url_name())
    }

    pub fn query_base(&self, item_type: &ItemTypeName) -> String {
        format!("{}/{}", self.root, item_type.url_name())
    }

    pub fn shape(&self, item_type: &ItemTypeName) -> String {
        format!("{}/resourceShape", self.query_base(item_type))
    }

    /// Predicate / property-shape IRI: `{shape}#{name}`.
    pub fn property(&self, item_type: &ItemTypeName, name: &str) -> String {
        format!("{}#{}", self.shape(item_type), url_safe(name))
    }

    pub fn item(&self, item_type: &ItemTypeName, config_id: &str) -> String {
        format!("{}/{}", self.query_base(item_type), config_id)
    }

    pub fn components(&self, item_type: &ItemTypeName) -> String {
        format!("{}/config/{}/components", self.root, item_type.url_name())
    }

    pub fn component(&self, item_type: &ItemTypeName, config_id: &str) -> String {
        format!(
            "{}/config/{}/component/{}",
            self.root,
            item_type.url_name(),
            config_id
        )
    }

    pub fn configurations(&self, item_type: &ItemTypeName, config_id: &str) -> String {
        format!("{}/configurations", self.component(item_type, config_id))
    }

    pub fn stream(&self, item_type: &ItemTypeName, config_id: &str, stream_id: &str) -> String {
        format!("{}/stream/{}", self.component(item_type, config_id), stream_id)
    }

    /// Item URL with an embedded configuration context that pins the
    /// `(component, stream)` the link was resolved against.
    pub fn linked_item(&self, item_type: &ItemTypeName, config_id: &str, stream_id: &str) -> String {
        let context = self.stream(item_type, config_id, stream_id);
        format!(
            "{}?{}={}",
            self.item(item_type, config_id),
            CONFIG_CONTEXT_PARAM,
            urlencoding::encode(&context)
        )
    }
}

/// The item id a configuration context points at: the last path segment
/// of the context URL. Query string and fragment are ignored.
///
/// Returns `None` for a blank context or one ending in `/`.
pub fn config_context_item_id(context: &str) -> Option<&str> {
    let end = context.find(&['?', '#'][..]).unwrap_or(context.len());
    let path = context[..end].trim();
    let last = path.rsplit('/').next()?;
    if last.is_empty() {
        None
    } else {
        Some(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> ServiceUrls {
        ServiceUrls::new("http://localhost:5000/api/oslc/", "http://localhost:5000/ns/plm#")
    }

    #[test]
    fn item_urls_use_dot_form() {
        let t = ItemTypeName::from_source("Part Document");
        let u = urls();
        assert_eq!(u.service_provider(), "http://localhost:5000/api/oslc");
        assert_eq!(u.query_base(&t), "http://localhost:5000/api/oslc/Part.Document");
        assert_eq!(
            u.shape(&t),
            "http://localhost:5000/api/oslc/Part.Document/resourceShape"
        );
        assert_eq!(
            u.property(&t, "created on"),
            "http://localhost:5000/api/oslc/Part.Document/resourceShape#created.on"
        );
        assert_eq!(u.resource_type(&t), "http://localhost:5000/ns/plm#Part.Document");
    }

    #[test]
    fn configuration_urls() {
        let t = ItemTypeName::from_source("Part");
        let u = urls();
        assert_eq!(
            u.component(&t, "C1"),
            "http://localhost:5000/api/oslc/config/Part/component/C1"
        );
        assert_eq!(
            u.configurations(&t, "C1"),
            "http://localhost:5000/api/oslc/config/Part/component/C1/configurations"
        );
        assert_eq!(
            u.stream(&t, "C1", "S1"),
            "http://localhost:5000/api/oslc/config/Part/component/C1/stream/S1"
        );
    }

    #[test]
    fn linked_item_carries_encoded_stream_context() {
        let t = ItemTypeName::from_source("Material");
        let url = urls().linked_item(&t, "M7", "V3");
        assert_eq!(
            url,
            "http://localhost:5000/api/oslc/Material/M7?oslc_config.context=\
             http%3A%2F%2Flocalhost%3A5000%2Fapi%2Foslc%2Fconfig%2FMaterial%2Fcomponent%2FM7%2Fstream%2FV3"
        );
    }

    #[test]
    fn context_item_id_is_last_segment() {
        assert_eq!(
            config_context_item_id("http://h/api/oslc/config/Part/component/C1/stream/V9"),
            Some("V9")
        );
        assert_eq!(config_context_item_id("http://h/x/V9?foo=bar#frag"), Some("V9"));
        assert_eq!(config_context_item_id("V9"), Some("V9"));
        assert_eq!(config_context_item_id("http://h/x/"), None);
        assert_eq!(config_context_item_id("   "), None);
    }
}
