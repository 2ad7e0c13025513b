//! Namespace IRIs used by the adapter's resources.
//!
//! Constants are grouped by vocabulary. Only the terms this crate emits are
//! listed; `rdf` and `xsd` terms come from [`oxrdf::vocab`].

/// Prefix bindings applied to every response graph.
pub const PREFIXES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("dcterms", dcterms::NS),
    ("oslc", oslc::NS),
    ("oslc_config", oslc_config::NS),
    ("ldp", ldp::NS),
];

/// RDF Schema, for container membership.
pub mod rdfs {
    pub const MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";
}

/// OSLC Core (`http://open-services.net/ns/core#`).
pub mod oslc {
    pub const NS: &str = "http://open-services.net/ns/core#";

    pub const SERVICE_PROVIDER: &str = "http://open-services.net/ns/core#ServiceProvider";
    pub const SERVICE: &str = "http://open-services.net/ns/core#Service";
    pub const QUERY_CAPABILITY: &str = "http://open-services.net/ns/core#QueryCapability";
    pub const RESOURCE_SHAPE: &str = "http://open-services.net/ns/core#ResourceShape";
    pub const PROPERTY: &str = "http://open-services.net/ns/core#Property";
    pub const RESPONSE_INFO: &str = "http://open-services.net/ns/core#ResponseInfo";
    pub const RESOURCE: &str = "http://open-services.net/ns/core#Resource";

    pub const SERVICE_PROP: &str = "http://open-services.net/ns/core#service";
    pub const DOMAIN: &str = "http://open-services.net/ns/core#domain";
    pub const QUERY_CAPABILITY_PROP: &str = "http://open-services.net/ns/core#queryCapability";
    pub const QUERY_BASE: &str = "http://open-services.net/ns/core#queryBase";
    pub const RESOURCE_TYPE: &str = "http://open-services.net/ns/core#resourceType";
    pub const RESOURCE_SHAPE_PROP: &str = "http://open-services.net/ns/core#resourceShape";
    pub const INSTANCE_SHAPE: &str = "http://open-services.net/ns/core#instanceShape";
    pub const DESCRIBES: &str = "http://open-services.net/ns/core#describes";
    pub const PROPERTY_PROP: &str = "http://open-services.net/ns/core#property";
    pub const NAME: &str = "http://open-services.net/ns/core#name";
    pub const OCCURS: &str = "http://open-services.net/ns/core#occurs";
    pub const VALUE_TYPE: &str = "http://open-services.net/ns/core#valueType";
    pub const PROPERTY_DEFINITION: &str = "http://open-services.net/ns/core#propertyDefinition";
    pub const RANGE: &str = "http://open-services.net/ns/core#range";
    pub const RESPONSE_INFO_PROP: &str = "http://open-services.net/ns/core#responseInfo";
    pub const NEXT_PAGE: &str = "http://open-services.net/ns/core#nextPage";

    pub const EXACTLY_ONE: &str = "http://open-services.net/ns/core#Exactly-one";
    pub const ZERO_OR_ONE: &str = "http://open-services.net/ns/core#Zero-or-one";
    pub const ZERO_OR_MANY: &str = "http://open-services.net/ns/core#Zero-or-many";
}

/// OSLC Configuration Management (`http://open-services.net/ns/config#`).
pub mod oslc_config {
    pub const NS: &str = "http://open-services.net/ns/config#";

    pub const COMPONENT: &str = "http://open-services.net/ns/config#Component";
    pub const STREAM: &str = "http://open-services.net/ns/config#Stream";
    pub const VERSION_RESOURCE: &str = "http://open-services.net/ns/config#VersionResource";

    pub const COMPONENT_PROP: &str = "http://open-services.net/ns/config#component";
    pub const CONFIGURATIONS: &str = "http://open-services.net/ns/config#configurations";
    pub const VERSION_ID: &str = "http://open-services.net/ns/config#versionId";
}

/// Dublin Core terms (`http://purl.org/dc/terms/`).
pub mod dcterms {
    pub const NS: &str = "http://purl.org/dc/terms/";

    pub const TITLE: &str = "http://purl.org/dc/terms/title";
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
    pub const IS_VERSION_OF: &str = "http://purl.org/dc/terms/isVersionOf";
}

/// Linked Data Platform (`http://www.w3.org/ns/ldp#`).
pub mod ldp {
    pub const NS: &str = "http://www.w3.org/ns/ldp#";

    pub const BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";
    pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
}
