//! OSLC translation core for PLM item sources.
//!
//! This crate turns the schema and payloads of a dynamic, OData-style item
//! source into OSLC Core and OSLC Configuration Management resources. It is
//! pure logic: every function takes already-fetched source data and returns
//! graphs or URLs. Talking to the source is the job of the
//! `plm-oslc-adapter` crate, which drives these functions per request.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`naming`] | Item-type name normalisation ([`ItemTypeName`]) |
//! | [`vocab`] | Namespace IRIs for OSLC, OSLC Config, Dublin Core, LDP |
//! | [`types`] | Schema descriptors: [`PropertyDescriptor`], [`DataType`], [`ItemSchema`] |
//! | [`urls`] | The produced URL scheme ([`ServiceUrls`]) |
//! | [`graph`] | Ordered, duplicate-free triple container ([`ResourceGraph`]) |
//! | [`shape`] | Resource Shape synthesis ([`synthesize`], [`ResourceShape`]) |
//! | [`materialize`] | Projection of one item payload into a resource node |
//! | [`config`] | OSLC Config components and streams |
//! | [`paging`] | OSLC paging parameters and `oslc:ResponseInfo` |
//! | [`render`] | RDF/XML, Turtle and JSON-LD output ([`render()`]) |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use plm_oslc::{synthesize, ItemSchema, ItemTypeName, ServiceUrls, render, RdfFormat};
//!
//! let urls = ServiceUrls::new("http://localhost:5000/api/oslc", "http://localhost:5000/ns/plm#");
//! let schema: ItemSchema = /* discovered from the source */;
//! let shape = synthesize(&schema);
//! let graph = shape.to_graph(&urls)?;
//! let turtle = render(&graph, RdfFormat::Turtle)?;
//! ```

pub mod config;
pub mod graph;
pub mod materialize;
pub mod naming;
pub mod paging;
pub mod render;
pub mod shape;
pub mod types;
pub mod urls;
pub mod vocab;

pub use config::{components_graph, configurations_graph, ConfigurationComponent, ConfigurationStream};
pub use graph::{iri, GraphError, ResourceGraph};
pub use materialize::{project_item, ItemFacts, PayloadValue, RelatedItem};
pub use naming::ItemTypeName;
pub use paging::{Page, PagingParams, DEFAULT_PAGE_SIZE};
pub use render::{render, RdfFormat, RenderError};
pub use shape::{is_reserved, synthesize, PropertyKind, PropertyShape, ResourceShape, RESERVED_PROPERTY_NAMES};
pub use types::{DataType, ItemSchema, Occurrence, PropertyDescriptor, RelationshipDescriptor, ValueType};
pub use urls::{config_context_item_id, ServiceUrls, CONFIG_CONTEXT_PARAM};
