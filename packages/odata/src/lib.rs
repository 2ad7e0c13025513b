//! Wire types and query builder for the PLM source's OData endpoint.
//!
//! The adapter talks to the source exclusively through the queries in
//! [`queries`] and reads the answers through the rows in [`rows`]. Nothing
//! here performs I/O.
//!
//! # Queries issued
//!
//! | Function | Query |
//! |----------|-------|
//! | [`queries::item_types`] | `ItemType?$select=name,is_versionable` |
//! | [`queries::item_type`] | `ItemType?$select=..&$filter=name eq '<T>'` |
//! | [`queries::properties`] | `Property?$filter=source_id/name eq '<T>'` |
//! | [`queries::relationships`] | `RelationshipType?$filter=source_id/name eq '<T>'` |
//! | [`queries::instances`] | `<T>?$select=keyed_name,id&$expand=config_id[&$top&$skip]` |
//! | [`queries::expanded_item`] | `<T>('<id>')?$expand=p($expand=config_id),..` or `<T>?..&$filter=config_id eq '<cfg>'` |
//! | [`queries::related`] | `<R>?$expand=config_id&$filter=source_id/id eq '<id>'` |
//! | [`queries::generations`] | `<T>?..&$filter=config_id eq '<cfg>' and generation gt '0'` |
//! | [`queries::item_by_id`] | `<T>('<id>')?$select=id,keyed_name&$expand=config_id` |
//! | [`queries::items_by_config_id`] | `<T>?$select=id,keyed_name&$expand=config_id&$filter=config_id eq '<cfg>'` |

pub mod error;
pub mod queries;
pub mod query;
pub mod rows;

pub use error::{decode, QueryError};
pub use queries::ItemSelector;
pub use query::{Expand, Filter, ODataQuery};
pub use rows::{ConfigRef, ItemRow, ItemTypeRow, ODataCollection, PropertyRow, RelationshipRow};
