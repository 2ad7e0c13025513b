//! Public surface for the `plm-oslc-adapter` crate.
//!
//! Exposes the router builder, config and source types so that external
//! crates (e.g. the conformance test suite) can spin up an in-process
//! adapter without spawning a subprocess.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod source;

pub use config::AdapterConfig;
pub use engine::{EngineError, Session};
pub use router::build_router;
pub use source::{http::HttpSource, memory::MemorySource, Credential, Source, SourceError};
