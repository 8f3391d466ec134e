//! Blueprint graph sources
//!
//! Loading the graph is the only asynchronous step: one request per load,
//! never retried. A failed load yields no graph at all.
//!
//! ## Example
//!
//! ```rust,ignore
//! use prefill_core::EndpointConfig;
//! use prefill_source::{load_graph, HttpGraphSource};
//!
//! let source = HttpGraphSource::new(&EndpointConfig::default())?;
//! let loaded = load_graph(&source).await?;
//! println!("{} forms", loaded.graph.len());
//! ```

pub mod source;
pub mod http;
pub mod file;
pub mod mock;

pub use source::{load_graph, FetchError, GraphSource, LoadedGraph};
pub use http::HttpGraphSource;
pub use file::FileGraphSource;
pub use mock::MockGraphSource;
