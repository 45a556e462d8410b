//! # `cachelab-core`
//!
//! Cache replacement policies and dataset/request plumbing for the
//! `cachelab` testbed.
//!
//! `cachelab` measures how well different cache replacement policies do at
//! keeping recomputation cost down against a recorded access trace. This
//! crate owns the parts shared by the server and client binaries: the
//! dataset loader, the policy implementations, and the error type that
//! unifies both.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use cachelab_core::{Cache, CachePolicy, CacheType, Dataset, Entry};
//!
//! let dataset = Dataset::load("data.csv")?;
//! let mut cache = Cache::new(CacheType::Lru, 128);
//!
//! if cache.present("some-key") {
//!     let entry = cache.get("some-key")?;
//! } else if let Some(entry) = dataset.get("some-key") {
//!     cache.put("some-key", entry.clone());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache_type;
pub mod dataset;
pub mod entry;
pub mod error;
pub mod policy;
pub mod sync;

pub use cache_type::CacheType;
pub use dataset::Dataset;
pub use entry::Entry;
pub use error::{Error, Result};
pub use policy::{Cache, CachePolicy};
