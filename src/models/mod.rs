//! Persisted entities and the queries that read and write them.
//!
//! Computed fields are never stored: `movies_count` is projected by the
//! director queries and `avg_rating` is derived from review rows when a
//! movie is serialized.

pub mod director;
pub mod movie;
pub mod review;

pub use director::*;
pub use movie::*;
pub use review::*;
