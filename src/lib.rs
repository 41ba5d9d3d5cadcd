//! A small CRUD service for a movie catalog: directors, their movies, and
//! reviews of those movies, with `movies_count` and `avg_rating` derived at
//! read time.

pub mod configuration;
pub mod error;
pub mod models;
pub mod routes;
pub mod serializers;
pub mod startup;
pub mod telemetry;
pub mod util;
