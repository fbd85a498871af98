//! Configuration management module
//!
//! Turns the static configuration schema into a validated, persisted
//! configuration value: the schema graph, the interactive prompt
//! resolvers, the recursive materializer, the JSON persistence codec and
//! the manager orchestrating fresh and reuse runs.

pub mod codec;
pub mod manager;
pub mod materialize;
pub mod model;
pub mod prompt;
pub mod schema;

pub use manager::*;
pub use materialize::*;
pub use model::*;
