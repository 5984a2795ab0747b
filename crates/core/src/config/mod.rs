//! Configuration loading and schema definitions
//!
//! TOML configuration for map views, coverage rings, nearest-station scope,
//! the station table source and logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
