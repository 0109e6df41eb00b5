//! Pokedex - Interactive PokeAPI Explorer
//!
//! A read-eval-print loop over the paginated PokeAPI with caught-Pokemon
//! bookkeeping. HTTP responses are memoized in a time-bounded in-memory
//! cache that expires entries lazily on lookup and proactively from a
//! background sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod pokedex;
pub mod repl;

pub use api::{ApiError, PokeApiClient};
pub use cache::{CacheError, TtlCache};
pub use config::{Config, ConfigError};
pub use pokedex::Pokedex;
pub use repl::{Command, Flow, Session};
