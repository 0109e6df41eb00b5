//! PokeAPI access
//!
//! A caching HTTP client and the response types it decodes into.

mod client;
mod models;

pub use client::{ApiError, PokeApiClient};
pub use models::{
    LocationArea, LocationAreaPage, NamedResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
