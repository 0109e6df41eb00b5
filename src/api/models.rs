//! PokeAPI response models
//!
//! Only the fields the explorer reads are modelled; everything else in the
//! responses is ignored during decoding.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of the location-area listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// A single location area and the Pokemon that can be met there
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Whether `pokemon` can be encountered here (case-insensitive)
    pub fn has_pokemon(&self, pokemon: &str) -> bool {
        self.pokemon_encounters
            .iter()
            .any(|e| e.pokemon.name.eq_ignore_ascii_case(pokemon))
    }

    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters.iter().map(|e| e.pokemon.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// Pokemon details as returned by `/pokemon/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Null for some special forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}
