//! Caught Pokemon registry

use std::collections::BTreeMap;

use crate::api::Pokemon;

/// Pokemon the player has caught, keyed by lowercase name
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, Pokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a catch; catching the same Pokemon again replaces the record
    pub fn insert(&mut self, pokemon: Pokemon) {
        self.caught.insert(pokemon.name.to_lowercase(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.caught.get(&name.to_lowercase())
    }

    /// Caught names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon(name: &str) -> Pokemon {
        Pokemon {
            name: name.to_string(),
            height: 1,
            weight: 1,
            base_experience: Some(64),
            stats: Vec::new(),
            types: Vec::new(),
        }
    }

    #[test]
    fn test_names_sorted() {
        let mut dex = Pokedex::new();
        dex.insert(pokemon("squirtle"));
        dex.insert(pokemon("Bulbasaur"));
        dex.insert(pokemon("charmander"));

        assert_eq!(dex.names().collect::<Vec<_>>(), ["bulbasaur", "charmander", "squirtle"]);
    }

    #[test]
    fn test_get_ignores_case() {
        let mut dex = Pokedex::new();
        dex.insert(pokemon("pikachu"));

        assert!(dex.get("PIKACHU").is_some());
        assert!(dex.get("raichu").is_none());
    }

    #[test]
    fn test_recatch_replaces() {
        let mut dex = Pokedex::new();
        dex.insert(pokemon("pikachu"));
        dex.insert(pokemon("pikachu"));
        assert_eq!(dex.len(), 1);
        assert!(!dex.is_empty());
    }
}
