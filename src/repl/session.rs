//! REPL Session
//!
//! Holds the explorer's state between commands and executes them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

use super::command::{Command, HELP_TEXT};
use crate::api::{ApiError, PokeApiClient, Pokemon};
use crate::pokedex::Pokedex;

/// Errors surfaced to the user after a command fails
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Roll for a catch: uniform in `[0, base_experience + threshold)`, caught below `threshold`
pub fn roll_catch<R: Rng + ?Sized>(rng: &mut R, base_experience: u32, threshold: u32) -> bool {
    let upper = base_experience.saturating_add(threshold);
    upper > 0 && rng.gen_range(0..upper) < threshold
}

/// Interactive explorer state
pub struct Session {
    client: PokeApiClient,
    pokedex: Pokedex,
    next_url: Option<String>,
    prev_url: Option<String>,
    current_location: Option<String>,
    catch_threshold: u32,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient, catch_threshold: u32) -> Self {
        Self::with_rng(client, catch_threshold, StdRng::from_entropy())
    }

    pub fn with_rng(client: PokeApiClient, catch_threshold: u32, rng: StdRng) -> Self {
        Self {
            client,
            pokedex: Pokedex::new(),
            next_url: None,
            prev_url: None,
            current_location: None,
            catch_threshold,
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn current_location(&self) -> Option<&str> {
        self.current_location.as_deref()
    }

    /// End the session, stopping the client's cache sweeper
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    /// Execute one command, writing user-facing output to `out`
    pub async fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Flow, SessionError> {
        match cmd {
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => {
                let url = self.next_url.clone();
                self.show_page(url.as_deref(), out).await?;
            }
            Command::MapBack => match self.prev_url.clone() {
                Some(url) => self.show_page(Some(&url), out).await?,
                None => writeln!(out, "you're on the first page")?,
            },
            Command::Explore { area } => self.explore(&area, out).await?,
            Command::Catch { pokemon } => self.catch(&pokemon, out).await?,
            Command::Inspect { pokemon } => self.inspect(&pokemon, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::CacheStats => {
                let cache = self.client.cache();
                writeln!(
                    out,
                    "Cached responses: {} (ttl {:?})\n{}",
                    cache.len(),
                    cache.ttl(),
                    cache.stats()
                )?;
            }
        }

        Ok(Flow::Continue)
    }

    async fn show_page<W: Write>(&mut self, url: Option<&str>, out: &mut W) -> Result<(), SessionError> {
        let page = self.client.location_areas(url).await?;
        self.next_url = page.next;
        self.prev_url = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<(), SessionError> {
        let location = self.client.location_area(area).await?;
        self.current_location = Some(area.to_lowercase());

        for name in location.pokemon_names() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), SessionError> {
        let name = name.to_lowercase();
        let Some(location) = self.current_location.clone() else {
            writeln!(out, "You haven't explored any location yet. Use: explore <location-area>")?;
            return Ok(());
        };

        let area = self.client.location_area(&location).await?;
        if !area.has_pokemon(&name) {
            writeln!(out, "there isn't any {} here explore more", name)?;
            return Ok(());
        }

        let pokemon = self.client.pokemon(&name).await?;
        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        let base_experience = pokemon.base_experience.unwrap_or(0);
        let caught = roll_catch(&mut self.rng, base_experience, self.catch_threshold);
        debug!(pokemon = %pokemon.name, base_experience, caught, "Catch roll");

        if caught {
            writeln!(out, "{} was caught!", pokemon.name)?;
            self.pokedex.insert(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> io::Result<()> {
        match self.pokedex.get(name) {
            Some(pokemon) => write_details(pokemon, out),
            None => writeln!(out, "you have not caught that pokemon"),
        }
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.pokedex.is_empty() {
            return writeln!(out, "you haven't caught any pokemon yet");
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

fn write_details<W: Write>(pokemon: &Pokemon, out: &mut W) -> io::Result<()> {
    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stats:")?;
    for s in &pokemon.stats {
        writeln!(out, "  -{}: {}", s.stat.name, s.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for t in &pokemon.types {
        writeln!(out, "  - {}", t.kind.name)?;
    }
    Ok(())
}
