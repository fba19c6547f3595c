//! Pokedex Module
//!
//! In-memory collection of caught pokemon and the catch roll.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Pokemon;

/// A pokemon in the collection together with when it was caught.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Caught pokemon keyed by name. Catching the same name again replaces it.
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: HashMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `pokemon` to the collection, stamped with the current time.
    pub fn insert(&mut self, pokemon: Pokemon) {
        let caught = CaughtPokemon {
            pokemon,
            caught_at: Utc::now(),
        };
        self.entries.insert(caught.pokemon.name.clone(), caught);
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    /// Names of every caught pokemon, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Catch Roll ==
/// Rolls a uniform value in `0..difficulty`; the pokemon escapes when the
/// roll falls below its base experience.
///
/// A missing base experience counts as zero, so such pokemon are always caught.
pub fn attempt_catch<R: Rng>(rng: &mut R, difficulty: u32, base_experience: Option<u32>) -> bool {
    let roll = rng.gen_range(0..difficulty.max(1));
    roll >= base_experience.unwrap_or(0)
}
