//! Pokedex - An interactive PokeAPI client
//!
//! Browses location areas and catches pokemon from a REPL, with raw API
//! responses kept in a TTL cache swept by a background reaper.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use cache::TtlCache;
pub use client::PokeApiClient;
pub use config::Config;
pub use error::{CacheError, PokedexError, Result};
pub use repl::Repl;
