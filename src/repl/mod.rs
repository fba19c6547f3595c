//! REPL Module
//!
//! Reads commands line by line, runs them against the PokeAPI client and the
//! pokedex, and writes the results to an output sink.

mod commands;

use std::future::Future;
use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::client::PokeApiClient;
use crate::error::Result;
use crate::pokedex::{attempt_catch, Pokedex};

pub use commands::{clean_input, Command, COMMANDS};

/// Printed before every line of input
pub const PROMPT: &str = "Pokedex > ";

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Location area page cursors, updated after every `map`/`mapb`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Interactive session state.
pub struct Repl<W, R> {
    client: PokeApiClient,
    pokedex: Pokedex,
    pagination: Pagination,
    catch_difficulty: u32,
    rng: R,
    out: W,
}

impl<W: Write, R: Rng> Repl<W, R> {
    /// Creates a session that starts at the first location area page.
    pub fn new(client: PokeApiClient, catch_difficulty: u32, rng: R, out: W) -> Self {
        let pagination = Pagination {
            next: Some(client.location_areas_url()),
            previous: None,
        };
        Self {
            client,
            pokedex: Pokedex::new(),
            pagination,
            catch_difficulty,
            rng,
            out,
        }
    }

    // == Run ==
    /// Prompts and executes lines from `input` until `exit` or end of input.
    ///
    /// Command errors are printed and the loop continues; only failures to
    /// read input or write output end it with an error.
    pub async fn run<I: AsyncBufRead + Unpin>(&mut self, input: I) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                return Ok(());
            };

            match self.execute(&line).await {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(err) => {
                    debug!(error = %err, "Command failed");
                    writeln!(self.out, "{}", err)?;
                }
            }
        }
    }

    /// Like [`Repl::run`], but stops early once `interrupt` resolves.
    ///
    /// A read still pending at that point is dropped and the session ends
    /// with `Ok(())`.
    pub async fn run_until<I, F>(&mut self, input: I, interrupt: F) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        F: Future,
    {
        tokio::select! {
            result = self.run(input) => result,
            _ = interrupt => {
                debug!("Session interrupted");
                Ok(())
            }
        }
    }

    // == Execute ==
    /// Parses and runs a single input line.
    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        let words = clean_input(line);
        let Some(command) = Command::parse(&words)? else {
            return Ok(Flow::Continue);
        };

        match command {
            Command::Help => self.help()?,
            Command::Exit => {
                writeln!(self.out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_forward().await?,
            Command::MapBack => self.map_back().await?,
            Command::Explore(area) => self.explore(&area).await?,
            Command::Catch(name) => self.catch(&name).await?,
            Command::Inspect(name) => self.inspect(&name)?,
            Command::Pokedex => self.list_pokedex()?,
            Command::Cache => {
                let stats = self.client.cache().stats();
                writeln!(self.out, "{}", serde_json::to_string_pretty(&stats.report())?)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to the Pokedex!")?;
        writeln!(self.out, "Usage:")?;
        writeln!(self.out)?;
        for (name, description) in COMMANDS {
            writeln!(self.out, "{}: {}", name, description)?;
        }
        Ok(())
    }

    async fn map_forward(&mut self) -> Result<()> {
        match self.pagination.next.clone() {
            Some(url) => self.show_location_page(&url).await,
            None => {
                writeln!(
                    self.out,
                    "You're at the last page. Type \"mapb\" to go on the previous page"
                )?;
                Ok(())
            }
        }
    }

    async fn map_back(&mut self) -> Result<()> {
        match self.pagination.previous.clone() {
            Some(url) => self.show_location_page(&url).await,
            None => {
                writeln!(
                    self.out,
                    "You're at the first page. Type \"map\" to go on the next page"
                )?;
                Ok(())
            }
        }
    }

    async fn show_location_page(&mut self, url: &str) -> Result<()> {
        let page = self.client.location_area_page(url).await?;
        for area in &page.results {
            writeln!(self.out, "{}", area.name)?;
        }
        self.pagination = Pagination {
            next: page.next,
            previous: page.previous,
        };
        Ok(())
    }

    async fn explore(&mut self, area: &str) -> Result<()> {
        let area = self.client.location_area(area).await?;
        writeln!(self.out, "Exploring \"{}\" location area...", area.name)?;
        writeln!(self.out, "Found Pokemon:")?;
        for name in area.pokemon_names() {
            writeln!(self.out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch(&mut self, name: &str) -> Result<()> {
        let pokemon = self.client.pokemon(name).await?;
        writeln!(self.out, "Throwing a Pokeball at {}...", pokemon.name)?;

        if !attempt_catch(&mut self.rng, self.catch_difficulty, pokemon.base_experience) {
            writeln!(self.out, "{} escaped!", pokemon.name)?;
            return Ok(());
        }

        writeln!(self.out, "{} was caught!", pokemon.name)?;
        writeln!(self.out, "You may now inspect it with the inspect command.")?;
        self.pokedex.insert(pokemon);
        Ok(())
    }

    fn inspect(&mut self, name: &str) -> Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(self.out, "You haven't caught {} yet", name)?;
            return Ok(());
        };

        let pokemon = &caught.pokemon;
        writeln!(self.out, "Name: {}", pokemon.name)?;
        writeln!(self.out, "Height: {}", pokemon.height)?;
        writeln!(self.out, "Weight: {}", pokemon.weight)?;
        writeln!(self.out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(self.out, "  - {}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(self.out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(self.out, "  - {}", kind.kind.name)?;
        }
        writeln!(
            self.out,
            "Caught: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex(&mut self) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(self.out, "You haven't caught any pokemon yet")?;
            return Ok(());
        }

        writeln!(self.out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(self.out, "  - {}", name)?;
        }
        Ok(())
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Consumes the session and returns the output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}
