// Loads the roster CSV (one row per player with at-bat and hit-type counts) into
// shared Player records that lineups and the simulator borrow from.

use crate::error::{LineupError, Result};
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Atomically reference-counted Player so lineups can share roster entries without cloning.
/// Arc rather than Rc because parallel evaluation hands lineups to rayon workers.
pub type RcPlayer = Arc<Player>;

const REQUIRED_COLUMNS: [&str; 6] = ["Player", "AB", "1B", "2B", "3B", "HR"];

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub name: String,
    pub at_bats: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub homers: u32,
    /// Position in the roster, used as the player's identity in lineup keys
    pub roster_index: usize,
}

impl Player {
    /// Build a player, checking that the hit counts fit inside the at-bat count.
    pub fn new(
        name: &str,
        at_bats: u32,
        singles: u32,
        doubles: u32,
        triples: u32,
        homers: u32,
    ) -> Result<Player> {
        if at_bats == 0 {
            return Err(LineupError::InvalidPlayer {
                name: name.to_string(),
                reason: "at-bat count is zero".to_string(),
            });
        }
        let hits = singles as u64 + doubles as u64 + triples as u64 + homers as u64;
        if hits > at_bats as u64 {
            return Err(LineupError::InvalidPlayer {
                name: name.to_string(),
                reason: format!("{} hits exceed {} at-bats", hits, at_bats),
            });
        }
        Ok(Player {
            name: name.to_string(),
            at_bats,
            singles,
            doubles,
            triples,
            homers,
            roster_index: 0, // set when added to a roster
        })
    }

    pub fn hits(&self) -> u32 {
        self.singles + self.doubles + self.triples + self.homers
    }

    pub fn outs(&self) -> u32 {
        self.at_bats - self.hits()
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Player {}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} (.{:03})",
            self.name,
            self.hits(),
            self.at_bats,
            1000 * self.hits() as u64 / self.at_bats as u64
        )
    }
}

#[derive(Debug, Clone)]
pub struct Roster {
    pub players: Vec<RcPlayer>,
    /// Fast lookup map: name -> RcPlayer
    pub player_lookup: HashMap<String, RcPlayer>,
}

impl Roster {
    /// Assemble a roster, assigning roster indices and rejecting duplicate names.
    pub fn new(players: Vec<Player>) -> Result<Roster> {
        if players.is_empty() {
            return Err(LineupError::EmptyRoster);
        }
        let mut shared: Vec<RcPlayer> = Vec::with_capacity(players.len());
        let mut player_lookup: HashMap<String, RcPlayer> = HashMap::with_capacity(players.len());

        for (idx, mut player) in players.into_iter().enumerate() {
            if player_lookup.contains_key(&player.name) {
                return Err(LineupError::DuplicatePlayer(player.name));
            }
            player.roster_index = idx;
            let player = Arc::new(player);
            player_lookup.insert(player.name.clone(), Arc::clone(&player));
            shared.push(player);
        }

        Ok(Roster {
            players: shared,
            player_lookup,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Roster> {
        let rdr = csv::Reader::from_path(path)?;
        Self::from_csv(rdr)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Roster> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Roster> {
        let headers = rdr.headers()?.clone();
        let mut columns = [0usize; 6];
        for (slot, column) in columns.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| LineupError::MissingColumn(column.to_string()))?;
        }

        let mut players: Vec<Player> = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let name = record.get(columns[0]).unwrap_or("").trim();
            if name.is_empty() {
                continue; // spacer rows
            }
            players.push(Player::new(
                name,
                parse_count(&record, columns[1], name, "AB")?,
                parse_count(&record, columns[2], name, "1B")?,
                parse_count(&record, columns[3], name, "2B")?,
                parse_count(&record, columns[4], name, "3B")?,
                parse_count(&record, columns[5], name, "HR")?,
            )?);
        }

        Self::new(players)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Get a player by name, returning a cheap Arc clone
    pub fn get(&self, name: &str) -> Option<RcPlayer> {
        self.player_lookup.get(name).map(Arc::clone)
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }
}

fn parse_count(record: &StringRecord, column: usize, name: &str, label: &str) -> Result<u32> {
    let raw = record.get(column).unwrap_or("").trim();
    raw.parse::<u32>().map_err(|_| LineupError::InvalidPlayer {
        name: name.to_string(),
        reason: format!("{} value '{}' is not a non-negative integer", label, raw),
    })
}
