// The batting order genome: an ordered, duplicate-free selection of roster players.

use crate::error::{LineupError, Result};
use crate::ingest::{RcPlayer, Roster};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Canonical identity of a lineup: roster indices in batting order.
/// Order matters because the same players batting in a different order score differently.
pub type LineupKey = Box<[usize]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Lineup {
    players: Vec<RcPlayer>,
}

impl Lineup {
    /// Build a lineup from an explicit batting order, rejecting repeated players.
    pub fn new(players: Vec<RcPlayer>) -> Result<Lineup> {
        let mut seen = HashSet::with_capacity(players.len());
        for player in &players {
            if !seen.insert(player.name.as_str()) {
                return Err(LineupError::InvalidLineup(format!(
                    "{} appears more than once",
                    player.name
                )));
            }
        }
        Ok(Lineup { players })
    }

    /// Look up each name in the roster and build a lineup in that order
    pub fn from_names(roster: &Roster, names: &[&str]) -> Result<Lineup> {
        let players = names
            .iter()
            .map(|name| {
                roster.get(name).ok_or_else(|| {
                    LineupError::InvalidLineup(format!("{} is not on the roster", name))
                })
            })
            .collect::<Result<Vec<RcPlayer>>>()?;
        Self::new(players)
    }

    /// Operators in this crate only ever produce duplicate-free orders.
    pub(crate) fn from_vec(players: Vec<RcPlayer>) -> Lineup {
        debug_assert!(Self::new(players.clone()).is_ok());
        Lineup { players }
    }

    /// Uniform sample of `size` distinct roster players, in random batting order.
    /// Requires `size <= roster.len()`.
    pub fn random<R: Rng + ?Sized>(roster: &Roster, size: usize, rng: &mut R) -> Lineup {
        let players = index::sample(rng, roster.len(), size)
            .into_iter()
            .map(|idx| Arc::clone(&roster.players[idx]))
            .collect();
        Lineup { players }
    }

    pub fn key(&self) -> LineupKey {
        self.players.iter().map(|p| p.roster_index).collect()
    }

    /// Length matches, every player is the roster's own entry, and nobody bats twice.
    pub fn is_valid_for(&self, roster: &Roster, lineup_size: usize) -> bool {
        if self.players.len() != lineup_size {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.players.len());
        self.players.iter().all(|player| {
            let on_roster = roster
                .players
                .get(player.roster_index)
                .map_or(false, |p| p.name == player.name);
            on_roster && seen.insert(player.roster_index)
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[RcPlayer] {
        &self.players
    }

    pub fn batter(&self, position: usize) -> &RcPlayer {
        &self.players[position]
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.players.swap(a, b);
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(", "))
    }
}
