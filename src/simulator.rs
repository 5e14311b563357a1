// Run-production model: each at-bat draws one outcome from the batter's empirical
// counts, and a small base/out state machine turns those outcomes into runs.
// Walks, steals, double plays and fielding are not modelled.

use crate::game_result::GameResult;
use crate::ingest::Player;
use crate::lineup::Lineup;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Out,
    Single,
    Double,
    Triple,
    HomeRun,
}

/// Where at-bat outcomes come from. The generator is passed in rather than owned
/// so that one seeded stream drives sampling, selection and mutation alike.
pub trait OutcomeSource {
    fn draw<R: Rng + ?Sized>(&mut self, batter: &Player, rng: &mut R) -> Outcome;
}

/// Draws outcomes in proportion to the batter's recorded counts
#[derive(Debug, Clone, Copy, Default)]
pub struct EmpiricalSampler;

impl OutcomeSource for EmpiricalSampler {
    #[inline]
    fn draw<R: Rng + ?Sized>(&mut self, batter: &Player, rng: &mut R) -> Outcome {
        sample_outcome(batter, rng)
    }
}

/// Pick one of the player's `at_bats` outcome tokens uniformly.
///
/// Equivalent to drawing from a list holding `outs` OUT tokens, `singles` SINGLE
/// tokens and so on, without building the list. Panics when `at_bats == 0`;
/// the roster loader never lets such a player through.
pub fn sample_outcome<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> Outcome {
    let mut token = rng.gen_range(0..player.at_bats);
    let buckets = [
        (Outcome::Out, player.outs()),
        (Outcome::Single, player.singles),
        (Outcome::Double, player.doubles),
        (Outcome::Triple, player.triples),
        (Outcome::HomeRun, player.homers),
    ];
    for (outcome, count) in buckets {
        if token < count {
            return outcome;
        }
        token -= count;
    }
    Outcome::HomeRun
}

/// Replays a fixed outcome sequence, wrapping around at the end. Ignores the generator.
#[derive(Debug, Clone)]
pub struct ScriptedOutcomes {
    script: Vec<Outcome>,
    cursor: usize,
}

impl ScriptedOutcomes {
    pub fn new(script: Vec<Outcome>) -> Self {
        assert!(!script.is_empty(), "scripted outcome sequence must not be empty");
        ScriptedOutcomes { script, cursor: 0 }
    }

    /// Number of outcomes handed out so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn draw<R: Rng + ?Sized>(&mut self, _batter: &Player, _rng: &mut R) -> Outcome {
        let outcome = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        outcome
    }
}

/// Runners on first, second and third
#[derive(Debug, Clone, Copy, Default)]
pub struct Bases<'a> {
    occupied: [Option<&'a Player>; 3],
}

impl<'a> Bases<'a> {
    pub fn runners(&self) -> usize {
        self.occupied.iter().filter(|b| b.is_some()).count()
    }

    pub fn on(&self, base: usize) -> Option<&'a Player> {
        self.occupied[base]
    }

    /// Apply one at-bat result and return the runs it scores
    pub fn advance(&mut self, outcome: Outcome, batter: &'a Player) -> u32 {
        let [first, second, third] = self.occupied;
        match outcome {
            Outcome::Out => 0,
            Outcome::Single => {
                self.occupied = [Some(batter), first, second];
                third.is_some() as u32
            }
            Outcome::Double => {
                self.occupied = [None, Some(batter), first];
                second.is_some() as u32 + third.is_some() as u32
            }
            Outcome::Triple => {
                let runs = self.runners() as u32;
                self.occupied = [None, None, Some(batter)];
                runs
            }
            Outcome::HomeRun => {
                let runs = self.runners() as u32 + 1;
                self.occupied = [None, None, None];
                runs
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InningResult {
    pub runs: u32,
    /// Lineup position due up to start the next inning
    pub next_batter: usize,
}

/// Play one half-inning starting with the batter at `leadoff`, until three outs.
pub fn simulate_inning<O, R>(lineup: &Lineup, leadoff: usize, source: &mut O, rng: &mut R) -> InningResult
where
    O: OutcomeSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut bases = Bases::default();
    let mut outs = 0;
    let mut runs = 0;
    let mut cursor = leadoff;

    while outs < 3 {
        let batter: &Player = lineup.batter(cursor);
        let outcome = source.draw(batter, rng);
        if outcome == Outcome::Out {
            outs += 1;
        }
        runs += bases.advance(outcome, batter);
        cursor = (cursor + 1) % lineup.len();
    }

    InningResult {
        runs,
        next_batter: cursor,
    }
}

/// Play `innings` innings, carrying the batting order over from one inning to the next.
pub fn simulate_game<O, R>(lineup: &Lineup, innings: usize, source: &mut O, rng: &mut R) -> GameResult
where
    O: OutcomeSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut inning_runs = Vec::with_capacity(innings);
    let mut leadoff = 0;

    for _ in 0..innings {
        let inning = simulate_inning(lineup, leadoff, source, rng);
        inning_runs.push(inning.runs);
        leadoff = inning.next_batter;
    }

    GameResult::new(inning_runs)
}
