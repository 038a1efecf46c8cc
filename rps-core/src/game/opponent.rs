//! Opponent Chooser
//!
//! The opponent has no strategy: every draw is uniform over the three
//! gestures. `MoveSource` is the seam tests use to force a move.

use tracing::debug;

use crate::core::choice::Choice;
use crate::core::rng::DeterministicRng;

/// Anything that can produce the opponent's next gesture.
pub trait MoveSource {
    /// Draw the next gesture.
    fn next_choice(&mut self) -> Choice;
}

/// Uniform random opponent.
#[derive(Clone, Debug, Default)]
pub struct RandomOpponent {
    rng: DeterministicRng,
}

impl RandomOpponent {
    /// Opponent seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self { rng: DeterministicRng::from_entropy() }
    }

    /// Opponent with a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: DeterministicRng::new(seed) }
    }
}

impl MoveSource for RandomOpponent {
    fn next_choice(&mut self) -> Choice {
        self.rng.choose(&Choice::ALL).copied().unwrap_or(Choice::Rock)
    }
}

/// Opponent that cycles through a fixed script.
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    script: Vec<Choice>,
    cursor: usize,
}

impl ScriptedOpponent {
    /// Create from a script. An empty script always plays rock.
    pub fn new(script: Vec<Choice>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Opponent that always plays the same gesture.
    pub fn always(choice: Choice) -> Self {
        Self::new(vec![choice])
    }
}

impl MoveSource for ScriptedOpponent {
    fn next_choice(&mut self) -> Choice {
        if self.script.is_empty() {
            return Choice::Rock;
        }
        let choice = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        choice
    }
}

impl<M: MoveSource + ?Sized> MoveSource for Box<M> {
    fn next_choice(&mut self) -> Choice {
        (**self).next_choice()
    }
}

/// Draw the opponent's gesture for this turn.
pub fn choose_opponent_move<M: MoveSource + ?Sized>(source: &mut M) -> Choice {
    let choice = source.next_choice();
    debug!("Opponent chose: {}", choice);
    choice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_distribution() {
        const DRAWS: usize = 10_000;
        let mut opponent = RandomOpponent::seeded(2024);
        let mut counts = [0usize; 3];

        for _ in 0..DRAWS {
            counts[choose_opponent_move(&mut opponent) as usize] += 1;
        }

        let expected = DRAWS as f64 / 3.0;
        for (i, count) in counts.iter().enumerate() {
            let deviation = (*count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "choice {i} drawn {count} times");
        }
    }

    #[test]
    fn test_entropy_opponent_covers_all_choices() {
        let mut opponent = RandomOpponent::from_entropy();
        let mut seen = [false; 3];
        for _ in 0..1000 {
            seen[opponent.next_choice() as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomOpponent::seeded(7);
        let mut b = RandomOpponent::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.next_choice(), b.next_choice());
        }
    }

    #[test]
    fn test_random_opponent_picks_through_rng() {
        let mut opponent = RandomOpponent::seeded(99);
        let mut rng = DeterministicRng::new(99);
        for _ in 0..50 {
            assert_eq!(opponent.next_choice(), *rng.choose(&Choice::ALL).unwrap());
        }
    }

    #[test]
    fn test_scripted_cycles() {
        let mut opponent = ScriptedOpponent::new(vec![Choice::Paper, Choice::Scissors]);
        assert_eq!(opponent.next_choice(), Choice::Paper);
        assert_eq!(opponent.next_choice(), Choice::Scissors);
        assert_eq!(opponent.next_choice(), Choice::Paper);

        let mut empty = ScriptedOpponent::new(Vec::new());
        assert_eq!(empty.next_choice(), Choice::Rock);
    }

    #[test]
    fn test_boxed_source() {
        let mut boxed: Box<dyn MoveSource> = Box::new(ScriptedOpponent::always(Choice::Scissors));
        assert_eq!(choose_opponent_move(&mut boxed), Choice::Scissors);
    }
}
