//! Seeded team split and host draw.
//!
//! The allocator is a pure function of `(roster, seed)`: the same inputs always
//! produce the same teams and host, which makes finalize reproducible in tests
//! and auditable from logs.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::domain::UserId;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamAllocation {
    pub team_a: Vec<UserId>,
    pub team_b: Vec<UserId>,
    pub host: UserId,
    /// Seed the allocation was drawn from.
    pub seed: u64,
}

impl TeamAllocation {
    pub fn team_of(&self, user: UserId) -> Option<char> {
        if self.team_a.contains(&user) {
            Some('A')
        } else if self.team_b.contains(&user) {
            Some('B')
        } else {
            None
        }
    }
}

/// Shuffle the roster, split it into two contiguous halves, and draw a host
/// from the full roster independently of the shuffle.
///
/// Callers guarantee a full roster; an empty or odd-sized roster is an
/// invariant violation rather than a user error.
pub fn allocate(roster: &[UserId], seed: u64) -> Result<TeamAllocation, DomainError> {
    if roster.is_empty() || roster.len() % 2 != 0 {
        return Err(DomainError::invariant(format!(
            "team allocation needs a non-empty even roster, got {} players",
            roster.len()
        )));
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let (team_a, team_b, host) = allocate_with(roster, &mut rng);

    Ok(TeamAllocation {
        team_a,
        team_b,
        host,
        seed,
    })
}

fn allocate_with<R: Rng + ?Sized>(
    roster: &[UserId],
    rng: &mut R,
) -> (Vec<UserId>, Vec<UserId>, UserId) {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);
    let team_b = shuffled.split_off(shuffled.len() / 2);
    let host = roster[rng.random_range(0..roster.len())];
    (shuffled, team_b, host)
}
