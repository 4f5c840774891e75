//! Winner-take-all electoral-vote allocation.

use electcast_core::{ElectoralMap, ForecastError, Side};

/// Per-candidate electoral-vote totals for one resolved outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElectoralTally {
    /// Votes held by candidate A.
    pub a: u32,
    /// Votes held by candidate B.
    pub b: u32,
}

impl ElectoralTally {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.a + self.b
    }

    #[must_use]
    pub fn votes_for(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// The side holding at least `threshold` votes, if either does. An exact
    /// below-threshold split (269–269 under the default map) yields `None`.
    #[must_use]
    pub fn winner(&self, threshold: u32) -> Option<Side> {
        if self.a >= threshold {
            Some(Side::A)
        } else if self.b >= threshold {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn add(&mut self, side: Side, votes: u32) {
        match side {
            Side::A => self.a += votes,
            Side::B => self.b += votes,
        }
    }
}

/// Allocates each region's electoral votes to its winner, winner-take-all.
///
/// Pure over the winner assignment, so trial outcomes can be unit-tested
/// against hand-built data independent of any randomness.
///
/// # Errors
///
/// Returns [`ForecastError::MissingRegionMapping`] when a winner's region is
/// absent from the vote table; skipping it silently would corrupt the
/// national total.
pub fn allocate_votes<'a, I>(winners: I, map: &ElectoralMap) -> Result<ElectoralTally, ForecastError>
where
    I: IntoIterator<Item = (&'a str, Side)>,
{
    let mut tally = ElectoralTally::default();
    for (region, winner) in winners {
        let Some(votes) = map.votes(region) else {
            return Err(ForecastError::MissingRegionMapping {
                region: region.to_string(),
            });
        };
        tally.add(winner, votes);
    }
    Ok(tally)
}
