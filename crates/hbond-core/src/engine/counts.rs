use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Hydrogen-bond counts of one structure under the two detection policies.
///
/// `angle_satisfying <= distance_only` always holds for counts produced by the
/// aggregator, since angles are only evaluated for pairs that already passed the
/// distance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BondCounts {
    /// Donor-acceptor pairs within the distance cutoff.
    pub distance_only: u64,
    /// Of those, pairs with at least one hydrogen satisfying the angle criterion.
    pub angle_satisfying: u64,
}

impl BondCounts {
    /// Reported for structures that could not be analyzed.
    pub const SENTINEL: Self = Self {
        distance_only: 0,
        angle_satisfying: 0,
    };

    pub fn new(distance_only: u64, angle_satisfying: u64) -> Self {
        Self {
            distance_only,
            angle_satisfying,
        }
    }
}

impl Add for BondCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            distance_only: self.distance_only + rhs.distance_only,
            angle_satisfying: self.angle_satisfying + rhs.angle_satisfying,
        }
    }
}

impl AddAssign for BondCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for BondCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for BondCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.distance_only, self.angle_satisfying)
    }
}
