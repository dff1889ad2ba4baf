//! Tour recombination and mutation.
//!
//! Tours are visiting orders over `0..n`; every operator here returns a
//! visiting order over the same cities.
//!
//! - [`order_crossover`] (OX) keeps which cities follow which.
//! - [`pmx_crossover`] (PMX) keeps where cities sit in the tour.
//! - [`swap_mutation`] exchanges random pairs of positions.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use crate::random::random_segment;
use rand::Rng;

/// Recombination operator used to produce one child from two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Order crossover: keep a slice of one parent, fill the rest in the
    /// other parent's order.
    #[default]
    Order,
    /// Partially mapped crossover: keep a slice of one parent, place the
    /// other parent's cities at their own positions where possible.
    PartiallyMapped,
}

impl Crossover {
    /// Produces one child. The slice is taken from `parent1`.
    pub fn apply<R: Rng>(&self, parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Crossover::Order => order_crossover(parent1, parent2, rng),
            Crossover::PartiallyMapped => pmx_crossover(parent1, parent2, rng),
        }
    }
}

/// Order crossover.
///
/// The child keeps a random stretch of `parent1` in place. The cities
/// missing from that stretch are then written after it, wrapping around,
/// in the order they appear in `parent2` starting just past the stretch.
///
/// # Panics
/// Panics if the parents differ in length or are empty.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return parent1.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    ox_build_child(parent1, parent2, start, end)
}

fn ox_build_child(kept: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = kept.len();
    let mut child = kept.to_vec();
    let mut taken = vec![false; n];
    for &city in &kept[start..=end] {
        taken[city] = true;
    }

    let mut slot = (end + 1) % n;
    for city in donor.iter().cycle().skip(end + 1).take(n) {
        if !taken[*city] {
            child[slot] = *city;
            slot = (slot + 1) % n;
        }
    }
    child
}

/// Partially mapped crossover.
///
/// The child keeps a random stretch of `parent1` in place. A city that
/// `parent2` has inside the stretch but the child lacks is moved to the
/// position found by chasing the stretch's city pairs until the chain
/// leaves the stretch. Every other position copies `parent2`.
///
/// # Panics
/// Panics if the parents differ in length or are empty.
pub fn pmx_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return parent1.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    pmx_build_child(parent1, parent2, start, end)
}

fn pmx_build_child(kept: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = kept.len();
    let stretch = start..=end;
    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut in_child = vec![false; n];
    let mut index_in_donor = vec![0; n];
    for (i, &city) in donor.iter().enumerate() {
        index_in_donor[city] = i;
    }

    for i in stretch.clone() {
        child[i] = Some(kept[i]);
        in_child[kept[i]] = true;
    }

    for i in stretch.clone() {
        let displaced = donor[i];
        if in_child[displaced] {
            continue;
        }
        let mut slot = index_in_donor[kept[i]];
        while stretch.contains(&slot) {
            slot = index_in_donor[kept[slot]];
        }
        child[slot] = Some(displaced);
        in_child[displaced] = true;
    }

    child
        .into_iter()
        .zip(donor)
        .map(|(city, &fallback)| city.unwrap_or(fallback))
        .collect()
}

/// Visits every position and, with probability `rate`, swaps its city
/// with one at a uniformly chosen position.
pub fn swap_mutation<R: Rng>(tour: &mut [usize], rate: f64, rng: &mut R) {
    let n = tour.len();
    if n < 2 || rate <= 0.0 {
        return;
    }
    let rate = rate.min(1.0);
    for i in 0..n {
        if rng.random_bool(rate) {
            tour.swap(i, rng.random_range(0..n));
        }
    }
}
