// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tabulation: discovers every prime implicant of a single-output function by repeatedly
//! merging cubes whose weights differ by one.
//!
//! Each pass reads one immutable [`Generation`] and produces the next. A generation is split into
//! bands by weight; only neighboring bands can hold mergeable cubes. Cubes of a generation that
//! never merge during its pass are prime.

use crate::{cube::Cube, errors::CapacityExceeded};
use bitvec::prelude::*;
use log::trace;
use std::ops::Range;

/// The number of input variables the cube table is sized for, at most.
pub const CUBE_TABLE_MAX_VARS: usize = 10;

/// Returns the number of cubes the table may hold for `input_count` variables.
pub fn cube_table_capacity(input_count: usize) -> usize {
    3_usize.pow(input_count.min(CUBE_TABLE_MAX_VARS) as u32)
}

/// One generation of the cube table, with the cubes consumed while merging it.
#[derive(Clone, Debug)]
pub struct Generation {
    cubes: Vec<Cube>,
    // `cubes[band_bounds[w]..band_bounds[w + 1]]` holds the cubes of weight `w`.
    band_bounds: Vec<usize>,
    consumed: BitVec,
}

impl Generation {
    fn seed(input_count: usize, literal_cubes: &[Cube]) -> Self {
        let mut cubes = literal_cubes.to_vec();
        cubes.sort_unstable_by_key(|cube| (cube.weight(), cube.value()));

        let mut band_bounds = Vec::with_capacity(input_count + 2);
        let mut start = 0;
        for weight in 0..=input_count as u32 {
            band_bounds.push(start);
            start += cubes[start..]
                .iter()
                .take_while(|cube| cube.weight() == weight)
                .count();
        }
        band_bounds.push(cubes.len());

        let consumed = bitvec![0; cubes.len()];
        Self {
            cubes,
            band_bounds,
            consumed,
        }
    }

    #[inline]
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    #[inline]
    pub fn band_count(&self) -> usize {
        self.band_bounds.len() - 1
    }

    #[inline]
    pub fn band(&self, weight: usize) -> &[Cube] {
        &self.cubes[self.band_range(weight)]
    }

    #[inline]
    pub fn is_consumed(&self, ix: usize) -> bool {
        self.consumed[ix]
    }

    /// Iterates over the cubes of this generation that were never merged.
    pub fn primes(&self) -> impl Iterator<Item = &Cube> + '_ {
        self.cubes
            .iter()
            .zip(self.consumed.iter())
            .filter_map(|(cube, consumed)| (!*consumed).then(|| cube))
    }

    #[inline]
    fn band_range(&self, weight: usize) -> Range<usize> {
        self.band_bounds[weight]..self.band_bounds[weight + 1]
    }

    /// Merges every pair of neighboring bands, marking merged cubes as consumed.
    ///
    /// Returns the next generation, or `None` if nothing merged.
    fn merge_pass(&mut self, budget: &mut CubeBudget) -> Result<Option<Self>, CapacityExceeded> {
        let mut next_cubes: Vec<Cube> = Vec::new();
        let mut next_bounds = Vec::with_capacity(self.band_count());
        next_bounds.push(0);
        let mut merged_any = false;

        for weight in 0..self.band_count().saturating_sub(1) {
            let band_start = next_cubes.len();
            for j in self.band_range(weight) {
                let lower = self.cubes[j];
                for k in self.band_range(weight + 1) {
                    let merged = match lower.merge(&self.cubes[k]) {
                        Some(merged) => merged,
                        None => continue,
                    };
                    // Only the cubes produced by this band pair can be duplicates: every other
                    // band pair produces a different weight.
                    if let Err(pos) = next_cubes[band_start..].binary_search(&merged) {
                        budget.reserve()?;
                        next_cubes.insert(band_start + pos, merged);
                    }
                    self.consumed.set(j, true);
                    self.consumed.set(k, true);
                    merged_any = true;
                }
            }
            next_bounds.push(next_cubes.len());
        }

        if !merged_any {
            return Ok(None);
        }
        let consumed = bitvec![0; next_cubes.len()];
        Ok(Some(Self {
            cubes: next_cubes,
            band_bounds: next_bounds,
            consumed,
        }))
    }
}

/// The complete cube table of one output column.
#[derive(Clone, Debug)]
pub struct Tabulation {
    generations: Vec<Generation>,
}

impl Tabulation {
    /// Runs tabulation to completion over the care cubes (on-set and don't cares) of a column.
    pub fn run(input_count: usize, literal_cubes: &[Cube]) -> Result<Self, CapacityExceeded> {
        Self::run_with_capacity(input_count, literal_cubes, cube_table_capacity(input_count))
    }

    pub(crate) fn run_with_capacity(
        input_count: usize,
        literal_cubes: &[Cube],
        capacity: usize,
    ) -> Result<Self, CapacityExceeded> {
        let mut budget = CubeBudget {
            used: 0,
            limit: capacity,
        };
        for _ in literal_cubes {
            budget.reserve()?;
        }

        let mut generations = Vec::new();
        let mut current = Generation::seed(input_count, literal_cubes);
        loop {
            let next = current.merge_pass(&mut budget)?;
            trace!(
                "tabulation pass {}: {} cubes in {} bands, {} produced",
                generations.len(),
                current.cubes.len(),
                current.band_count(),
                next.as_ref().map_or(0, |next| next.cubes.len()),
            );
            generations.push(current);
            match next {
                Some(next) => current = next,
                None => break,
            }
        }

        Ok(Self { generations })
    }

    #[inline]
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// The number of merge passes performed, including the final pass that merged nothing.
    #[inline]
    pub fn passes(&self) -> usize {
        self.generations.len()
    }

    /// The total number of cubes in the table, consumed or not.
    pub fn table_size(&self) -> usize {
        self.generations.iter().map(|gen| gen.cubes.len()).sum()
    }

    /// Returns the prime implicants, largest cubes first.
    pub fn prime_implicants(&self) -> Vec<Cube> {
        self.generations
            .iter()
            .rev()
            .flat_map(|gen| gen.primes())
            .copied()
            .collect()
    }
}

struct CubeBudget {
    used: usize,
    limit: usize,
}

impl CubeBudget {
    #[inline]
    fn reserve(&mut self) -> Result<(), CapacityExceeded> {
        if self.used == self.limit {
            return Err(CapacityExceeded::cube_table(self.limit));
        }
        self.used += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CapacityResource;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn minterms(xs: &[u32]) -> Vec<Cube> {
        xs.iter().copied().map(Cube::minterm).collect()
    }

    fn sorted(mut cubes: Vec<Cube>) -> Vec<Cube> {
        cubes.sort();
        cubes
    }

    /// Every maximal cube whose minterms all belong to `care`, by exhaustive search.
    fn brute_force_primes(input_count: usize, care: &BTreeSet<u32>) -> Vec<Cube> {
        let space = 1_u32 << input_count;
        let implicants: Vec<Cube> = (0..space)
            .flat_map(|mask| (0..space).map(move |value| Cube::new(value, mask)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|cube| cube.minterms().all(|x| care.contains(&x)))
            .collect();
        implicants
            .iter()
            .filter(|cube| !implicants.iter().any(|other| other.strictly_contains(cube)))
            .copied()
            .collect()
    }

    #[test]
    fn test_or_function() {
        let tabulation = Tabulation::run(2, &minterms(&[1, 2, 3])).unwrap();
        assert_eq!(
            sorted(tabulation.prime_implicants()),
            vec![Cube::new(0b01, 0b10), Cube::new(0b10, 0b01)]
        );
        assert_eq!(tabulation.passes(), 2);
        assert_eq!(tabulation.table_size(), 5);
    }

    #[test]
    fn test_textbook_function() {
        // On-set 4, 8, 10, 11, 12, 15 with don't cares 9 and 14.
        let tabulation =
            Tabulation::run(4, &minterms(&[4, 8, 9, 10, 11, 12, 14, 15])).unwrap();
        let expected = vec![
            // -100
            Cube::new(0b0100, 0b1000),
            // 10--
            Cube::new(0b1000, 0b0011),
            // 1--0
            Cube::new(0b1000, 0b0110),
            // 1-1-
            Cube::new(0b1010, 0b0101),
        ];
        assert_eq!(sorted(tabulation.prime_implicants()), sorted(expected));

        // Bands of the seed generation are split by weight.
        let seed = &tabulation.generations()[0];
        assert_eq!(seed.band_count(), 5);
        assert_eq!(seed.band(0), &[] as &[Cube]);
        assert_eq!(seed.band(1), &minterms(&[4, 8])[..]);
        assert_eq!(seed.band(2), &minterms(&[9, 10, 12])[..]);
        assert_eq!(seed.band(3), &minterms(&[11, 14])[..]);
        assert_eq!(seed.band(4), &minterms(&[15])[..]);
    }

    #[test]
    fn test_duplicates_are_merged_once() {
        // The full 3-cube 1-- is reachable through two different merges.
        let tabulation = Tabulation::run(3, &minterms(&[4, 5, 6, 7])).unwrap();
        assert_eq!(tabulation.prime_implicants(), vec![Cube::new(0b100, 0b011)]);
        let last = tabulation.generations().last().unwrap();
        assert_eq!(last.cubes(), &[Cube::new(0b100, 0b011)]);
        assert!(!last.is_consumed(0));
    }

    #[test]
    fn test_capacity_exceeded() {
        let literal_cubes = minterms(&[1, 2, 3, 4, 5, 6, 7]);
        let err = Tabulation::run_with_capacity(3, &literal_cubes, 10).unwrap_err();
        assert_eq!(err.resource, CapacityResource::CubeTable);
        assert_eq!(err.limit, 10);

        // 7 minterms, 9 edges and 3 faces fit in exactly 19 entries.
        let tabulation = Tabulation::run_with_capacity(3, &literal_cubes, 19).unwrap();
        assert_eq!(tabulation.table_size(), 19);
        assert!(Tabulation::run_with_capacity(3, &literal_cubes, 18).is_err());
    }

    #[test]
    fn test_capacity() {
        assert_eq!(cube_table_capacity(2), 9);
        assert_eq!(cube_table_capacity(10), 59049);
        assert_eq!(cube_table_capacity(16), 59049);
    }

    proptest! {
        #[test]
        fn proptest_primes_match_brute_force(
            (input_count, rows) in (1_usize..=4).prop_flat_map(|n| {
                (Just(n), prop::collection::vec(any::<bool>(), 1 << n))
            })
        ) {
            let care: BTreeSet<u32> = rows
                .iter()
                .enumerate()
                .filter_map(|(row, &care)| care.then(|| row as u32))
                .collect();
            prop_assume!(!care.is_empty());
            let literal_cubes: Vec<Cube> = care.iter().copied().map(Cube::minterm).collect();
            let tabulation = Tabulation::run(input_count, &literal_cubes).unwrap();
            let primes = tabulation.prime_implicants();

            let unique: BTreeSet<_> = primes.iter().collect();
            prop_assert_eq!(unique.len(), primes.len(), "no prime is reported twice");
            prop_assert_eq!(sorted(primes), sorted(brute_force_primes(input_count, &care)));
        }
    }
}
