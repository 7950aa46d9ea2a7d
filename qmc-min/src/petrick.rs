// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Petrick's method: exact selection of prime implicants covering the minterms left over after
//! essential prime implicants are removed.
//!
//! Each prime implicant in the pool is one bit of a `u64`. A set of implicants is a product
//! term, and the covering condition is a product of sums (one sum per minterm) that gets
//! multiplied out into a sum of such product terms.

use crate::{
    cube::Cube,
    errors::CapacityExceeded,
    options::{Cost, CostCriterion},
};
use arrayvec::ArrayVec;
use itertools::Itertools;
use std::cmp::Ordering;

/// The maximum number of prime implicants Petrick's method can choose from.
pub const PETRICK_POOL_CAPACITY: usize = u64::BITS as usize;

/// A set of pool indexes, one bit per prime implicant.
pub type ProductTerm = u64;

/// The non-essential prime implicants of a column, addressed by bit position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PetrickPool {
    primes: ArrayVec<Cube, PETRICK_POOL_CAPACITY>,
}

impl PetrickPool {
    pub fn new(primes: &[Cube]) -> Result<Self, CapacityExceeded> {
        let mut pool = ArrayVec::new();
        for prime in primes {
            pool.try_push(*prime)
                .map_err(|_| CapacityExceeded::petrick_pool(PETRICK_POOL_CAPACITY))?;
        }
        Ok(Self { primes: pool })
    }

    #[inline]
    pub fn primes(&self) -> &[Cube] {
        &self.primes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Returns the sum of single-implicant terms covering `x`, as pool indexes.
    pub fn clause(&self, x: u32) -> Vec<ProductTerm> {
        self.primes
            .iter()
            .positions(|prime| prime.covers(x))
            .map(|ix| 1 << ix)
            .collect()
    }

    /// Multiplies out the covering condition of `uncovered`.
    ///
    /// The result holds every covering that stays a covering only if none of its implicants is
    /// dropped, ordered by implicant count and then by bit pattern. It is empty if `uncovered` is
    /// empty or some minterm has no cover in the pool.
    pub fn expand(&self, uncovered: &[u32]) -> Vec<ProductTerm> {
        let mut clauses = uncovered.iter().map(|&x| self.clause(x));
        let mut product = match clauses.next() {
            Some(first) => first,
            None => return Vec::new(),
        };
        for clause in clauses {
            product = multiply(&product, &clause);
        }
        product
    }

    /// Iterates over the implicants making up `term`.
    pub fn implicants(&self, term: ProductTerm) -> impl Iterator<Item = &Cube> + '_ {
        self.primes
            .iter()
            .enumerate()
            .filter_map(move |(ix, prime)| (term & (1 << ix) != 0).then(|| prime))
    }

    pub fn cost(&self, term: ProductTerm, input_count: usize) -> Cost {
        Cost::of(self.implicants(term), input_count)
    }

    /// Keeps the terms of minimum cost under `criterion`, in the order given.
    pub fn minimum_cost(
        &self,
        terms: &[ProductTerm],
        input_count: usize,
        criterion: CostCriterion,
    ) -> Vec<(ProductTerm, Cost)> {
        let costed: Vec<_> = terms
            .iter()
            .map(|&term| (term, self.cost(term, input_count)))
            .collect();
        let best = match costed
            .iter()
            .map(|(_, cost)| *cost)
            .min_by(|a, b| criterion.compare(a, b))
        {
            Some(best) => best,
            None => return Vec::new(),
        };
        costed
            .into_iter()
            .filter(|(_, cost)| criterion.compare(cost, &best) == Ordering::Equal)
            .collect()
    }
}

/// Multiplies a sum of product terms by another, then applies absorption (`X + XY = X`).
pub fn multiply(product: &[ProductTerm], clause: &[ProductTerm]) -> Vec<ProductTerm> {
    // A term already containing some clause term is unchanged by the multiplication and
    // absorbs everything else built from it.
    let (satisfied, open): (Vec<ProductTerm>, Vec<ProductTerm>) = product
        .iter()
        .copied()
        .partition(|&term| clause.iter().any(|&c| term & c == c));
    let expanded = open
        .iter()
        .cartesian_product(clause)
        .map(|(a, b)| a | b)
        .filter(|&term| !satisfied.iter().any(|&s| s & term == s))
        .chain(satisfied.iter().copied())
        .sorted_by_key(|term| (term.count_ones(), *term))
        .dedup();
    absorb(expanded)
}

// Expects terms ordered by popcount, so any subset of a term is seen before it.
fn absorb(terms: impl IntoIterator<Item = ProductTerm>) -> Vec<ProductTerm> {
    let mut kept: Vec<ProductTerm> = Vec::new();
    for term in terms {
        if !kept.iter().any(|&k| k & term == k) {
            kept.push(term);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CapacityResource;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const A: u64 = 1;
    const B: u64 = 2;
    const C: u64 = 4;
    const D: u64 = 8;

    #[test]
    fn test_multiply() {
        // (A + B)(A + C) = A + BC
        assert_eq!(multiply(&[A, B], &[A, C]), vec![A, B | C]);
        // (A + BC)(B + C) = AB + AC + BC
        assert_eq!(multiply(&[A, B | C], &[B, C]), vec![A | B, A | C, B | C]);
        // A superset produced before its subset still gets absorbed.
        assert_eq!(multiply(&[A | B, C], &[C, D]), vec![C, A | B | D]);
        assert_eq!(multiply(&[A | B | C, A], &[B]), vec![A | B]);
    }

    #[test]
    fn test_multiply_satisfied_terms() {
        // A already meets (A + D), so A + BC becomes A + BCD and ABC is never kept.
        assert_eq!(multiply(&[A, B | C], &[A, D]), vec![A, B | C | D]);
        // Every term is satisfied: the product is unchanged.
        assert_eq!(multiply(&[A, B | C], &[A, B]), vec![A, B | C]);
        // None are.
        assert_eq!(multiply(&[A, B], &[C]), vec![A | C, B | C]);
    }

    #[test]
    fn test_cyclic_core() {
        // Minterms 0, 1, 2, 5, 6, 7 over three inputs.
        let pool = PetrickPool::new(&[
            Cube::new(0b000, 0b001),
            Cube::new(0b000, 0b010),
            Cube::new(0b001, 0b100),
            Cube::new(0b010, 0b100),
            Cube::new(0b101, 0b010),
            Cube::new(0b110, 0b001),
        ])
        .unwrap();
        let terms = pool.expand(&[0, 1, 2, 5, 6, 7]);
        // Two coverings of three implicants and three of four.
        assert_eq!(terms.iter().filter(|t| t.count_ones() == 3).count(), 2);
        assert_eq!(terms.iter().filter(|t| t.count_ones() == 4).count(), 3);
        assert_eq!(terms.len(), 5);

        let minimal = pool.minimum_cost(&terms, 3, CostCriterion::TermCount);
        assert_eq!(
            minimal.iter().map(|(term, _)| *term).collect::<Vec<_>>(),
            vec![0b011001, 0b100110]
        );
        for (term, cost) in &minimal {
            assert_eq!(
                *cost,
                Cost {
                    terms: 3,
                    literals: 6
                }
            );
            assert_eq!(pool.implicants(*term).count(), 3);
        }
    }

    #[test]
    fn test_literal_count_criterion() {
        // Minterm 4 is covered by 1-- or by 10-, minterm 1 only by its own cube. Both criteria
        // prefer the larger cube.
        let pool = PetrickPool::new(&[
            Cube::new(0b100, 0b011),
            Cube::new(0b100, 0b001),
            Cube::minterm(0b001),
        ])
        .unwrap();
        let terms = pool.expand(&[4, 1]);
        assert_eq!(terms, vec![0b101, 0b110]);
        for criterion in [CostCriterion::TermCount, CostCriterion::LiteralCount] {
            let minimal = pool.minimum_cost(&terms, 3, criterion);
            assert_eq!(minimal.len(), 1);
            assert_eq!(minimal[0].0, 0b101);
        }
    }

    #[test]
    fn test_criteria_disagree() {
        let pool = PetrickPool::new(&[
            // Two full minterms over four inputs: 8 literals.
            Cube::minterm(0b0000),
            Cube::minterm(0b1111),
            // Three single-literal cubes: 3 literals.
            Cube::new(0b0000, 0b0111),
            Cube::new(0b1000, 0b0111),
            Cube::new(0b0000, 0b1101),
        ])
        .unwrap();
        let terms = vec![0b00011, 0b11100];

        let by_terms = pool.minimum_cost(&terms, 4, CostCriterion::TermCount);
        assert_eq!(
            by_terms,
            vec![(
                0b00011,
                Cost {
                    terms: 2,
                    literals: 8
                }
            )]
        );
        let by_literals = pool.minimum_cost(&terms, 4, CostCriterion::LiteralCount);
        assert_eq!(
            by_literals,
            vec![(
                0b11100,
                Cost {
                    terms: 3,
                    literals: 3
                }
            )]
        );
    }

    #[test]
    fn test_pool_capacity() {
        let primes: Vec<Cube> = (0..65).map(Cube::minterm).collect();
        let err = PetrickPool::new(&primes).unwrap_err();
        assert_eq!(err.resource, CapacityResource::PetrickPool);
        assert_eq!(err.limit, 64);
        assert_eq!(PetrickPool::new(&primes[..64]).unwrap().len(), 64);
    }

    #[test]
    fn test_empty() {
        let pool = PetrickPool::new(&[Cube::minterm(1)]).unwrap();
        assert!(pool.expand(&[]).is_empty());
        // Minterm 2 has no cover.
        assert!(pool.expand(&[1, 2]).is_empty());
        assert!(pool
            .minimum_cost(&[], 2, CostCriterion::TermCount)
            .is_empty());
    }

    /// Every covering with no redundant implicant, by enumerating all subsets of the pool.
    fn brute_force_irredundant(pool: &PetrickPool, uncovered: &[u32]) -> BTreeSet<ProductTerm> {
        let covers = |term: ProductTerm| {
            uncovered
                .iter()
                .all(|&x| pool.implicants(term).any(|prime| prime.covers(x)))
        };
        (0..(1_u64 << pool.len()))
            .filter(|&term| covers(term))
            .filter(|&term| {
                (0..pool.len())
                    .filter(|ix| term & (1 << ix) != 0)
                    .all(|ix| !covers(term & !(1 << ix)))
            })
            .collect()
    }

    proptest! {
        // Absorbing while multiplying, rather than after the full expansion, never loses an
        // irredundant covering.
        #[test]
        fn proptest_expand_matches_brute_force(
            cubes in prop::collection::vec((0_u32..16, 0_u32..16), 1..=8),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 1..=10),
        ) {
            let primes: Vec<Cube> = cubes
                .into_iter()
                .map(|(value, mask)| Cube::new(value, mask))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let pool = PetrickPool::new(&primes).unwrap();
            let coverable: Vec<u32> = primes
                .iter()
                .flat_map(|prime| prime.minterms())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let uncovered: Vec<u32> = picks
                .iter()
                .map(|ix| *ix.get(&coverable))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let terms = pool.expand(&uncovered);
            let unique: BTreeSet<_> = terms.iter().copied().collect();
            prop_assert_eq!(unique.len(), terms.len());
            prop_assert_eq!(unique, brute_force_irredundant(&pool, &uncovered));
        }
    }
}
