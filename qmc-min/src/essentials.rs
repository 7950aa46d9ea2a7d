// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::Cube;
use itertools::Itertools;

/// The outcome of essential prime implicant extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EssentialSplit {
    /// Essential prime implicants, in the order they were found.
    pub essentials: Vec<Cube>,
    /// The prime implicants that are not essential.
    pub remaining_primes: Vec<Cube>,
    /// The minterms not covered by any essential prime implicant.
    pub uncovered: Vec<u32>,
}

impl EssentialSplit {
    /// Repeatedly moves out prime implicants that are the only cover of some uncovered minterm.
    ///
    /// After each essential implicant is moved out, the minterms it covers are dropped and the
    /// scan restarts from the first uncovered minterm.
    pub fn extract(on_set: &[u32], primes: Vec<Cube>) -> Self {
        let mut remaining_primes = primes;
        let mut uncovered = on_set.to_vec();
        let mut essentials = Vec::new();

        while let Some(prime_ix) = uncovered
            .iter()
            .find_map(|&x| sole_cover(&remaining_primes, x))
        {
            let essential = remaining_primes.remove(prime_ix);
            uncovered.retain(|&x| !essential.covers(x));
            essentials.push(essential);
        }

        Self {
            essentials,
            remaining_primes,
            uncovered,
        }
    }

    /// Returns true if the essential prime implicants alone cover every minterm.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }
}

// Returns the index of the only prime covering `x`, if there is exactly one.
fn sole_cover(primes: &[Cube], x: u32) -> Option<usize> {
    primes
        .iter()
        .positions(|prime| prime.covers(x))
        .exactly_one()
        .ok()
}
