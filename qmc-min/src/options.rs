// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::Cube;
use std::cmp::Ordering;

/// The output form to minimize for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Cover the 1 rows; each implicant is a product term (OR of ANDs).
    SumOfProducts,

    /// Cover the 0 rows; each implicant is the complement of a sum term (AND of ORs).
    ProductOfSums,
}

impl Polarity {
    /// Returns the row value whose rows have to be covered.
    #[inline]
    pub fn on_value(self) -> bool {
        matches!(self, Self::SumOfProducts)
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Self::SumOfProducts
    }
}

/// How many minimum-cost coverings to report per output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolutionBreadth {
    /// The first minimum-cost covering found.
    One,

    /// Every minimum-cost covering.
    All,
}

impl Default for SolutionBreadth {
    fn default() -> Self {
        Self::One
    }
}

/// The cost of a set of implicants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cost {
    pub terms: u32,
    pub literals: u32,
}

impl Cost {
    pub fn of<'a>(implicants: impl IntoIterator<Item = &'a Cube>, input_count: usize) -> Self {
        implicants
            .into_iter()
            .fold(Cost::default(), |cost, cube| Cost {
                terms: cost.terms + 1,
                literals: cost.literals + cube.literal_count(input_count),
            })
    }
}

/// The quantity minimized when choosing between coverings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CostCriterion {
    /// Fewest implicants, then fewest literals.
    TermCount,

    /// Fewest literals, then fewest implicants.
    LiteralCount,
}

impl CostCriterion {
    pub fn compare(self, a: &Cost, b: &Cost) -> Ordering {
        match self {
            Self::TermCount => (a.terms, a.literals).cmp(&(b.terms, b.literals)),
            Self::LiteralCount => (a.literals, a.terms).cmp(&(b.literals, b.terms)),
        }
    }
}

impl Default for CostCriterion {
    fn default() -> Self {
        Self::TermCount
    }
}

/// Options controlling a minimization run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinimizeOptions {
    pub polarity: Polarity,
    pub breadth: SolutionBreadth,
    pub cost: CostCriterion,
    /// Record a [`ColumnTrace`](crate::solution::ColumnTrace) for every minimized output.
    pub trace: bool,
}

impl MinimizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_breadth(mut self, breadth: SolutionBreadth) -> Self {
        self.breadth = breadth;
        self
    }

    pub fn with_cost(mut self, cost: CostCriterion) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_criteria() {
        let few_terms = Cost {
            terms: 2,
            literals: 6,
        };
        let few_literals = Cost {
            terms: 3,
            literals: 5,
        };
        assert_eq!(
            CostCriterion::TermCount.compare(&few_terms, &few_literals),
            Ordering::Less
        );
        assert_eq!(
            CostCriterion::LiteralCount.compare(&few_terms, &few_literals),
            Ordering::Greater
        );

        // Ties on the primary quantity fall through to the other one.
        let a = Cost {
            terms: 2,
            literals: 4,
        };
        let b = Cost {
            terms: 2,
            literals: 5,
        };
        assert_eq!(CostCriterion::TermCount.compare(&a, &b), Ordering::Less);
        assert_eq!(CostCriterion::TermCount.compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_cost_of() {
        let cubes = [Cube::new(0b000, 0b011), Cube::minterm(0b101)];
        assert_eq!(
            Cost::of(&cubes, 3),
            Cost {
                terms: 2,
                literals: 4
            }
        );
        assert_eq!(Cost::of(&[] as &[Cube], 3), Cost::default());
    }

    #[test]
    fn test_builder() {
        let options = MinimizeOptions::new()
            .with_polarity(Polarity::ProductOfSums)
            .with_breadth(SolutionBreadth::All)
            .with_cost(CostCriterion::LiteralCount)
            .with_trace(true);
        assert_eq!(options.polarity, Polarity::ProductOfSums);
        assert!(!options.polarity.on_value());
        assert_eq!(options.breadth, SolutionBreadth::All);
        assert_eq!(options.cost, CostCriterion::LiteralCount);
        assert!(options.trace);
        assert_eq!(MinimizeOptions::default().polarity, Polarity::SumOfProducts);
    }
}
