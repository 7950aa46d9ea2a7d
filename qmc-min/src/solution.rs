// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    care_set::TrivialFunction,
    cube::Cube,
    options::{Cost, Polarity},
    petrick::ProductTerm,
    truth_table::Cell,
};

/// The minimized form of one output column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputSolution {
    /// The column is constant (or entirely don't care); no implicants were computed.
    Trivial(TrivialFunction),

    Minimized(MinimizedOutput),
}

impl OutputSolution {
    #[inline]
    pub fn is_trivial(&self) -> bool {
        matches!(self, Self::Trivial(_))
    }

    #[inline]
    pub fn as_minimized(&self) -> Option<&MinimizedOutput> {
        match self {
            Self::Trivial(_) => None,
            Self::Minimized(output) => Some(output),
        }
    }

    /// Checks every solution against the column it was computed from, given in row order.
    ///
    /// Returns the first care row where a solution disagrees with the column.
    pub fn check_column(&self, column: impl IntoIterator<Item = Cell>) -> Result<(), u32> {
        match self {
            Self::Trivial(TrivialFunction::Unconstrained) => column
                .into_iter()
                .position(Cell::is_care)
                .map_or(Ok(()), |row| Err(row as u32)),
            Self::Trivial(TrivialFunction::Constant(value)) => {
                let expected = if *value { Cell::True } else { Cell::False };
                column
                    .into_iter()
                    .position(|cell| cell.is_care() && cell != expected)
                    .map_or(Ok(()), |row| Err(row as u32))
            }
            Self::Minimized(output) => output.check_column(column),
        }
    }
}

/// A set of non-essential prime implicants that, together with the essential ones, covers
/// every minterm of the care set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoveringSolution {
    pub implicants: Vec<Cube>,
    /// The cost of `implicants` alone, without the essential prime implicants.
    pub cost: Cost,
}

/// Essential prime implicants plus the alternative minimum-cost coverings of what they leave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinimizedOutput {
    pub(crate) polarity: Polarity,
    pub(crate) input_count: usize,
    pub(crate) care_set: Vec<u32>,
    pub(crate) essentials: Vec<Cube>,
    pub(crate) alternatives: Vec<CoveringSolution>,
    pub(crate) stats: ColumnStats,
    pub(crate) trace: Option<ColumnTrace>,
}

impl MinimizedOutput {
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[inline]
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// The minterms that had to be covered: the 1 rows for sum-of-products, the 0 rows for
    /// product-of-sums.
    #[inline]
    pub fn care_set(&self) -> &[u32] {
        &self.care_set
    }

    #[inline]
    pub fn essentials(&self) -> &[Cube] {
        &self.essentials
    }

    /// Alternative coverings of the minterms the essential implicants leave uncovered.
    ///
    /// Empty if the essential prime implicants cover everything.
    #[inline]
    pub fn alternatives(&self) -> &[CoveringSolution] {
        &self.alternatives
    }

    #[inline]
    pub fn stats(&self) -> &ColumnStats {
        &self.stats
    }

    #[inline]
    pub fn trace(&self) -> Option<&ColumnTrace> {
        self.trace.as_ref()
    }

    /// The number of complete solutions: one per alternative, or one if there are none.
    #[inline]
    pub fn solution_count(&self) -> usize {
        self.alternatives.len().max(1)
    }

    /// Iterates over the implicants of complete solution `solution_ix`: essentials first.
    ///
    /// Panics if `solution_ix >= self.solution_count()`.
    pub fn implicants(&self, solution_ix: usize) -> impl Iterator<Item = &Cube> + '_ {
        assert!(
            solution_ix < self.solution_count(),
            "solution ix {} must be in range 0..{}",
            solution_ix,
            self.solution_count()
        );
        let alternative = self
            .alternatives
            .get(solution_ix)
            .map_or(&[][..], |alt| &alt.implicants[..]);
        self.essentials.iter().chain(alternative)
    }

    /// The cost of complete solution `solution_ix`, essentials included.
    pub fn cost(&self, solution_ix: usize) -> Cost {
        Cost::of(self.implicants(solution_ix), self.input_count)
    }

    /// Returns true if some implicant of solution `solution_ix` covers minterm `x`.
    pub fn covers(&self, solution_ix: usize, x: u32) -> bool {
        self.implicants(solution_ix).any(|cube| cube.covers(x))
    }

    /// Evaluates the function realized by solution `solution_ix` at `row`.
    pub fn evaluate(&self, solution_ix: usize, row: u32) -> bool {
        let covered = self.covers(solution_ix, row);
        match self.polarity {
            Polarity::SumOfProducts => covered,
            Polarity::ProductOfSums => !covered,
        }
    }

    /// Checks every solution against the column it was computed from, given in row order.
    ///
    /// Returns the first care row where a solution disagrees with the column.
    pub fn check_column(&self, column: impl IntoIterator<Item = Cell>) -> Result<(), u32> {
        for (row, cell) in column.into_iter().enumerate() {
            let row = row as u32;
            let expected = match cell {
                Cell::True => true,
                Cell::False => false,
                Cell::DontCare => continue,
            };
            if (0..self.solution_count()).any(|ix| self.evaluate(ix, row) != expected) {
                return Err(row);
            }
        }
        Ok(())
    }
}

/// Work counters for one minimized column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnStats {
    /// On-set and don't care minterms fed to tabulation.
    pub literal_cubes: usize,
    /// Cubes in the tabulation table, consumed or not.
    pub table_size: usize,
    pub passes: usize,
    pub prime_count: usize,
    pub essential_count: usize,
    /// Prime implicants handed to Petrick's method.
    pub petrick_pool: usize,
    /// Irredundant coverings produced by Petrick's method, before cost filtering.
    pub petrick_candidates: usize,
}

/// The intermediate data of one column's minimization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnTrace {
    /// Every cube of the tabulation table, generation by generation.
    pub table: Vec<TracedCube>,
    pub petrick: Option<PetrickTrace>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TracedCube {
    pub cube: Cube,
    /// 0 for the seed minterms, then one more per merge.
    pub generation: usize,
    pub prime: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PetrickTrace {
    /// The non-essential prime implicants; bit `i` of a term stands for `pool[i]`.
    pub pool: Vec<Cube>,
    /// For each uncovered minterm, the pool implicants covering it.
    pub clauses: Vec<(u32, ProductTerm)>,
    /// Every irredundant covering, before cost filtering.
    pub candidates: Vec<ProductTerm>,
}
