// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives the minimization of every output column of a truth table.
//!
//! Each column runs through care-set extraction, tabulation, essential prime implicant
//! extraction and, if anything is left uncovered, Petrick's method. Columns share nothing but
//! the table and the options, so they can be minimized in parallel.

use crate::{
    care_set::{CareSet, ExtractedColumn},
    errors::CapacityExceeded,
    essentials::EssentialSplit,
    options::MinimizeOptions,
    petrick::PetrickPool,
    selector::SolutionSelector,
    solution::{
        ColumnStats, ColumnTrace, CoveringSolution, OutputSolution, PetrickTrace, TracedCube,
    },
    tabulation::{cube_table_capacity, Tabulation},
    truth_table::TruthTable,
};
use log::{debug, warn};
use rayon::prelude::*;

/// Minimizes every output of `table`, one after the other.
pub fn minimize(table: &TruthTable, options: MinimizeOptions) -> Minimization {
    Minimizer::new(table, options).minimize()
}

/// The results for every output column of a table, in column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minimization {
    pub outputs: Vec<OutputMinimization>,
}

impl Minimization {
    /// Returns true if no column ran out of capacity.
    pub fn is_complete(&self) -> bool {
        self.outputs.iter().all(|output| output.result.is_ok())
    }

    /// Iterates over the columns that ran out of capacity, with their indexes.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &CapacityExceeded)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .filter_map(|(ix, output)| output.result.as_ref().err().map(|err| (ix, err)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputMinimization {
    pub name: String,
    pub result: Result<OutputSolution, CapacityExceeded>,
}

/// Minimizes the output columns of a validated truth table.
#[derive(Clone, Copy, Debug)]
pub struct Minimizer<'a> {
    table: &'a TruthTable,
    options: MinimizeOptions,
    cube_capacity: usize,
}

impl<'a> Minimizer<'a> {
    pub fn new(table: &'a TruthTable, options: MinimizeOptions) -> Self {
        Self {
            table,
            options,
            cube_capacity: cube_table_capacity(table.input_count()),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_cube_capacity(mut self, cube_capacity: usize) -> Self {
        self.cube_capacity = cube_capacity;
        self
    }

    #[inline]
    pub fn table(&self) -> &'a TruthTable {
        self.table
    }

    #[inline]
    pub fn options(&self) -> &MinimizeOptions {
        &self.options
    }

    pub fn minimize(&self) -> Minimization {
        let outputs = (0..self.table.output_count())
            .map(|ix| self.output_minimization(ix))
            .collect();
        Minimization { outputs }
    }

    /// Minimizes every column on the rayon thread pool. Results are identical to
    /// [`Self::minimize`].
    pub fn minimize_parallel(&self) -> Minimization {
        let outputs = (0..self.table.output_count())
            .into_par_iter()
            .map(|ix| self.output_minimization(ix))
            .collect();
        Minimization { outputs }
    }

    /// Minimizes output column `ix`.
    ///
    /// Panics if `ix` is out of range.
    pub fn minimize_output(&self, ix: usize) -> Result<OutputSolution, CapacityExceeded> {
        let name = &self.table.output_names()[ix];
        let result = self.minimize_column(ix);
        if let Err(err) = &result {
            warn!("output {} ({}): {}", ix, name, err);
        }
        result
    }

    fn output_minimization(&self, ix: usize) -> OutputMinimization {
        OutputMinimization {
            name: self.table.output_names()[ix].clone(),
            result: self.minimize_output(ix),
        }
    }

    fn minimize_column(&self, ix: usize) -> Result<OutputSolution, CapacityExceeded> {
        let input_count = self.table.input_count();
        let care_set = match CareSet::extract(self.table.column(ix), self.options.polarity) {
            ExtractedColumn::Trivial(trivial) => {
                debug!("output {}: trivial ({:?})", ix, trivial);
                return Ok(OutputSolution::Trivial(trivial));
            }
            ExtractedColumn::Care(care_set) => care_set,
        };
        debug!(
            "output {}: {} minterms to cover, {} literal cubes",
            ix,
            care_set.on_set().len(),
            care_set.literal_cubes().len(),
        );

        let tabulation = Tabulation::run_with_capacity(
            input_count,
            care_set.literal_cubes(),
            self.cube_capacity,
        )?;
        let primes = tabulation.prime_implicants();
        debug!(
            "output {}: {} passes, {} cubes, {} prime implicants",
            ix,
            tabulation.passes(),
            tabulation.table_size(),
            primes.len(),
        );

        let mut stats = ColumnStats {
            literal_cubes: care_set.literal_cubes().len(),
            table_size: tabulation.table_size(),
            passes: tabulation.passes(),
            prime_count: primes.len(),
            ..ColumnStats::default()
        };
        let mut trace = self.options.trace.then(|| ColumnTrace {
            table: traced_table(&tabulation),
            petrick: None,
        });

        let (on_set, _) = care_set.into_parts();
        let split = EssentialSplit::extract(&on_set, primes);
        stats.essential_count = split.essentials.len();
        debug!(
            "output {}: {} essential prime implicants, {} minterms left",
            ix,
            split.essentials.len(),
            split.uncovered.len(),
        );

        let mut coverings = Vec::new();
        if !split.is_complete() {
            let pool = PetrickPool::new(&split.remaining_primes)?;
            let candidates = pool.expand(&split.uncovered);
            let minimal = pool.minimum_cost(&candidates, input_count, self.options.cost);
            stats.petrick_pool = pool.len();
            stats.petrick_candidates = candidates.len();
            debug!(
                "output {}: Petrick's method over {} implicants, {} candidates, {} of minimum cost",
                ix,
                pool.len(),
                candidates.len(),
                minimal.len(),
            );

            if let Some(trace) = &mut trace {
                trace.petrick = Some(PetrickTrace {
                    pool: pool.primes().to_vec(),
                    clauses: split
                        .uncovered
                        .iter()
                        .map(|&x| (x, pool.clause(x).into_iter().fold(0, |acc, t| acc | t)))
                        .collect(),
                    candidates: candidates.clone(),
                });
            }
            coverings = minimal
                .into_iter()
                .map(|(term, cost)| CoveringSolution {
                    implicants: pool.implicants(term).copied().collect(),
                    cost,
                })
                .collect();
        }

        let selector = SolutionSelector::new(input_count, &self.options);
        Ok(selector.select(on_set, split.essentials, coverings, stats, trace))
    }
}

fn traced_table(tabulation: &Tabulation) -> Vec<TracedCube> {
    tabulation
        .generations()
        .iter()
        .enumerate()
        .flat_map(|(generation, gen)| {
            gen.cubes()
                .iter()
                .enumerate()
                .map(move |(ix, cube)| TracedCube {
                    cube: *cube,
                    generation,
                    prime: !gen.is_consumed(ix),
                })
        })
        .collect()
}
