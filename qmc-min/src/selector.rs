// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    care_set::TrivialFunction,
    cube::Cube,
    options::{MinimizeOptions, Polarity, SolutionBreadth},
    solution::{ColumnStats, ColumnTrace, CoveringSolution, MinimizedOutput, OutputSolution},
};

/// Assembles the final solution of a column from its essential prime implicants and the
/// minimum-cost coverings of whatever they leave uncovered.
#[derive(Clone, Copy, Debug)]
pub struct SolutionSelector {
    input_count: usize,
    polarity: Polarity,
    breadth: SolutionBreadth,
}

impl SolutionSelector {
    pub fn new(input_count: usize, options: &MinimizeOptions) -> Self {
        Self {
            input_count,
            polarity: options.polarity,
            breadth: options.breadth,
        }
    }

    /// `coverings` must all have the same minimum cost, in the order they were produced. With
    /// [`SolutionBreadth::One`] only the first is kept.
    pub fn select(
        &self,
        care_set: Vec<u32>,
        essentials: Vec<Cube>,
        coverings: Vec<CoveringSolution>,
        stats: ColumnStats,
        trace: Option<ColumnTrace>,
    ) -> OutputSolution {
        if coverings.is_empty()
            && matches!(&essentials[..], [only] if only.is_universe(self.input_count))
        {
            return OutputSolution::Trivial(TrivialFunction::Constant(self.polarity.on_value()));
        }

        let alternatives = match self.breadth {
            SolutionBreadth::One => coverings.into_iter().take(1).collect(),
            SolutionBreadth::All => coverings,
        };
        OutputSolution::Minimized(MinimizedOutput {
            polarity: self.polarity,
            input_count: self.input_count,
            care_set,
            essentials,
            alternatives,
            stats,
            trace,
        })
    }
}
