// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::Cube, options::Polarity, truth_table::Cell};

/// An output column that needs no minimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrivialFunction {
    /// Every row is don't care, so any constant realizes the column.
    Unconstrained,

    /// The column is the given constant over all of its care rows.
    Constant(bool),
}

/// The result of scanning one output column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractedColumn {
    Trivial(TrivialFunction),
    Care(CareSet),
}

/// The rows of one output column that matter for minimization, under a polarity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CareSet {
    on_set: Vec<u32>,
    literal_cubes: Vec<Cube>,
}

impl CareSet {
    /// Scans an output column, given in row order.
    ///
    /// Constant and all-don't-care columns are reported as [`ExtractedColumn::Trivial`].
    pub fn extract(column: impl IntoIterator<Item = Cell>, polarity: Polarity) -> ExtractedColumn {
        let (on_cell, off_cell) = match polarity {
            Polarity::SumOfProducts => (Cell::True, Cell::False),
            Polarity::ProductOfSums => (Cell::False, Cell::True),
        };

        let mut on_set = Vec::new();
        let mut literal_cubes = Vec::new();
        let mut any_true = false;
        let mut any_false = false;

        for (row, cell) in column.into_iter().enumerate() {
            let row = row as u32;
            match cell {
                Cell::True => any_true = true,
                Cell::False => any_false = true,
                Cell::DontCare => {}
            }
            if cell == on_cell {
                on_set.push(row);
            }
            if cell != off_cell {
                literal_cubes.push(Cube::minterm(row));
            }
        }

        match (any_true, any_false) {
            (false, false) => ExtractedColumn::Trivial(TrivialFunction::Unconstrained),
            (true, false) => ExtractedColumn::Trivial(TrivialFunction::Constant(true)),
            (false, true) => ExtractedColumn::Trivial(TrivialFunction::Constant(false)),
            (true, true) => ExtractedColumn::Care(Self {
                on_set,
                literal_cubes,
            }),
        }
    }

    /// The minterms that must be covered, ascending.
    #[inline]
    pub fn on_set(&self) -> &[u32] {
        &self.on_set
    }

    /// One single-minterm cube per on-set or don't care row, ascending.
    #[inline]
    pub fn literal_cubes(&self) -> &[Cube] {
        &self.literal_cubes
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<u32>, Vec<Cube>) {
        (self.on_set, self.literal_cubes)
    }
}
