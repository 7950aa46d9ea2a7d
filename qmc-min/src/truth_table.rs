// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::MAX_INPUTS, errors::InvalidInput};
use std::fmt;

/// One entry of a truth table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    True,
    False,
    DontCare,
}

impl Cell {
    /// Parses `'1'`, `'0'`, and `'-'`, `'x'` or `'X'` for don't care.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(Self::True),
            '0' => Some(Self::False),
            '-' | 'x' | 'X' => Some(Self::DontCare),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::True => '1',
            Self::False => '0',
            Self::DontCare => '-',
        }
    }

    #[inline]
    pub fn is_care(self) -> bool {
        !matches!(self, Self::DontCare)
    }
}

/// A complete truth table: one row per input combination, one column per output function.
///
/// Row `x` holds the outputs for the input assignment whose binary encoding is `x`, with input
/// variable 0 as the most significant bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    input_names: Vec<String>,
    output_names: Vec<String>,
    // Row-major, `output_names.len()` cells per row.
    cells: Vec<Cell>,
}

impl TruthTable {
    pub fn new(
        input_names: Vec<String>,
        output_names: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, InvalidInput> {
        let input_count = input_names.len();
        if input_count > MAX_INPUTS {
            return Err(InvalidInput::TooManyInputs {
                count: input_count,
                max: MAX_INPUTS,
            });
        }
        let expected = 1_usize << input_count;
        if rows.len() != expected {
            return Err(InvalidInput::RowCount {
                input_count,
                expected,
                got: rows.len(),
            });
        }

        let output_count = output_names.len();
        let mut cells = Vec::with_capacity(expected * output_count);
        for (row_ix, row) in rows.into_iter().enumerate() {
            if row.len() != output_count {
                return Err(InvalidInput::RowWidth {
                    row: row_ix,
                    expected: output_count,
                    got: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            input_names,
            output_names,
            cells,
        })
    }

    /// Builds a table from rows of cell characters, one character per output.
    pub fn from_strs(
        input_names: Vec<String>,
        output_names: Vec<String>,
        rows: &[&str],
    ) -> Result<Self, InvalidInput> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(row_ix, row)| {
                row.chars()
                    .enumerate()
                    .map(|(column, ch)| {
                        Cell::from_char(ch).ok_or(InvalidInput::InvalidCell {
                            row: row_ix,
                            column,
                            ch,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(input_names, output_names, rows)
    }

    /// Builds a table with inputs named `a, b, c, ...` and outputs named `A, B, C, ...`.
    pub fn with_default_names(
        input_count: usize,
        output_count: usize,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, InvalidInput> {
        Self::new(
            default_names(input_count, 'a'),
            default_names(output_count, 'A'),
            rows,
        )
    }

    #[inline]
    pub fn input_count(&self) -> usize {
        self.input_names.len()
    }

    #[inline]
    pub fn output_count(&self) -> usize {
        self.output_names.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        1 << self.input_count()
    }

    #[inline]
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    #[inline]
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// Returns the cell at `row` for output `column`.
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        assert!(
            column < self.output_count(),
            "output column {} must be in range 0..{}",
            column,
            self.output_count()
        );
        self.cells[row * self.output_count() + column]
    }

    /// Iterates over the cells of one output column, in row order.
    ///
    /// Panics if `column` is out of range.
    pub fn column(&self, column: usize) -> impl Iterator<Item = Cell> + '_ {
        assert!(
            column < self.output_count(),
            "output column {} must be in range 0..{}",
            column,
            self.output_count()
        );
        self.cells
            .iter()
            .skip(column)
            .step_by(self.output_count())
            .copied()
    }

    #[inline]
    pub fn matrix_display(&self) -> TruthTableDisplay<'_> {
        TruthTableDisplay { table: self }
    }
}

/// Displays the output cells of a table, one row per line.
pub struct TruthTableDisplay<'a> {
    table: &'a TruthTable,
}

impl<'a> fmt::Display for TruthTableDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.table.output_count();
        if width == 0 {
            return Ok(());
        }
        for row in self.table.cells.chunks(width) {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn default_names(count: usize, first: char) -> Vec<String> {
    (0..count).map(|ix| symbol_name(ix, first)).collect()
}

// a, b, ..., z, ba, bb, ... in base 26.
fn symbol_name(ix: usize, first: char) -> String {
    let ch = |digit: usize| char::from(first as u8 + digit as u8);
    if ix < 26 {
        return ch(ix).to_string();
    }
    let mut name = symbol_name(ix / 26, first);
    name.push(ch(ix % 26));
    name
}
