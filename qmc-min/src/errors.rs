// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use thiserror::Error;

/// A truth table that cannot be minimized because of its shape or contents.
///
/// These are reported before any minimization starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("{count} input variables requested, at most {max} are supported")]
    TooManyInputs { count: usize, max: usize },

    #[error("expected {expected} rows for {input_count} input variables, got {got}")]
    RowCount {
        input_count: usize,
        expected: usize,
        got: usize,
    },

    #[error("row {row} has {got} cells, expected one per output ({expected})")]
    RowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell {ch:?} at row {row}, column {column}")]
    InvalidCell { row: usize, column: usize, ch: char },
}

/// A fixed-size resource ran out while minimizing a single output column.
///
/// The failure is scoped to that column. It is deterministic, so retrying the same input with
/// the same options fails the same way.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{resource} capacity exceeded (limit: {limit})")]
pub struct CapacityExceeded {
    pub resource: CapacityResource,
    pub limit: usize,
}

impl CapacityExceeded {
    #[inline]
    pub(crate) fn cube_table(limit: usize) -> Self {
        Self {
            resource: CapacityResource::CubeTable,
            limit,
        }
    }

    #[inline]
    pub(crate) fn petrick_pool(limit: usize) -> Self {
        Self {
            resource: CapacityResource::PetrickPool,
            limit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapacityResource {
    /// The tabulation table holding every cube produced while merging.
    CubeTable,
    /// The non-essential prime implicants handed to Petrick's method, one bit each.
    PetrickPool,
}

impl fmt::Display for CapacityResource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CubeTable => write!(f, "cube table"),
            Self::PetrickPool => write!(f, "Petrick prime implicant pool"),
        }
    }
}
