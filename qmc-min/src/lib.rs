// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact two-level minimization of multi-output truth tables.
//!
//! Every output column is minimized independently: tabulation finds all prime implicants,
//! essential prime implicants are extracted, and Petrick's method picks minimum-cost
//! coverings of whatever is left. See [`minimize::Minimizer`] for the entry point.

pub mod care_set;
pub mod cube;
pub mod errors;
pub mod essentials;
pub mod minimize;
pub mod options;
pub mod petrick;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
pub mod selector;
pub mod solution;
pub mod tabulation;
pub mod truth_table;
