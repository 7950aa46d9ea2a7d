// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    options::{CostCriterion, MinimizeOptions, Polarity, SolutionBreadth},
    truth_table::{Cell, TruthTable},
};
use proptest::prelude::*;
use std::ops::RangeInclusive;

impl Arbitrary for Cell {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![Just(Cell::True), Just(Cell::False), Just(Cell::DontCare)].boxed()
    }
}

impl Arbitrary for TruthTable {
    /// The range of input counts and the maximum number of outputs.
    type Parameters = Option<(RangeInclusive<usize>, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (input_counts, max_outputs) = params.unwrap_or((0..=4, 3));
        // At least one output, so there is always something to minimize.
        (input_counts, 1..=max_outputs.max(1))
            .prop_flat_map(|(input_count, output_count)| {
                let row = prop::collection::vec(any::<Cell>(), output_count);
                (
                    Just(input_count),
                    Just(output_count),
                    prop::collection::vec(row, 1 << input_count),
                )
            })
            .prop_filter_map(
                "table shape is always valid",
                |(input_count, output_count, rows)| {
                    TruthTable::with_default_names(input_count, output_count, rows).ok()
                },
            )
            .boxed()
    }
}

impl Arbitrary for MinimizeOptions {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop_oneof![Just(Polarity::SumOfProducts), Just(Polarity::ProductOfSums)],
            prop_oneof![Just(SolutionBreadth::One), Just(SolutionBreadth::All)],
            prop_oneof![
                Just(CostCriterion::TermCount),
                Just(CostCriterion::LiteralCount)
            ],
            any::<bool>(),
        )
            .prop_map(|(polarity, breadth, cost, trace)| MinimizeOptions {
                polarity,
                breadth,
                cost,
                trace,
            })
            .boxed()
    }
}
