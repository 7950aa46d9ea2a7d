// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random truth tables.
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,

        /// The number of input variables of each table.
        #[clap(long, short, default_value_t = 5)]
        inputs: usize,

        /// The maximum number of outputs of each table.
        #[clap(long, short, default_value_t = 4)]
        outputs: usize,
    },

    /// Minimize every stored table and store the results.
    GenerateOutputs,

    /// Minimize every stored table and compare with the stored results.
    CheckOutputs,
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        let fixtures = AllFixtures::get();
        match self {
            Self::GenerateInputs {
                count,
                inputs,
                outputs,
            } => fixtures.generate_inputs(count, inputs, outputs),
            Self::GenerateOutputs => fixtures.generate_outputs(),
            Self::CheckOutputs => fixtures.check_outputs(),
        }
    }
}
