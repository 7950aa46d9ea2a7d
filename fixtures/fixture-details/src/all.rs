// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    details::{MinimizationDisplay, TableFixture, TABLE_EXTENSION},
    value_generator::ValueGenerator,
};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Result,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use qmc_min::{
    minimize::{Minimization, Minimizer},
    options::{MinimizeOptions, SolutionBreadth},
    truth_table::TruthTable,
};
use std::fs;

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details lives in the fixtures directory")
            .join("data");
        Self { dir }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Returns every stored truth table, sorted by name.
    pub fn fixtures(&self) -> Result<Vec<TableFixture>> {
        let mut fixtures = Vec::new();
        let entries =
            fs::read_dir(&self.dir).wrap_err_with(|| format!("failed to read {}", self.dir))?;
        for entry in entries {
            let path = Utf8PathBuf::try_from(entry?.path())?;
            if path.extension() != Some(TABLE_EXTENSION) {
                continue;
            }
            let name = path
                .file_stem()
                .ok_or_else(|| eyre!("fixture path {} has no file name", path))?;
            fixtures.push(TableFixture::new(&self.dir, name));
        }
        fixtures.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(fixtures)
    }

    /// Generates `count` random truth tables with `input_count` inputs and up to
    /// `max_outputs` outputs.
    pub fn generate_inputs(
        &self,
        count: usize,
        input_count: usize,
        max_outputs: usize,
    ) -> Result<()> {
        let mut value_gen =
            ValueGenerator::from_seed(format!("qmc-min_{}_{}", input_count, max_outputs));
        fs::create_dir_all(&self.dir).wrap_err_with(|| format!("failed to create {}", self.dir))?;

        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let table = gen.generate(any_with::<TruthTable>(Some((
                input_count..=input_count,
                max_outputs,
            ))));
            let name = format!("random_{}_{}_{:03}", input_count, max_outputs, ix);
            TableFixture::new(&self.dir, name).write_table(&table)?;
        }

        println!("generated {} tables in {}", count, self.dir);
        Ok(())
    }

    /// Minimizes every stored table and writes the results next to it.
    pub fn generate_outputs(&self) -> Result<()> {
        let fixtures = self.fixtures()?;
        for fixture in &fixtures {
            let table = fixture.read_table()?;
            let minimization = minimize_fixture(&table);
            let rendered = MinimizationDisplay::new(&table, &minimization).to_string();
            fixture.write_output(&rendered)?;
        }

        println!("generated {} outputs in {}", fixtures.len(), self.dir);
        Ok(())
    }

    /// Minimizes every stored table, checks each solution against its table, and compares the
    /// results with the stored ones.
    pub fn check_outputs(&self) -> Result<()> {
        let fixtures = self.fixtures()?;
        let mut mismatches = Vec::new();
        for fixture in &fixtures {
            let table = fixture.read_table()?;
            let minimization = minimize_fixture(&table);
            check_minimization(&table, &minimization)
                .wrap_err_with(|| format!("fixture {} failed", fixture.name()))?;

            let rendered = MinimizationDisplay::new(&table, &minimization).to_string();
            match fixture.read_output()? {
                Some(expected) if expected != rendered => mismatches.push(fixture.name()),
                Some(_) => {}
                None => println!("{}: no stored output, skipping comparison", fixture.name()),
            }
        }

        if !mismatches.is_empty() {
            bail!(
                "{} of {} outputs differ from the stored ones: {}",
                mismatches.len(),
                fixtures.len(),
                mismatches.join(", ")
            );
        }
        println!("checked {} fixtures", fixtures.len());
        Ok(())
    }
}

fn minimize_fixture(table: &TruthTable) -> Minimization {
    let options = MinimizeOptions::new().with_breadth(SolutionBreadth::All);
    Minimizer::new(table, options).minimize_parallel()
}

fn check_minimization(table: &TruthTable, minimization: &Minimization) -> Result<()> {
    for (column, output) in minimization.outputs.iter().enumerate() {
        // Capacity failures are deterministic and show up in the rendered output.
        let solution = match &output.result {
            Ok(solution) => solution,
            Err(_) => continue,
        };
        if let Err(row) = solution.check_column(table.column(column)) {
            bail!("output {}: solution disagrees with row {}", output.name, row);
        }
    }
    Ok(())
}
