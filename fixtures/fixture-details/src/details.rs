// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use qmc_min::{
    care_set::TrivialFunction,
    minimize::Minimization,
    solution::OutputSolution,
    truth_table::TruthTable,
};
use std::{fmt, fs, io};

/// The extension of stored truth tables.
pub const TABLE_EXTENSION: &str = "table";

/// The extension of stored minimization results.
pub const OUTPUT_EXTENSION: &str = "min";

/// A truth table stored in the fixture directory, along with its expected minimization.
#[derive(Clone, Debug)]
pub struct TableFixture {
    name: String,
    table_path: Utf8PathBuf,
    output_path: Utf8PathBuf,
}

impl TableFixture {
    pub fn new(dir: &Utf8Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let table_path = dir.join(format!("{}.{}", name, TABLE_EXTENSION));
        let output_path = dir.join(format!("{}.{}", name, OUTPUT_EXTENSION));
        Self {
            name,
            table_path,
            output_path,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn table_path(&self) -> &Utf8Path {
        &self.table_path
    }

    #[inline]
    pub fn output_path(&self) -> &Utf8Path {
        &self.output_path
    }

    pub fn read_table(&self) -> Result<TruthTable> {
        let text = fs::read_to_string(&self.table_path)
            .wrap_err_with(|| format!("failed to read {}", self.table_path))?;
        parse_table(&text).wrap_err_with(|| format!("failed to parse {}", self.table_path))
    }

    pub fn write_table(&self, table: &TruthTable) -> Result<()> {
        fs::write(&self.table_path, format_table(table))
            .wrap_err_with(|| format!("failed to write {}", self.table_path))
    }

    /// Returns the stored minimization, or `None` if it hasn't been generated yet.
    pub fn read_output(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.output_path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).wrap_err_with(|| format!("failed to read {}", self.output_path)),
        }
    }

    pub fn write_output(&self, output: &str) -> Result<()> {
        fs::write(&self.output_path, output)
            .wrap_err_with(|| format!("failed to write {}", self.output_path))
    }
}

/// Parses a stored truth table.
///
/// The table starts with `# inputs:` and `# outputs:` header lines listing names separated by
/// whitespace, followed by one line of cells per row.
pub fn parse_table(text: &str) -> Result<TruthTable> {
    let mut input_names = None;
    let mut output_names = None;
    let mut rows = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match line.strip_prefix('#').map(str::trim) {
            Some(header) => {
                if let Some(names) = header.strip_prefix("inputs:") {
                    input_names = Some(split_names(names));
                } else if let Some(names) = header.strip_prefix("outputs:") {
                    output_names = Some(split_names(names));
                }
            }
            None => rows.push(line),
        }
    }

    let input_names = input_names.ok_or_else(|| eyre!("missing `# inputs:` header"))?;
    let output_names = output_names.ok_or_else(|| eyre!("missing `# outputs:` header"))?;
    Ok(TruthTable::from_strs(input_names, output_names, &rows)?)
}

pub fn format_table(table: &TruthTable) -> String {
    format!(
        "# inputs: {}\n# outputs: {}\n{}",
        table.input_names().join(" "),
        table.output_names().join(" "),
        table.matrix_display(),
    )
}

/// Displays the results of a minimization, one block per output.
pub struct MinimizationDisplay<'a> {
    table: &'a TruthTable,
    minimization: &'a Minimization,
}

impl<'a> MinimizationDisplay<'a> {
    pub fn new(table: &'a TruthTable, minimization: &'a Minimization) -> Self {
        Self {
            table,
            minimization,
        }
    }

    fn fmt_solution(
        &self,
        f: &mut fmt::Formatter,
        name: &str,
        solution: &OutputSolution,
    ) -> fmt::Result {
        let input_count = self.table.input_count();
        let minimized = match solution {
            OutputSolution::Trivial(TrivialFunction::Unconstrained) => {
                return writeln!(f, "{}: unconstrained", name);
            }
            OutputSolution::Trivial(TrivialFunction::Constant(value)) => {
                return writeln!(f, "{}: constant {}", name, u8::from(*value));
            }
            OutputSolution::Minimized(minimized) => minimized,
        };

        let cost = minimized.cost(0);
        writeln!(
            f,
            "{}: {:?}, {} terms, {} literals",
            name,
            minimized.polarity(),
            cost.terms,
            cost.literals,
        )?;
        for essential in minimized.essentials() {
            writeln!(f, "  essential {}", essential.matrix_display(input_count))?;
        }
        for (ix, alternative) in minimized.alternatives().iter().enumerate() {
            write!(f, "  alternative {}:", ix)?;
            for cube in &alternative.implicants {
                write!(f, " {}", cube.matrix_display(input_count))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for MinimizationDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for output in &self.minimization.outputs {
            match &output.result {
                Ok(solution) => self.fmt_solution(f, &output.name, solution)?,
                Err(err) => writeln!(f, "{}: error: {}", output.name, err)?,
            }
        }
        Ok(())
    }
}

fn split_names(names: &str) -> Vec<String> {
    names.split_whitespace().map(str::to_owned).collect()
}
