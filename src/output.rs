use std::io::{self, Write};

use url::Url;

use tabled::settings::object::Rows;
use tabled::settings::{Modify, Style, Width};
use tabled::{Table, Tabled};

use crate::parser::{Registry, Variable};
use crate::url::ColHeader;

/// Line writer that treats a closed pipe as a normal end of output.
///
/// `goat ... | head` closes stdout early; on BrokenPipe the process exits
/// with code 0, any other I/O error is returned.
pub struct SafeOutput<W: Write> {
    writer: W,
}

impl<W: Write> SafeOutput<W> {
    pub fn new(writer: W) -> Self {
        SafeOutput { writer }
    }

    pub fn writeln(&mut self, content: &str) -> io::Result<()> {
        let result = writeln!(self.writer, "{}", content).and_then(|_| self.writer.flush());
        match result {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(0),
            other => other,
        }
    }

    /// Numbered URL listing, one per line
    pub fn write_urls(&mut self, urls: &[Url]) -> io::Result<()> {
        for (index, url) in urls.iter().enumerate() {
            self.writeln(&format!("{}.\tGoaT API URL: {}", index, url))?;
        }
        Ok(())
    }

    pub fn write_header(&mut self, header: &ColHeader) -> io::Result<()> {
        if header.is_empty() {
            return Ok(());
        }
        self.writeln(&format!("columns:\t{}", header))
    }

    pub fn write_table(&mut self, registry: &Registry) -> io::Result<()> {
        for line in variables_table(registry).lines() {
            self.writeln(line)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Widest cell in the variables table before it wraps
pub const MAX_CELL_WIDTH: usize = 40;

pub fn safe_stdout() -> SafeOutput<io::Stdout> {
    SafeOutput::new(io::stdout())
}

#[derive(Tabled)]
struct VariableRow {
    #[tabled(rename = "Variable")]
    name: &'static str,
    #[tabled(rename = "Display name")]
    display_name: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Operators")]
    operators: String,
    #[tabled(rename = "Values")]
    values: String,
}

impl From<&Variable> for VariableRow {
    fn from(variable: &Variable) -> Self {
        let summary = if variable.summary { ", min(), max()" } else { "" };
        VariableRow {
            name: variable.name,
            display_name: variable.display_name,
            kind: variable.kind.to_string(),
            operators: format!("{}{}", variable.kind.operators(), summary),
            values: variable.values.join(", "),
        }
    }
}

/// Every variable in a registry as a table: name, display name, type,
/// operators and (for enumerated keywords) the allowed values, wrapped to
/// [`MAX_CELL_WIDTH`]
pub fn variables_table(registry: &Registry) -> String {
    let rows = registry.iter().map(VariableRow::from);
    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(MAX_CELL_WIDTH).keep_words()))
        .to_string()
}

/// The registry as a JSON array of variables
#[cfg(feature = "json")]
pub fn variables_json(registry: &Registry) -> serde_json::Result<String> {
    let variables: Vec<_> = registry.iter().collect();
    serde_json::to_string_pretty(&variables)
}
