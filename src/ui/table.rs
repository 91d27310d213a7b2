use crate::report::{FileReport, SymbolReport};
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct SymbolRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Bases")]
    bases: String,
    #[tabled(rename = "References")]
    references: String,
}

/// One row per symbol; empty string for no symbols
pub fn symbol_table(symbols: &[SymbolReport]) -> String {
    if symbols.is_empty() {
        return String::new();
    }

    let rows = symbols.iter().map(|s| SymbolRow {
        id: s.id.to_string(),
        kind: s.kind.as_str(),
        name: if s.signature.is_empty() {
            s.qualified_name.clone()
        } else {
            format!("{}{}", s.qualified_name, s.signature)
        },
        location: s.location.clone(),
        bases: s.base_classes.join(", "),
        references: s.referenced_types.join(", "),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "File")]
    path: String,
    #[tabled(rename = "Includes")]
    includes: usize,
    #[tabled(rename = "Included by")]
    included_by: usize,
}

/// Files in the order given
pub fn file_table<'r>(files: impl IntoIterator<Item = &'r FileReport>) -> String {
    let rows: Vec<FileRow> = files
        .into_iter()
        .enumerate()
        .map(|(i, f)| FileRow {
            position: i + 1,
            path: f.path.display().to_string(),
            includes: f.includes.len(),
            included_by: f.included_by.len(),
        })
        .collect();

    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}
