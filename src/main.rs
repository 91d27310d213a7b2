//! Codex CLI - whole-project semantic indexer for C++ declaration trees

use clap::{Args, Parser, Subcommand, ValueEnum};
use codex::config::{self, AnalyzerConfig};
use codex::report::{AnalysisReport, SymbolReport};
use codex::tree::load_forest_glob;
use codex::ui::{self, Icons};
use codex::{Analyzer, SymbolKind};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "codex")]
#[command(version)]
#[command(about = "Whole-project semantic indexer - include graph, symbol table, cross-references")]
#[command(long_about = r#"
Codex links a forest of parsed C++ declaration trees (JSON dumps) into one
symbol table:
  • Include graph with a cycle-tolerant indexing order
  • Fully qualified symbols with parent/child links
  • Base classes and type references resolved across files

Example usage:
  codex analyze 'dump/**/*.json'
  codex lookup 'dump/*.json' --name app::Widget
  codex order 'dump/*.json' --affected include/base.hpp
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./codex.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Tree dumps to load (glob patterns)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a forest and print statistics
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Also list every symbol
        #[arg(short, long)]
        symbols: bool,

        /// Only list symbols of this kind (implies --symbols)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Look up symbols by qualified or simple name
    Lookup {
        #[command(flatten)]
        input: InputArgs,

        /// Qualified (`ns::Foo`) or simple (`Foo`) name
        #[arg(short, long)]
        name: String,

        /// Also list transitively derived classes up to this depth
        #[arg(long, default_value = "0")]
        derived: usize,
    },

    /// Print the include graph's indexing order
    Order {
        #[command(flatten)]
        input: InputArgs,

        /// Only list the files that include this one, directly or transitively
        #[arg(short, long)]
        affected: Option<String>,
    },

    /// Write a default config file
    Init {
        /// Where to write it
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let analyzer_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let analyzer = Analyzer::new(analyzer_config);

    match cli.command {
        Commands::Analyze { input, symbols, kind } => {
            let kind = kind.map(|k| k.parse::<SymbolKind>()).transpose()?;
            let forest = load_forest_glob(&input.inputs)?;

            let start = Instant::now();
            let result = analyzer.analyze(&forest);
            let elapsed = start.elapsed();

            let mut report = AnalysisReport::new(&result, symbols || kind.is_some());
            if let Some(kind) = kind {
                report.symbols.retain(|s| s.kind == kind);
            }

            if input.format == Format::Json {
                println!("{}", report.to_json()?);
                return Ok(());
            }

            ui::header(&format!("Analyzed {} files", report.files.len()));
            let symbols_total = report.table.total_symbols.to_string();
            let forward = report.table.forward_declarations.to_string();
            let includes = result.dependency_graph.edge_count().to_string();
            let inherits = report.table.inheritance_edges.to_string();
            let references = report.table.reference_edges.to_string();
            let unresolved = report.link.total_unresolved().to_string();
            println!(
                "{}",
                ui::stats_table(&[
                    ("Symbols", symbols_total.as_str()),
                    ("Forward declarations", forward.as_str()),
                    ("Include edges", includes.as_str()),
                    ("Inheritance edges", inherits.as_str()),
                    ("Type references", references.as_str()),
                    ("Unresolved names", unresolved.as_str()),
                ])
            );

            ui::section("Symbols by kind");
            for (kind, count) in &report.table.by_kind {
                ui::summary_row(&format!("{:<20}", kind.as_str()), &count.to_string());
            }

            ui::section("Linking");
            print!("{}", report.link);
            ui::section("Indexing");
            print!("{}", report.index);

            if !report.symbols.is_empty() {
                ui::section("Symbols");
                println!("{}", ui::symbol_table(&report.symbols));
            }

            ui::timing(&format!("{:.2?}", elapsed));
        }

        Commands::Lookup { input, name, derived } => {
            let forest = load_forest_glob(&input.inputs)?;
            let result = analyzer.analyze(&forest);
            let table = &result.symbol_table;

            let mut matches = table.find_all_by_qualified_name(&name);
            if matches.is_empty() {
                matches = table.find_by_name(&name);
            }

            let mut reports: Vec<SymbolReport> = matches.iter().map(|s| SymbolReport::new(s, table)).collect();
            let derived_reports: Vec<SymbolReport> = if derived > 0 {
                matches
                    .iter()
                    .flat_map(|s| table.derived_closure(s.id, derived))
                    .map(|s| SymbolReport::new(s, table))
                    .collect()
            } else {
                Vec::new()
            };

            if input.format == Format::Json {
                reports.extend(derived_reports);
                println!("{}", serde_json::to_string_pretty(&reports)?);
                return Ok(());
            }

            if reports.is_empty() {
                ui::warn(&format!("No symbol named '{}'", name));
                return Ok(());
            }

            println!("{} Found {} symbol(s) for '{}'", Icons::SEARCH, reports.len(), name);
            for report in &reports {
                print_symbol(report);
            }

            if !derived_reports.is_empty() {
                ui::section(&format!("Derived classes (depth {})", derived));
                println!("{}", ui::symbol_table(&derived_reports));
            }
        }

        Commands::Order { input, affected } => {
            let forest = load_forest_glob(&input.inputs)?;
            let result = analyzer.analyze(&forest);
            let report = AnalysisReport::new(&result, false);
            let graph = &result.dependency_graph;

            let indices = match &affected {
                Some(path) => {
                    let Some(idx) = graph.find_file(path) else {
                        ui::error(&format!("No file registered as '{}'", path));
                        return Ok(());
                    };
                    graph.affected_files(idx)
                }
                None => result.order.clone(),
            };

            if input.format == Format::Json {
                let paths: Vec<&PathBuf> = indices.iter().map(|&i| &report.files[i].path).collect();
                println!("{}", serde_json::to_string_pretty(&paths)?);
                return Ok(());
            }

            match &affected {
                Some(path) => ui::status(Icons::LINK, "Files affected by", path),
                None => ui::status(Icons::PACKAGE, "Indexing order", &format!("{} files", indices.len())),
            }
            println!("{}", ui::file_table(indices.iter().map(|&i| &report.files[i])));
        }

        Commands::Init { path, force } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &AnalyzerConfig::default(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn print_symbol(symbol: &SymbolReport) {
    let theme = ui::theme();
    println!();
    println!(
        "{} {} {}{}",
        Icons::FILE,
        symbol.kind.as_str().style(theme.kind),
        symbol.qualified_name.style(theme.header),
        symbol.signature
    );
    ui::summary_row("id:", &symbol.id.to_string());
    ui::summary_row("at:", &symbol.location);
    if symbol.is_forward_declaration {
        ui::summary_row("forward:", "yes");
    }
    if let Some(parent) = &symbol.parent {
        ui::summary_row("parent:", parent);
    }

    let relations = [
        ("bases:", &symbol.base_classes),
        ("derived:", &symbol.derived_classes),
        ("references:", &symbol.referenced_types),
        ("referenced by:", &symbol.referenced_by),
    ];
    for (label, names) in relations {
        if !names.is_empty() {
            ui::summary_row(label, &names.join(", "));
        }
    }
}
