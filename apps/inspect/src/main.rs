use std::{
	path::{Path, PathBuf},
	process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Cell, Table};
use dh_codes::CodeRegistry;
use dh_core::{BuildOutput, HierarchyConfig, HierarchyNode, RawItem, ValidationReport};
use dh_utils::read_json_file;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
	Text,
	Table,
	Json,
}

#[derive(Parser, Debug)]
#[command(name = "dh-inspect", author, version, about, long_about = None)]
struct Cli {
	/// Hierarchy config file (decoder policy, build options, validation, code tables)
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	/// Id of the item to use as root, overrides the config
	#[arg(long, global = true)]
	root: Option<String>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Build a snapshot and validate the resulting tree
	Validate {
		/// JSON array of raw items
		snapshot: PathBuf,
		#[arg(short, long, value_enum, default_value = "text")]
		format: ReportFormat,
	},
	/// Build a snapshot and print the resulting tree
	Tree {
		/// JSON array of raw items
		snapshot: PathBuf,
		/// Print the tree as JSON
		#[arg(long, default_value_t = false)]
		json: bool,
	},
	/// Decode a single item name
	Decode {
		name: String,
		/// Decode as a folder name, no extension is split
		#[arg(long, default_value_t = false)]
		folder: bool,
	},
}

fn main() -> Result<ExitCode> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();

	let mut config = match &cli.config {
		Some(path) => HierarchyConfig::load(path)?,
		None => HierarchyConfig::default(),
	};
	if let Some(root) = cli.root {
		config.build.root_id = Some(root);
	}

	let registry = CodeRegistry::install(config.registry()?)?;

	match cli.command {
		Commands::Validate { snapshot, format } => {
			let output = build(&config, registry, &snapshot)?;
			let report = config.validator().report(output.hierarchy.root());

			match format {
				ReportFormat::Text => println!("{report}"),
				ReportFormat::Table => println!("{}", report_table(&report)),
				ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
			}

			if report.has_errors() {
				return Ok(ExitCode::FAILURE);
			}
		}
		Commands::Tree { snapshot, json } => {
			let output = build(&config, registry, &snapshot)?;

			if json {
				println!("{}", serde_json::to_string_pretty(&output.hierarchy)?);
			} else {
				println!("{}", render_tree(output.hierarchy.root()));
			}

			for orphan in &output.orphans {
				eprintln!("orphan: {} ({}) [{}]", orphan.name, orphan.id, orphan.reason);
			}
		}
		Commands::Decode { name, folder } => {
			let decoder = config.decoder(registry)?;
			let decoded = if folder {
				decoder.decode_folder(&name)
			} else {
				decoder.decode(&name)
			};

			println!("{}", serde_json::to_string_pretty(&decoded)?);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn build(
	config: &HierarchyConfig,
	registry: &CodeRegistry,
	snapshot: &Path,
) -> Result<BuildOutput> {
	let items = read_json_file::<Vec<RawItem>>(snapshot)?;
	debug!(items = items.len(), "Read snapshot");

	let output = config
		.builder(registry)?
		.build(&items)
		.with_context(|| format!("failed to build hierarchy from {}", snapshot.display()))?;

	info!(
		nodes = output.hierarchy.len(),
		orphans = output.orphans.len(),
		"Hierarchy ready"
	);

	Ok(output)
}

fn report_table(report: &ValidationReport) -> Table {
	let mut table = Table::new();
	table.set_header(vec!["Type", "Code", "Node", "Message"]);

	for issue in report.issues() {
		table.add_row(vec![
			Cell::new(issue.severity),
			Cell::new(issue.code),
			Cell::new(issue.node_id.as_deref().unwrap_or("-")),
			Cell::new(&issue.message),
		]);
	}

	table
}

fn render_tree(root: &HierarchyNode) -> String {
	root.iter()
		.map(|node| {
			let indent = "  ".repeat(usize::try_from(node.depth()).unwrap_or(usize::MAX));
			let marker = if node.is_folder() { "/" } else { "" };
			let tags = node
				.content_type_tags()
				.iter()
				.map(String::as_str)
				.collect::<Vec<_>>()
				.join(", ");

			if tags.is_empty() {
				format!("{indent}{}{marker}  ({})", node.display_name(), node.id())
			} else {
				format!(
					"{indent}{}{marker}  [{tags}]  ({})",
					node.display_name(),
					node.id()
				)
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}
