//! CLI command implementations.

use colored::Colorize;
use easyboard_core::{SkippedEntry, Universe, ARCHIVE_FILE_NAME, JSON_FILE_NAME};
use easyboard_graph::{GraphModel, Node, Position};
use std::fs;
use std::path::Path;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// On-disk universe formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Archive,
    Json,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Archive,
        }
    }
}

/// Loads a universe file into a fresh model.
fn load(path: &Path) -> Result<(GraphModel, Vec<SkippedEntry>)> {
    let mut model = GraphModel::new();
    let report = match Format::of(path) {
        Format::Json => model.import_universe_json(&fs::read_to_string(path)?)?,
        Format::Archive => model.import_universe(&fs::read(path)?)?,
    };
    debug!("Loaded {} ({} characters)", path.display(), report.node_count);
    Ok((model, report.skipped))
}

fn save(model: &GraphModel, path: &Path) -> Result<()> {
    match Format::of(path) {
        Format::Json => fs::write(path, model.export_universe_json()?)?,
        Format::Archive => fs::write(path, model.export_universe()?)?,
    }
    Ok(())
}

fn report_skipped(skipped: &[SkippedEntry]) {
    if skipped.is_empty() {
        return;
    }
    println!("\n{} skipped entries:", "⚠".yellow());
    for entry in skipped.iter().take(5) {
        println!("  {} - {}", entry.path.red(), entry.reason);
    }
    if skipped.len() > 5 {
        println!("  ... and {} more", skipped.len() - 5);
    }
}

/// Write the sample universe.
pub fn generate(output: &Path) -> Result<()> {
    let model = GraphModel::seeded();
    save(&model, output)?;

    println!(
        "{} Generated {} ({} characters)",
        "✓".green(),
        output.display(),
        model.universe().node_count()
    );
    Ok(())
}

/// Print stats and the character list of a universe.
pub fn inspect(path: &Path, json: bool) -> Result<()> {
    let (model, skipped) = load(path)?;
    let universe = model.universe();
    let stats = universe.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Universe".cyan().bold());
    println!();
    println!("  {} {}", "Characters:".dimmed(), stats.node_count);
    println!("  {} {}", "Relations:".dimmed(), stats.edge_count);
    if stats.dangling_edges > 0 {
        println!("  {} {}", "Dangling:".dimmed(), stats.dangling_edges);
    }
    println!();

    for node in &universe.nodes {
        print_character(universe, node);
    }

    report_skipped(&skipped);
    Ok(())
}

fn print_character(universe: &Universe, node: &Node) {
    println!(
        "  {} {} {}",
        node.id().yellow(),
        node.label().cyan(),
        format!("({}, {})", node.position.x, node.position.y).dimmed()
    );
    if !node.data.short_description.is_empty() {
        println!("    {}", node.data.short_description.dimmed());
    }
    for tag in &node.data.tags {
        println!("    {} ({}): {}", tag.name, tag.kind, tag.value);
    }
    for edge in universe.outgoing(node.id()) {
        println!("    → {} {}", edge.target(), edge.label().dimmed());
    }
}

/// Search characters by name.
pub fn search(path: &Path, query: &str, limit: usize) -> Result<()> {
    let (model, _) = load(path)?;
    let matches: Vec<_> = model
        .search_characters(query)
        .into_iter()
        .take(limit)
        .collect();

    if matches.is_empty() {
        println!("No characters found for \"{}\"", query);
        return Ok(());
    }

    println!("Found {} characters:\n", matches.len());
    for character in matches {
        println!("  {} {}", character.id.yellow(), character.name.cyan());
        if !character.description.is_empty() {
            println!("    {}", character.description.dimmed());
        }
    }
    Ok(())
}

/// Move a character and write the universe back.
pub fn move_character(path: &Path, id: &str, x: f64, y: f64, output: Option<&Path>) -> Result<()> {
    let (mut model, skipped) = load(path)?;
    if !model.update_node_position(id, Position::new(x, y)) {
        return Err(format!("no character with id \"{}\"", id).into());
    }

    let target = output.unwrap_or(path);
    save(&model, target)?;
    println!(
        "{} Moved {} to ({}, {}) in {}",
        "✓".green(),
        id.cyan(),
        x,
        y,
        target.display()
    );
    report_skipped(&skipped);
    Ok(())
}

/// Convert a universe between formats.
pub fn convert(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output.unwrap_or_else(|| match Format::of(input) {
        Format::Archive => Path::new(JSON_FILE_NAME),
        Format::Json => Path::new(ARCHIVE_FILE_NAME),
    });
    let (model, skipped) = load(input)?;
    save(&model, output)?;

    println!(
        "{} Converted {} to {}",
        "✓".green(),
        input.display(),
        output.display()
    );
    report_skipped(&skipped);
    Ok(())
}
