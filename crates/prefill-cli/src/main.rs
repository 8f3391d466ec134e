use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prefill_core::{form_fields, Config, FormNode};
use prefill_engine::selector::in_display_order;
use prefill_engine::{filter_elements, PrefillSession, ResolutionEngine, ResolutionResult, Selector};
use prefill_graph::{DependencyContext, FormGraph};
use prefill_source::{load_graph, FileGraphSource, GraphSource, HttpGraphSource, LoadedGraph};

const DEFAULT_CONFIG_FILE: &str = "prefill.toml";

/// Prefill - browse and map data sources for blueprint forms
#[derive(Parser)]
#[command(name = "prefill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: prefill.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load the graph from a local file instead of the endpoint
    #[arg(short, long, global = true)]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List forms in the blueprint
    Forms,

    /// Show direct and transitive dependencies of a form
    Deps {
        /// Form id or display name
        form: String,
    },

    /// Show the data sources available to a form
    Sources {
        /// Form id or display name
        form: String,

        /// Only show sources whose label contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Only show this category
        #[arg(short, long)]
        expand: Option<String>,

        /// Print the full resolution result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Map form fields to sources and show the resulting prefill
    Map {
        /// Form id or display name
        form: String,

        /// FIELD=QUERY: map FIELD to the first source whose label contains QUERY
        #[arg(short, long = "set", value_name = "FIELD=QUERY", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Clear a field's mapping (applied after --set)
        #[arg(long, value_name = "FIELD")]
        clear: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    // Load config if specified
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG_FILE))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };
    config.apply_env_overrides();

    let loaded = load(&config, cli.graph.as_deref(), cli.verbose).await?;

    match cli.command {
        Commands::Forms => forms_command(&loaded.graph),
        Commands::Deps { form } => deps_command(&loaded.graph, &form),
        Commands::Sources { form, filter, expand, json } => {
            sources_command(&loaded.graph, &form, filter.as_deref(), expand.as_deref(), json)
        }
        Commands::Map { form, set, clear } => map_command(&loaded.graph, &form, &set, &clear),
    }
}

/// Load the blueprint graph from a file or the configured endpoint
async fn load(config: &Config, graph: Option<&Path>, verbose: bool) -> Result<LoadedGraph> {
    let source: Box<dyn GraphSource> = match graph {
        Some(path) => Box::new(FileGraphSource::new(path)),
        None => Box::new(HttpGraphSource::new(&config.endpoint)?),
    };

    if verbose {
        eprintln!("{} {} {}", "Loading graph from".cyan(), source.name(), source.location());
    }

    tracing::debug!(source = source.name(), location = %source.location(), "selected graph source");

    let loaded = load_graph(source.as_ref())
        .await
        .context("Failed to load blueprint graph")?;

    if verbose {
        eprintln!("{} {} forms", "Loaded".green(), loaded.graph.len());
    }

    Ok(loaded)
}

/// Find a form by id, then by display name
fn find_form<'a>(graph: &'a FormGraph, name: &str) -> Result<&'a FormNode> {
    if let Some(form) = graph.find_node(name) {
        return Ok(form);
    }

    if let Some(form) = graph.forms().iter().find(|form| form.display_name() == name) {
        return Ok(form);
    }

    let available: Vec<&str> = graph.forms().iter().map(|form| form.display_name()).collect();
    Err(anyhow::anyhow!(
        "Form '{}' not found. Available forms: {}",
        name,
        available.join(", ")
    ))
}

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", title.bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();
}

/// Forms command - list every form
fn forms_command(graph: &FormGraph) -> Result<()> {
    print_header("Blueprint Forms");

    if graph.is_empty() {
        println!("{}", "No forms in this blueprint".yellow());
        return Ok(());
    }

    for (i, form) in graph.forms().iter().enumerate() {
        let prerequisites = graph.direct_dependencies_of(form).len();
        println!(
            "  {}. {} {}",
            i + 1,
            form.display_name().green(),
            format!("({}, {} prerequisites)", form.id, prerequisites).dimmed()
        );
    }
    println!();

    Ok(())
}

/// Deps command - show what a form depends on
fn deps_command(graph: &FormGraph, form: &str) -> Result<()> {
    let form = find_form(graph, form)?;
    let context = DependencyContext::for_node(graph, form);

    print_header("Form Dependencies");
    println!("{} {}", "Form:".bold(), form.display_name().green());
    println!();

    print_dependency_list("Direct dependencies:", &context.direct_dependencies);
    print_dependency_list("Transitive dependencies:", &context.transitive_dependencies);

    if context.direct_dependencies.is_empty() {
        println!("{}", "✓ No prerequisites; only global sources can prefill this form".green());
        println!();
    }

    Ok(())
}

fn print_dependency_list(title: &str, forms: &[&FormNode]) {
    println!("{} {}", title.bold(), forms.len());
    for (i, form) in forms.iter().enumerate() {
        println!("  {}. {} {}", i + 1, form.display_name().yellow(), format!("({})", form.id).dimmed());
    }
    println!();
}

/// Sources command - resolve and browse data sources
fn sources_command(
    graph: &FormGraph,
    form: &str,
    filter: Option<&str>,
    expand: Option<&str>,
    json: bool,
) -> Result<()> {
    let form = find_form(graph, form)?;
    let result = ResolutionEngine::default().resolve_for_form(graph, &form.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut selector = Selector::new(result.elements);
    if let Some(query) = filter {
        selector.set_query(query);
    }

    print_header("Available Data Sources");
    println!("{} {}", "Form:".bold(), form.display_name().green());
    if !selector.query().is_empty() {
        println!("{} {}", "Filter:".bold(), selector.query());
    }
    println!();

    if let Some(category) = expand {
        selector.toggle_category(category);
        let elements = selector.expanded_elements();
        print_category(category, &elements);
        if elements.is_empty() {
            println!("{}", "No matching sources in this category".yellow());
        }
        return Ok(());
    }

    let groups = selector.groups();
    if groups.is_empty() {
        println!("{}", "No data sources match".yellow());
        return Ok(());
    }

    for (category, elements) in in_display_order(&groups) {
        print_category(category, elements);
    }

    Ok(())
}

fn print_category(category: &str, elements: &[&prefill_core::DataElement]) {
    let title = if category.is_empty() { "Other" } else { category };
    println!("{} ({})", title.bold().cyan(), elements.len());
    for element in elements {
        println!("  • {}", element.label);
    }
    println!();
}

/// Map command - assign sources to fields and print the prefill table
fn map_command(graph: &FormGraph, form: &str, set: &[(String, String)], clear: &[String]) -> Result<()> {
    let form = find_form(graph, form)?;
    let result = ResolutionEngine::default().resolve_for_form(graph, &form.id)?;

    let mut session = PrefillSession::new();
    for (field, query) in set {
        check_field(form, field)?;
        let element = first_match(&result, query)
            .ok_or_else(|| anyhow::anyhow!("No data source matches '{}' for field '{}'", query, field))?;
        tracing::debug!(form = %form.id, field = %field, query = %query, source = %element.label, "mapped field");
        session.select(&form.id, field, element);
    }
    for field in clear {
        check_field(form, field)?;
        session.clear(&form.id, field);
    }

    print_header("Prefill");
    println!("{} {}", "Form:".bold(), form.display_name().green());
    println!(
        "{} {}/{}",
        "Mapped fields:".bold(),
        session.mapped_count(&form.id),
        form_fields(form).len()
    );
    println!();

    for (field, mapping) in session.field_mappings(form) {
        match mapping {
            Some(value) => println!("  {:<24} {}", field, PrefillSession::describe(value).green()),
            None => println!("  {:<24} {}", field, "not prefilled".dimmed()),
        }
    }
    println!();

    Ok(())
}

fn check_field(form: &FormNode, field: &str) -> Result<()> {
    if form_fields(form).contains(&field) {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Unknown field '{}'. Fields: {}",
            field,
            form_fields(form).join(", ")
        ))
    }
}

fn first_match<'a>(result: &'a ResolutionResult, query: &str) -> Option<&'a prefill_core::DataElement> {
    filter_elements(&result.elements, query).into_iter().next()
}

/// Parse a FIELD=QUERY assignment
fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, query)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), query.trim().to_string()))
        }
        _ => Err(format!("expected FIELD=QUERY, got '{}'", s)),
    }
}
