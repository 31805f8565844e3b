//! Command-line browser for the prompt catalog.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prompt_catalog::adapters::CompletionClient;
use prompt_catalog::config::{API_KEY_ENV_VARS, ConfigLoader};
use prompt_catalog::kernel::{CatalogSession, DisplayedResult, NoticeKind, Notices};
use prompt_catalog::primitives::{Category, PromptRecord};
use prompt_catalog::prompts::{Catalog, FilterCriteria, placeholders_of};
use prompt_catalog::telemetry::init_tracing;
use tracing::debug;

#[derive(Parser)]
#[command(name = "catalog-browser")]
#[command(about = "Browse the prompt catalog and try prompts against Gemini")]
#[command(version)]
struct Cli {
    /// JSON settings file
    #[arg(long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records matching the search and category
    List {
        /// Text searched in titles, descriptions, and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category key or label (default: all)
        #[arg(short, long, default_value = "all")]
        category: Category,
    },

    /// Print one record with its placeholders
    Show {
        /// Record identifier
        id: String,
    },

    /// Send a record to the model and print the answer
    Run {
        /// Record identifier
        id: String,
        /// Replacement draft (default: the record's template)
        #[arg(short, long)]
        text: Option<String>,
        /// Model identifier (default: the configured model)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the selectable categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn")?;
    let cli = Cli::parse();
    let catalog = Catalog::builtin()?;

    match cli.command {
        Commands::List { search, category } => {
            list(&catalog, search, category);
            Ok(())
        }
        Commands::Show { id } => show(&catalog, &id),
        Commands::Categories => {
            for category in catalog.categories() {
                println!("{:<16} {}", category.key(), category.label());
            }
            Ok(())
        }
        Commands::Run { id, text, model } => run(catalog, cli.config, &id, text, model).await,
    }
}

fn list(catalog: &Catalog, search: String, category: Category) {
    let criteria = FilterCriteria::new(search, category);
    let visible = catalog.filter(&criteria);

    for record in &visible {
        print_summary(record);
    }
    println!("\n{} de {} prompts", visible.len(), catalog.len());
}

fn print_summary(record: &PromptRecord) {
    let badge = if record.is_new() { " [NOVO]" } else { "" };
    println!(
        "{:>4}  {:<20} {:<13} {}{badge}",
        record.id(),
        record.category().label(),
        record.complexity().label(),
        record.title(),
    );
}

fn show(catalog: &Catalog, id: &str) -> Result<()> {
    let record = catalog
        .get(id)
        .with_context(|| format!("no prompt with id `{id}`"))?;

    print_summary(record);
    println!("\n{}\n", record.description());
    println!("Tags: {}", record.tags().join(", "));
    println!("\n{}\n", record.content());

    let slots = placeholders_of(record);
    if !slots.is_empty() {
        println!("Campos a preencher: {}", slots.join(", "));
    }
    Ok(())
}

async fn run(
    catalog: Catalog,
    config: Option<PathBuf>,
    id: &str,
    text: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config {
        loader = loader.with_file(path);
    }
    let mut settings = loader.load()?;
    if let Some(model) = model {
        settings = settings.with_default_model(model);
    }
    debug!(?settings, "settings loaded");

    let mut session = CatalogSession::new(catalog, CompletionClient::gemini(settings));
    if !session.is_credential_configured() {
        println!(
            "Nenhuma chave de API configurada. Defina uma destas variáveis: {}",
            API_KEY_ENV_VARS.join(", ")
        );
        return Ok(());
    }

    let mut playground = session
        .open_playground(id)
        .with_context(|| format!("no prompt with id `{id}`"))?;
    if let Some(text) = text {
        playground.set_draft(text);
    }
    let pending = playground.unfilled_placeholders();
    if !pending.is_empty() {
        eprintln!("Campos ainda não preenchidos: {}", pending.join(", "));
    }

    if session.generate(&playground).await?.is_none() {
        println!("Rascunho vazio; nada foi enviado.");
        return Ok(());
    }
    let text = displayed_text(session.result(), session.notices())?;
    println!("{text}");
    Ok(())
}

/// Text of a successful result, or the error notice for a failed one.
fn displayed_text<'a>(result: Option<&'a DisplayedResult>, notices: &Notices) -> Result<&'a str> {
    match result.map(|shown| &shown.outcome) {
        Some(Ok(text)) => Ok(text.as_str()),
        Some(Err(err)) => {
            let message = notices
                .items()
                .iter()
                .rev()
                .find(|notice| notice.kind == NoticeKind::Error)
                .map_or_else(|| err.to_string(), |notice| notice.message.clone());
            bail!(message)
        }
        None => bail!("no completion result to display"),
    }
}
