use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use storematch_cli::{load_registry, print_outcome, read_content, registry_path};
use storematch_core::config::{Config, LexicalProfile};
use storematch_core::traits::Embedder;
use storematch_core::types::SearchMode;
use storematch_embed::get_default_embedder;
use storematch_resolver::{ResolveRequest, Resolver, ResponseFormat};
use storematch_vector::backfill::backfill_registry;
use storematch_vector::get_default_index;

#[derive(Parser)]
#[command(name = "storematch")]
#[command(about = "Check whether a shared map place is an affiliated store")]
struct Cli {
    /// Registry JSON file (overrides registry.path)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Pasted share text; read from --file or stdin when omitted
    content: Option<String>,
    #[arg(long)]
    file: Option<PathBuf>,
    /// Response rendering: text or json
    #[arg(long = "type", default_value = "json")]
    response_type: ResponseFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzzy name/address lookup
    Check {
        #[command(flatten)]
        input: InputArgs,
        /// Lexical threshold profile: standard or lenient
        #[arg(long)]
        profile: Option<LexicalProfile>,
    },
    /// Embedding similarity lookup
    VectorCheck {
        #[command(flatten)]
        input: InputArgs,
        /// strict or wide
        #[arg(long, default_value = "strict")]
        mode: SearchMode,
    },
    /// Embed registry records that have no vector yet
    Backfill {
        /// Re-embed every record
        #[arg(long)]
        force: bool,
        /// Write here instead of overwriting the registry file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "storematch=info".into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let mut settings = config.settings()?;
    let cli = Cli::parse();
    let path = registry_path(&settings, cli.registry.as_deref())?;

    let code = match cli.command {
        Commands::Check { input, profile } => {
            if let Some(profile) = profile {
                settings.lexical.profile = profile;
                settings.lexical.name_threshold = None;
                settings.lexical.address_threshold = None;
            }
            let content = read_content(input.content, input.file.as_deref(), std::io::stdin())?;
            let resolver = Resolver::new(load_registry(&path)?, settings);
            let req = ResolveRequest::new(content).with_format(input.response_type);
            print_outcome(&resolver.handle_lexical(&req))?
        }
        Commands::VectorCheck { input, mode } => {
            let content = read_content(input.content, input.file.as_deref(), std::io::stdin())?;
            let registry = load_registry(&path)?;
            let embedder: Arc<dyn Embedder> = Arc::from(get_default_embedder(&settings.embedding)?);
            let index = get_default_index(&settings.vector, registry.clone())?;
            let resolver = Resolver::new(registry, settings).with_semantic(embedder, index);
            let req = ResolveRequest::new(content).with_format(input.response_type).with_mode(mode);
            print_outcome(&resolver.handle_semantic(&req).await)?
        }
        Commands::Backfill { force, output } => {
            let registry = load_registry(&path)?;
            let embedder = get_default_embedder(&settings.embedding)?;
            println!("Embedding backfill\n==================");
            println!("Registry: {} ({} stores, {} embedded)", path.display(), registry.len(), registry.embedded_count());
            let (filled, stats) =
                backfill_registry(&registry, embedder.as_ref(), settings.embedding.batch_size, force, true).await?;
            let out = output.unwrap_or(path);
            filled.save_json(&out)?;
            info!(path = %out.display(), "registry written");
            println!("\n✅ Backfill completed successfully!");
            println!("📊 {} embedded, {} from cache, {} already present", stats.embedded, stats.cached, stats.skipped);
            0
        }
    };
    std::process::exit(code);
}
