use clap::{Args, Parser, Subcommand};
use pagesmith::{
    EditorSession, ImageResolver, PageDocument, PagePath, PageStore, PagesmithConfig,
    PagesmithError, page_title, process_document,
};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Resolve generated page-builder documents into validated pages.
#[derive(Parser, Debug)]
#[command(name = "pagesmith", version, about)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(long, global = true, env = "PAGESMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Page database file, overriding `store.database`
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a raw document through the snippet pipeline
    Process(ProcessArgs),
    /// Parse and validate a resolved document
    Validate {
        /// Document file, or `-` for stdin
        input: String,
    },
    /// List stored pages
    Pages,
    /// Print one stored page
    Show {
        /// Page path, e.g. `/about`
        path: String,
    },
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Raw document file, or `-` for stdin
    input: String,

    /// Stored page that copy/spread placeholders read from
    #[arg(long, conflicts_with = "source")]
    source_page: Option<String>,

    /// JSON file that copy/spread placeholders read from
    #[arg(long)]
    source: Option<PathBuf>,

    /// Resolve placeholder image URLs after processing (needs an access key)
    #[arg(long)]
    resolve_images: bool,

    /// Store the result under this page path
    #[arg(long)]
    save: Option<String>,

    /// Print the pipeline output without validating it
    #[arg(long, conflicts_with_all = ["save", "resolve_images"])]
    no_validate: bool,
}

#[tokio::main]
async fn main() -> Result<(), PagesmithError> {
    env_logger::init();

    let cli = Cli::parse();
    let mut loader = PagesmithConfig::loader(cli.config.as_deref());
    if let Some(database) = &cli.database {
        loader = loader.set_override("store.database", database.display().to_string())?;
    }
    let config = loader.build()?;

    match cli.command {
        Command::Process(args) => process(&config, args).await,
        Command::Validate { input } => validate(&input),
        Command::Pages => pages(&config),
        Command::Show { path } => show(&config, &path),
    }
}

async fn process(config: &PagesmithConfig, args: ProcessArgs) -> Result<(), PagesmithError> {
    let raw = read_input(&args.input)?;
    let store = config.open_store();

    // Saving without an explicit source edits the stored page in place.
    if let Some(save) = &args.save
        && args.source.is_none()
        && args.source_page.is_none()
    {
        let mut session = EditorSession::load(&store, parse_page_path(save)?)?;
        let images = if args.resolve_images {
            config.image_resolver()?
        } else {
            ImageResolver::disabled()
        };
        let resolved = session.apply_generated(&raw, &images).await?;
        log::info!("Resolved {} placeholder images", resolved.len());
        session.publish(&store)?;
        println!("{}", session.document().to_json_pretty()?);
        return Ok(());
    }

    let source = load_source(&store, &args)?;
    let output = process_document(&raw, source.as_ref());

    // Image resolution and saving both need a parsed document.
    let validate = config.pipeline.validate && !args.no_validate;
    if !validate && !args.resolve_images && args.save.is_none() {
        println!("{}", output);
        return Ok(());
    }

    let mut document = PageDocument::from_json(&output)?;
    if args.resolve_images {
        let resolution = config.image_resolver()?.resolve(&document.to_json_pretty()?).await;
        log::info!("Resolved {} placeholder images", resolution.resolved_count());
        document = PageDocument::from_json(&resolution.document)?;
    }
    if let Some(save) = &args.save {
        store.put(&parse_page_path(save)?, document.clone())?;
    }
    println!("{}", document.to_json_pretty()?);
    Ok(())
}

fn validate(input: &str) -> Result<(), PagesmithError> {
    let document = PageDocument::from_json(&read_input(input)?)?;
    println!(
        "valid: {} top-level nodes, {} zones, {} nodes total",
        document.content.len(),
        document.zones.len(),
        document.node_count()
    );
    Ok(())
}

fn pages(config: &PagesmithConfig) -> Result<(), PagesmithError> {
    let store = config.open_store();
    for path in store.paths()? {
        let title = match store.get(&path) {
            Ok(Some(page)) => page
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| page_title(&path)),
            Ok(None) => page_title(&path),
            Err(e) => {
                log::warn!("Could not read page '{}': {}", path, e);
                page_title(&path)
            }
        };
        println!("{}\t{}", path, title);
    }
    Ok(())
}

fn show(config: &PagesmithConfig, path: &str) -> Result<(), PagesmithError> {
    let page = config.open_store().require(&parse_page_path(path)?)?;
    println!("{}", page.to_json_pretty()?);
    Ok(())
}

fn load_source(store: &dyn PageStore, args: &ProcessArgs) -> Result<Option<Value>, PagesmithError> {
    if let Some(page) = &args.source_page {
        let document = store.require(&parse_page_path(page)?)?;
        return Ok(Some(document.to_value()?));
    }
    if let Some(file) = &args.source {
        let text = std::fs::read_to_string(file)?;
        return Ok(Some(serde_json::from_str(&text)?));
    }
    Ok(None)
}

fn read_input(input: &str) -> Result<String, PagesmithError> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    let path = Path::new(input);
    if !path.exists() {
        return Err(PagesmithError::InvalidInput(format!(
            "input file '{}' does not exist",
            input
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn parse_page_path(path: &str) -> Result<PagePath, PagesmithError> {
    Ok(PagePath::new(path)?)
}
