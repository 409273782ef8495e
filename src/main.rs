use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use tag_recommender::{RecommendError, RecommendationIndex, RecommenderConfig};

/// Content-based recommendations over a catalog of items.
///
/// Reads the catalog (a JSON array of items with id, title, overview,
/// genres, keywords, cast and crew), builds the index once, then answers
/// queries. Without a TITLE an interactive prompt is started.
#[derive(Debug, Parser)]
#[command(name = "tag-recommender", version, about)]
struct Cli {
    /// Catalog JSON file
    #[arg(long, env = "TAG_RECOMMENDER_CATALOG", required_unless_present = "load")]
    catalog: Option<PathBuf>,

    /// Config JSON file (defaults apply for missing keys)
    #[arg(long, env = "TAG_RECOMMENDER_CONFIG")]
    config: Option<PathBuf>,

    /// Number of recommendations (defaults to the configured count)
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Write the built index to this snapshot file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Load a snapshot instead of building from a catalog
    #[arg(long, conflicts_with = "catalog")]
    load: Option<PathBuf>,

    /// Print scores next to titles
    #[arg(long)]
    scores: bool,

    /// Title to query; omit for interactive mode
    title: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let program_start = Instant::now();
    let config = match &cli.config {
        Some(path) => RecommenderConfig::from_path(path)?,
        None => RecommenderConfig::default(),
    };

    let index = match (&cli.load, &cli.catalog) {
        (Some(snapshot), _) => {
            if cli.config.is_some() {
                tracing::warn!("build settings in --config do not apply to a loaded snapshot; only default_top_n is used");
            }
            RecommendationIndex::load(snapshot)?
        }
        (None, Some(catalog)) => {
            let text = fs::read_to_string(catalog)?;
            // records are decoded one by one so a bad record only excludes itself
            let records: Vec<serde_json::Value> = serde_json::from_str(&text)?;
            tracing::info!(path = %catalog.display(), items = records.len(), "catalog read");
            RecommendationIndex::initialize_from_values(&records, &config)?
        }
        (None, None) => return Err("either --catalog or --load is required".into()),
    };
    if let Some(path) = &cli.save {
        index.save(path)?;
    }
    tracing::info!(elapsed_ms = program_start.elapsed().as_secs_f64() * 1000.0, "ready");

    let top = result_count(cli.top, cli.config.as_ref().map(|_| &config), &index);
    match cli.title {
        Some(title) => Ok(if query(&index, &title, top, cli.scores) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }),
        None => {
            run_interactive(&index, top, cli.scores)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `--top`, then an explicit `--config`, then the count stored in the index.
fn result_count(top: Option<usize>, config: Option<&RecommenderConfig>, index: &RecommendationIndex) -> usize {
    top.or(config.map(|c| c.default_top_n)).unwrap_or(index.default_top_n())
}

/// Print recommendations for one title. Returns false when the title is unknown.
fn query(index: &RecommendationIndex, title: &str, top: usize, scores: bool) -> bool {
    match index.recommend_scored(title, top) {
        Ok(hits) => {
            if scores {
                print!("{hits}");
            } else {
                for hit in &hits.list {
                    println!("{}", hit.title);
                }
            }
            true
        }
        Err(e @ RecommendError::NotFound(_)) => {
            tracing::debug!(code = e.code(), "{e}");
            println!("not found");
            false
        }
    }
}

fn run_interactive(index: &RecommendationIndex, top: usize, scores: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Title> ");
        stdout.flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let title = line.trim();
        if title.is_empty() || title.eq_ignore_ascii_case("exit") || title.eq_ignore_ascii_case("quit") {
            break;
        }
        query(index, title, top, scores);
    }
    tracing::info!("bye");
    Ok(())
}
