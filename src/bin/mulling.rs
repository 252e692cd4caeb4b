//! CLI binary for the MulLing dashboard.

use clap::{Parser, Subcommand};
use mulling::render::{self, RenderOptions};
use mulling::{Dashboard, DashboardConfig, SearchForm};
use mulling_search::panel::PanelState;
use mulling_search::{Language, Model, MullingApi, MullingClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// MulLing: search a multilingual news corpus from the terminal.
#[derive(Parser)]
#[command(name = "mulling", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search the corpus.
    Search {
        /// Query text.
        query: String,
        /// Retrieval model id (see `mulling models`).
        #[arg(long)]
        model: Option<Model>,
        /// Input language: en, zh, ms, ta, or null (multilingual only).
        #[arg(long)]
        lang: Option<Language>,
        /// Number of results.
        #[arg(short)]
        k: Option<u32>,
        /// Search across every corpus.
        #[arg(long)]
        multi: bool,
        /// Search only the input language's corpus, overriding the config.
        #[arg(long, conflicts_with = "multi")]
        mono: bool,
        /// Disable cross-language normalisation (multilingual only).
        #[arg(long, conflicts_with = "mono")]
        no_normalize: bool,
        /// Output languages for multilingual search, comma separated.
        #[arg(long, value_delimiter = ',', conflicts_with = "mono")]
        output: Option<Vec<Language>>,
        /// Group results by cluster.
        #[arg(long, conflicts_with = "flat")]
        clustered: bool,
        /// Show the flat ranked list.
        #[arg(long)]
        flat: bool,
        /// Print full articles instead of previews.
        #[arg(long)]
        full: bool,
        /// Print shaped results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how the service tokenizes a document.
    Tokenize {
        /// Document text.
        doc: String,
        /// Document language.
        #[arg(long, default_value = "en")]
        lang: Language,
        /// Drop stopwords from the output.
        #[arg(long)]
        exclude_stopwords: bool,
    },

    /// Word mover's distance between two documents.
    Wmd {
        /// First document.
        doc1: String,
        /// Second document.
        doc2: String,
        /// Language of the first document.
        #[arg(long, default_value = "en")]
        lang1: Language,
        /// Language of the second document.
        #[arg(long, default_value = "en")]
        lang2: Language,
        /// Also print the token flow matrix.
        #[arg(long)]
        matrix: bool,
    },

    /// Download fastText word vectors for a language.
    Fasttext {
        /// fastText language code.
        #[arg(long, default_value = "en")]
        lang: String,
        /// Where to save the vectors.
        #[arg(long, default_value = "new_wordvecs.txt")]
        out: PathBuf,
    },

    /// List retrieval models.
    Models,

    /// Write the current configuration to the config file.
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays clean for results.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mulling=info,mulling_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Search {
            query,
            model,
            lang,
            k,
            multi,
            mono,
            no_normalize,
            output,
            clustered,
            flat,
            full,
            json,
        } => {
            let mut form = SearchForm::from_defaults(&config.search);
            if multi {
                form.set_multilingual(true);
            } else if mono {
                form.set_multilingual(false);
            }
            if no_normalize {
                if !form.multilingual() {
                    anyhow::bail!("--no-normalize only applies to multilingual search");
                }
                form.set_normalize(false);
            }
            if let Some(model) = model {
                form.select_model(model);
            }
            if let Some(lang) = lang {
                form.choose_language(lang)?;
            }
            if let Some(k) = k {
                form.set_k(k);
            }
            if let Some(output) = output {
                form.choose_output_languages(output)?;
            }
            if clustered {
                form.set_clustering(true);
            } else if flat {
                form.set_clustering(false);
            }
            run_search(&config, form, &query, RenderOptions { expanded: full }, json).await
        }
        Command::Tokenize {
            doc,
            lang,
            exclude_stopwords,
        } => {
            let client = MullingClient::new(&config.client_config())?;
            let tokens = client.tokenize(&doc, lang, !exclude_stopwords).await?;
            print!("{}", render::render_tokens(&tokens));
            Ok(())
        }
        Command::Wmd {
            doc1,
            doc2,
            lang1,
            lang2,
            matrix,
        } => {
            let client = MullingClient::new(&config.client_config())?;
            let response = client.wmd(&doc1, &doc2, lang1, lang2).await?;
            print!("{}", render::render_wmd(&response.heatmap()?, matrix));
            Ok(())
        }
        Command::Fasttext { lang, out } => {
            let client = MullingClient::new(&config.client_config())?;
            println!("Download started");
            let written = client.fasttext(&lang, &out).await?;
            tracing::info!(path = %out.display(), bytes = written, "fastText vectors saved");
            println!("Saved {written} bytes to {}", out.display());
            Ok(())
        }
        Command::Models => {
            print!("{}", render::render_models());
            Ok(())
        }
        Command::InitConfig => {
            let path = cli
                .config
                .unwrap_or_else(DashboardConfig::default_config_path);
            config.save_to_file(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

async fn run_search(
    config: &DashboardConfig,
    form: SearchForm,
    query: &str,
    options: RenderOptions,
    json: bool,
) -> anyhow::Result<()> {
    let client = MullingClient::new(&config.client_config())?;
    let dashboard = Dashboard::new(client, form);

    eprintln!("Loading...");
    dashboard.search(query).await;

    let skipped = dashboard.skipped_rows();
    if skipped > 0 {
        tracing::warn!(skipped, "some result rows were malformed and not shown");
    }

    match dashboard.state() {
        PanelState::Results(results) if json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(())
        }
        PanelState::Failed(err) => {
            print!("{}", render::render_error(&err));
            Err(anyhow::anyhow!("search failed: {}", err.title))
        }
        _ => {
            print!("{}", dashboard.render(options));
            Ok(())
        }
    }
}
