use clap::{Args, Parser, Subcommand};
use pln_rag_core::{
    index_csv, index_pdf, HashedFeatureEmbedder, IndexReport, PipelineOptions, QueryMatch,
    VectorStore,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pln-rag", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print matches as a JSON array instead of the console layout.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Args)]
struct RunOptions {
    /// Query text to search for after indexing.
    #[arg(long)]
    query: String,

    /// Number of nearest matches to return.
    #[arg(long, default_value = "3")]
    top_k: usize,

    /// Maximum chunk size in characters.
    #[arg(long, default_value = "100")]
    chunk_size: usize,

    /// Characters of overlap between consecutive chunks.
    #[arg(long, default_value = "30")]
    overlap: usize,

    /// Name of the collection to create.
    #[arg(long, default_value = "documentos")]
    collection: String,
}

impl RunOptions {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            chunk_max_chars: self.chunk_size,
            chunk_overlap_chars: self.overlap,
            collection: self.collection.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Combine CSV columns into row lines, index them, and run a query.
    Csv {
        /// CSV file with a header row.
        #[arg(long)]
        path: PathBuf,

        /// Columns to combine, in order. Repeat the flag per column.
        #[arg(long, required = true)]
        columns: Vec<String>,

        #[command(flatten)]
        options: RunOptions,
    },
    /// Extract a PDF's text, index it, and run a query.
    Pdf {
        /// Text-extractable PDF file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "pln-rag boot");

    let mut store = VectorStore::new(HashedFeatureEmbedder::default());

    let (report, run): (IndexReport, &RunOptions) = match &cli.command {
        Command::Csv {
            path,
            columns,
            options,
        } => {
            let report = index_csv(&mut store, &options.pipeline_options(), path, columns)?;
            (report, options)
        }
        Command::Pdf { path, options } => {
            let report = index_pdf(&mut store, &options.pipeline_options(), path)?;
            (report, options)
        }
    };

    if let Some(fingerprint) = &report.fingerprint {
        info!(
            source = %fingerprint.source_path,
            checksum = %fingerprint.checksum,
            ingested_at = %fingerprint.ingested_at.to_rfc3339(),
            chunk_count = report.chunk_ids.len(),
            "source indexed"
        );
    }

    let matches = store.query(report.handle, &run.query, run.top_k)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_matches(&matches);
    }

    Ok(())
}

/// Query-result console layout: one block per match, nearest first.
fn print_matches(matches: &[QueryMatch]) {
    for item in matches {
        println!("ID: {}", item.id);
        println!("Documento: {}", item.text);
        println!("Distância: {:.4}", item.distance);
        println!("{}", "-".repeat(40));
    }
}
