use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doccluster::corpus::{LoadedCorpus, load_directory, load_json};
use doccluster::{
    ClusterId, ClusterReport, ClusteringAlgorithm, DotProduct, KMeans, KMeansConfig,
    NormalizedCosine, SelectionRule, SimilarityMetric, TfIdf,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    version,
    about = "Cluster retrieved documents with k-means over TF-IDF vectors",
    long_about = None
)]
struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every text file under a directory, then cluster
    Dir {
        path: PathBuf,
        /// File extensions to index (comma separated, empty for all)
        #[arg(long, value_delimiter = ',', default_value = "txt,md")]
        ext: Vec<String>,
        #[command(flatten)]
        opts: ClusterArgs,
    },
    /// Index a JSON array of {"id": ..., "text": ...} objects, then cluster
    Json {
        file: PathBuf,
        #[command(flatten)]
        opts: ClusterArgs,
    },
}

#[derive(Args)]
struct ClusterArgs {
    /// Only cluster documents matching this query
    #[arg(short, long)]
    query: Option<String>,

    /// Maximum number of query results
    #[arg(long, default_value_t = 100)]
    limit: usize,

    /// Number of clusters (default: sqrt of the result set size)
    #[arg(short = 'k', long)]
    clusters: Option<u32>,

    /// Maximum assignment/update rounds
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// JSON file with a full k-means configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Metric::Dot)]
    metric: Metric,

    #[arg(long, value_enum)]
    selection: Option<Selection>,

    /// Run rounds on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Print the assignment as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Metric {
    /// Unnormalized inner product
    Dot,
    /// Inner product over both magnitudes
    Cosine,
}

#[derive(Clone, Copy, ValueEnum)]
enum Selection {
    Max,
    Min,
}

#[derive(Serialize)]
struct Output<'a> {
    config: &'a KMeansConfig,
    documents: usize,
    report: ClusterReport,
    clusters: Vec<ClusterOutput>,
}

#[derive(Serialize)]
struct ClusterOutput {
    id: ClusterId,
    documents: Vec<String>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(opts: &ClusterArgs, documents: usize) -> Result<KMeansConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let file = File::open(path)
                .context(format!("Failed to open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .context(format!("Failed to parse config {}", path.display()))?
        }
        None => {
            // sqrt(n) clusters, as many as there are documents at most
            let k = (documents as f64).sqrt().ceil() as u32;
            KMeansConfig {
                cluster_count: k.clamp(1, documents.max(1) as u32),
                ..KMeansConfig::default()
            }
        }
    };

    if let Some(k) = opts.clusters {
        config.cluster_count = k;
    }
    if let Some(n) = opts.iterations {
        config.max_iterations = n;
    }
    if let Some(selection) = opts.selection {
        config.selection = match selection {
            Selection::Max => SelectionRule::Maximum,
            Selection::Min => SelectionRule::Minimum,
        };
    }
    if opts.parallel {
        config.parallel = true;
    }

    Ok(config)
}

fn cluster_corpus(loaded: &LoadedCorpus, opts: &ClusterArgs) -> Result<()> {
    let start = Instant::now();

    let result_set = match &opts.query {
        Some(q) => loaded.corpus.search(q, opts.limit),
        None => loaded.corpus.all_documents(),
    };
    if result_set.is_empty() {
        bail!("No documents to cluster");
    }

    let config = load_config(opts, result_set.len())?;
    let metric: Box<dyn SimilarityMetric> = match opts.metric {
        Metric::Dot => Box::new(DotProduct),
        Metric::Cosine => Box::new(NormalizedCosine),
    };
    let builder = TfIdf::new(&loaded.corpus);

    let mut kmeans = KMeans::new(result_set, config, metric, builder)
        .context("Invalid clustering parameters")?;
    let report = kmeans.cluster().context("Clustering failed")?;
    let results = kmeans.results();
    let config = kmeans.config();

    let clusters: Vec<ClusterOutput> = results
        .clusters()
        .map(|(id, docs)| ClusterOutput {
            id,
            documents: docs.iter().map(|&d| loaded.name(d)).collect(),
        })
        .collect();

    if opts.json {
        let output = Output {
            config,
            documents: kmeans.result_set().len(),
            report,
            clusters,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize assignment")?
        );
        return Ok(());
    }

    println!(
        "✓ Clustered {} documents into {} clusters in {}/{} rounds{} [{:.2}s]\n",
        kmeans.result_set().len(),
        config.cluster_count,
        report.rounds,
        config.max_iterations,
        if report.converged { " (converged)" } else { "" },
        start.elapsed().as_secs_f64()
    );
    for cluster in &clusters {
        println!("  Cluster {}: {} documents", cluster.id, cluster.documents.len());
        for name in &cluster.documents {
            println!("    {}", name);
        }
    }

    let empty = config.cluster_count as usize - clusters.len();
    if empty > 0 {
        println!("\n  {} clusters ended up empty", empty);
    }

    Ok(())
}

fn load_json_file(path: &Path) -> Result<LoadedCorpus> {
    let file = File::open(path).context(format!("Failed to open {}", path.display()))?;
    load_json(BufReader::new(file))
        .context(format!("Failed to load corpus from {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Dir { path, ext, opts } => {
            let ext: Vec<String> = ext.into_iter().filter(|e| !e.is_empty()).collect();
            let loaded = load_directory(&path, &ext)
                .context(format!("Failed to index {}", path.display()))?;
            cluster_corpus(&loaded, &opts)
        }
        Commands::Json { file, opts } => {
            let loaded = load_json_file(&file)?;
            cluster_corpus(&loaded, &opts)
        }
    }
}
