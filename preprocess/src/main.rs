use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use featurize_core::corpus::DEFAULT_EXTENSION;
use featurize_core::topics::DEFAULT_TOP_TOPICS;
use featurize_core::vocabulary::DEFAULT_MIN_DOCUMENT_COUNT;
use featurize_core::{
    ArticleSource, CorpusScanner, InMemoryCorpus, OutputPaths, Pipeline, PipelineConfig,
    Stoplist, TextNormalizer,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "preprocess")]
#[command(about = "Turn an SGML news corpus into sparse term-frequency feature files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature, class and label files
    Build(BuildArgs),
    /// Print topic counts for single-topic articles, most frequent first
    Topics(CorpusArgs),
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory searched recursively for corpus files
    #[arg(long, default_value = "./reuters21578")]
    corpus: PathBuf,
    /// Extension of corpus files
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,
    /// Number of most frequent topics to select
    #[arg(long, default_value_t = DEFAULT_TOP_TOPICS)]
    top_topics: usize,
    /// Log and skip files with malformed records instead of aborting
    #[arg(long, default_value_t = false)]
    skip_malformed: bool,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    corpus: CorpusArgs,
    /// Whitespace-separated stopword list
    #[arg(long, default_value = "./reuters21578/stoplist.txt")]
    stoplist: PathBuf,
    /// Output directory
    #[arg(long, default_value = ".")]
    output: PathBuf,
    /// Minimum number of articles a token must appear in
    #[arg(long, default_value_t = DEFAULT_MIN_DOCUMENT_COUNT)]
    min_doc_count: u32,
    /// Raw frequency feature file
    #[arg(long, default_value = "freq.csv")]
    freq_file: PathBuf,
    /// 1 + sqrt(frequency) feature file
    #[arg(long, default_value = "sqrtfreq.csv")]
    sqrt_file: PathBuf,
    /// 1 + log2(frequency) feature file
    #[arg(long, default_value = "log2freq.csv")]
    log2_file: PathBuf,
    /// Article class file
    #[arg(long, default_value = "reuters21578.class")]
    class_file: PathBuf,
    /// Vocabulary label file
    #[arg(long, default_value = "reuters21578.clabel")]
    label_file: PathBuf,
    /// Also write a JSON run summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Parse the corpus once and keep candidate articles in memory
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => build(args),
        Commands::Topics(args) => topics(&args),
    }
}

fn scanner(args: &CorpusArgs) -> Result<CorpusScanner> {
    if !args.corpus.is_dir() {
        bail!("corpus directory {} does not exist", args.corpus.display());
    }
    Ok(CorpusScanner::new(&args.corpus)
        .with_extension(&args.extension)
        .skip_malformed(args.skip_malformed))
}

fn build(args: BuildArgs) -> Result<()> {
    let scanner = scanner(&args.corpus)?;
    let stoplist = Stoplist::load(&args.stoplist).context("loading stoplist")?;
    if args.output.exists() && !args.output.is_dir() {
        bail!("output path {} is not a directory", args.output.display());
    }

    let paths = OutputPaths {
        dir: args.output,
        freq_file: args.freq_file,
        sqrt_file: args.sqrt_file,
        log2_file: args.log2_file,
        class_file: args.class_file,
        label_file: args.label_file,
        summary_file: args.summary,
    };
    let config = PipelineConfig {
        top_topics: args.corpus.top_topics,
        min_document_count: args.min_doc_count,
    };
    let pipeline = Pipeline::new(config, TextNormalizer::new(stoplist));

    let cached;
    let source: &dyn ArticleSource = if args.in_memory {
        cached = InMemoryCorpus::load(&scanner).context("scanning corpus")?;
        &cached
    } else {
        &scanner
    };

    let summary = pipeline
        .run(source, &paths)
        .with_context(|| format!("preprocessing {}", scanner.root().display()))?;

    tracing::info!(
        output = %paths.dir.display(),
        articles = summary.articles_written,
        skipped = summary.articles_skipped,
        vocabulary = summary.vocabulary_size,
        "preprocessing complete"
    );
    Ok(())
}

fn topics(args: &CorpusArgs) -> Result<()> {
    let scanner = scanner(args)?;
    let pipeline = Pipeline::new(
        PipelineConfig {
            top_topics: args.top_topics,
            ..PipelineConfig::default()
        },
        TextNormalizer::new(Stoplist::default()),
    );

    let selection = pipeline
        .select_topics(&scanner)
        .with_context(|| format!("scanning {}", scanner.root().display()))?;

    for (rank, tc) in selection.counts.ranked().iter().enumerate() {
        let marker = if selection.popular.contains(&tc.topic) { "*" } else { " " };
        println!("{marker} {:>4} {:>6} {}", rank + 1, tc.count, tc.topic);
    }
    Ok(())
}
