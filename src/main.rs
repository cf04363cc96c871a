use bigram_heatmap::{group_thousands, pipeline, BrewerPalettes, HeatmapConfig, PaletteProvider};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bigram-heatmap")]
#[command(about = "Count character bigrams in a text corpus and render an HTML heatmap")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count bigrams in a corpus and save the count table
    Count {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Render a saved count table as an HTML heatmap
    Render {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Count and render in one go
    Run {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Skip counting and render the saved table
        #[arg(long)]
        from_table: bool,
    },

    /// Show count table statistics
    Stats {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of most frequent bigrams to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// List the files a count would scan
    Files {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Symbols to count, in report order
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Count table (JSON) path
    #[arg(short, long)]
    table: Option<PathBuf>,
}

#[derive(Args)]
struct CorpusArgs {
    /// Corpus root directory
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Directory names to skip (replaces the default list)
    #[arg(long, value_delimiter = ',')]
    exclude_dirs: Option<Vec<String>>,

    /// File names to skip (replaces the default list)
    #[arg(long, value_delimiter = ',')]
    exclude_files: Option<Vec<String>>,

    /// Regex a file name must match to be counted
    #[arg(long)]
    include_pattern: Option<String>,
}

#[derive(Args)]
struct ScanArgs {
    /// Save the table after this many files (0 = only at the end)
    #[arg(long)]
    checkpoint_every: Option<usize>,

    /// Count files in parallel
    #[arg(long)]
    parallel: bool,

    /// Continue counting from the saved table
    #[arg(long)]
    resume: bool,
}

#[derive(Args)]
struct RenderArgs {
    /// Report output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of color buckets
    #[arg(short, long)]
    buckets: Option<usize>,

    /// Counts below this are drawn in bucket 0
    #[arg(long, conflicts_with = "no_cutoff")]
    cutoff: Option<u64>,

    /// Bucket every count on the log scale alone
    #[arg(long)]
    no_cutoff: bool,

    /// Color palette for buckets 1 and up
    #[arg(short, long)]
    palette: Option<String>,

    /// Report heading
    #[arg(long)]
    title: Option<String>,
}

impl CommonArgs {
    fn load(&self) -> bigram_heatmap::Result<HeatmapConfig> {
        let mut config = match &self.config {
            Some(path) => HeatmapConfig::from_toml_file(path)?,
            None => HeatmapConfig::default(),
        };
        if let Some(alphabet) = &self.alphabet {
            config.alphabet = alphabet.clone();
        }
        if let Some(table) = &self.table {
            config.table_path = table.clone();
        }
        Ok(config)
    }
}

impl CorpusArgs {
    fn apply(self, config: &mut HeatmapConfig) {
        if let Some(root) = self.root {
            config.root = root;
        }
        if let Some(dirs) = self.exclude_dirs {
            config.exclude_dirs = dirs;
        }
        if let Some(files) = self.exclude_files {
            config.exclude_files = files;
        }
        if let Some(pattern) = self.include_pattern {
            config.include_pattern = pattern;
        }
    }
}

impl ScanArgs {
    fn apply(&self, config: &mut HeatmapConfig) {
        if let Some(every) = self.checkpoint_every {
            config.checkpoint_every = every;
        }
    }
}

impl RenderArgs {
    fn apply(self, config: &mut HeatmapConfig) {
        if let Some(output) = self.output {
            config.report_path = output;
        }
        if let Some(buckets) = self.buckets {
            config.buckets = buckets;
        }
        if self.no_cutoff {
            config.cutoff = None;
        } else if let Some(cutoff) = self.cutoff {
            config.cutoff = Some(cutoff);
        }
        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Count {
            common,
            corpus,
            scan,
        } => cmd_count(common, corpus, scan),

        Commands::Render { common, render } => cmd_render(common, render),

        Commands::Run {
            common,
            corpus,
            scan,
            render,
            from_table,
        } => cmd_run(common, corpus, scan, render, from_table),

        Commands::Stats { common, top } => cmd_stats(common, top),

        Commands::Files { common, corpus } => cmd_files(common, corpus),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_count(common: CommonArgs, corpus: CorpusArgs, scan: ScanArgs) -> bigram_heatmap::Result<()> {
    let mut config = common.load()?;
    corpus.apply(&mut config);
    scan.apply(&mut config);

    let start = Instant::now();
    let (table, summary) = pipeline::count(&config, scan.parallel, scan.resume)?;

    println!(
        "Counted {} files ({} skipped), {} bigrams in {:.2}s",
        summary.files_counted,
        summary.files_skipped,
        group_thousands(table.total()),
        start.elapsed().as_secs_f64()
    );
    println!("Saved count table to {}", config.table_path.display());

    Ok(())
}

fn cmd_render(common: CommonArgs, render: RenderArgs) -> bigram_heatmap::Result<()> {
    let mut config = common.load()?;
    render.apply(&mut config);
    config.validate()?;

    let table = pipeline::load(&config)?;
    write_report(&table, &config, &BrewerPalettes)
}

fn cmd_run(
    common: CommonArgs,
    corpus: CorpusArgs,
    scan: ScanArgs,
    render: RenderArgs,
    from_table: bool,
) -> bigram_heatmap::Result<()> {
    let mut config = common.load()?;
    corpus.apply(&mut config);
    scan.apply(&mut config);
    render.apply(&mut config);
    config.validate()?;

    let table = if from_table {
        pipeline::load(&config)?
    } else {
        let (table, summary) = pipeline::count(&config, scan.parallel, scan.resume)?;
        println!(
            "Counted {} files ({} skipped)",
            summary.files_counted, summary.files_skipped
        );
        table
    };

    write_report(&table, &config, &BrewerPalettes)
}

fn write_report(
    table: &bigram_heatmap::CountTable,
    config: &HeatmapConfig,
    palettes: &dyn PaletteProvider,
) -> bigram_heatmap::Result<()> {
    let start = Instant::now();
    pipeline::generate_report(table, config, palettes)?;

    println!(
        "Wrote {}x{} heatmap to {} in {:.3}ms",
        config.alphabet.chars().count(),
        config.alphabet.chars().count(),
        config.report_path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

fn cmd_stats(common: CommonArgs, top: usize) -> bigram_heatmap::Result<()> {
    let config = common.load()?;

    let table = pipeline::load(&config)?;

    println!("Count Table Statistics");
    println!("======================");
    println!("Table:          {}", config.table_path.display());
    println!("Alphabet size:  {}", table.alphabet().len());
    println!("Bigrams:        {}", table.len());
    println!("Observed:       {}", table.observed());
    println!("Total count:    {}", group_thousands(table.total()));
    println!("Max count:      {}", group_thousands(table.max_count()));
    println!("Min count:      {}", group_thousands(table.min_count()));

    if top > 0 {
        println!();
        for (bigram, count) in table.top(top) {
            println!("{}\t{}", bigram, group_thousands(count));
        }
    }

    Ok(())
}

fn cmd_files(common: CommonArgs, corpus: CorpusArgs) -> bigram_heatmap::Result<()> {
    let mut config = common.load()?;
    corpus.apply(&mut config);
    config.validate()?;

    let selector = config.corpus_selector()?;
    let mut found = 0usize;
    for path in selector.files() {
        println!("{}", path.display());
        found += 1;
    }

    println!();
    println!("{} files under {}", found, selector.root().display());

    Ok(())
}
