//! Command-line interface for rust_proteoviz

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rust_proteoviz")]
#[command(version)]
#[command(about = "Exploratory differential-abundance analysis for proteomics intensity matrices")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the intensity matrix
    #[arg(short, long,
        long_help = "Path to the protein intensity matrix.\n\
            Format: row 0 = header, column 0 = protein identifier (text before the\n\
            first ';' is used as the name), column 1 = ignored, remaining columns =\n\
            one intensity per sample. Comma or tab delimited (auto-detected).\n\
            Empty, NA and NaN cells are missing values.")]
    pub input: PathBuf,

    /// Output directory [default: .]
    #[arg(short, long, default_value = ".")]
    pub outdir: PathBuf,

    /// Number of leading BMIF sample columns [default: 16]
    #[arg(long, default_value = "16",
        long_help = "Width of the BMIF sample block.\n\
            The first N sample columns are BMIF, the rest are PB. Inside each block\n\
            even offsets are diagnosis (Dx) and odd offsets are day-29 (D29) samples.\n\
            The BMIF block must have an even width. The PB block needs at least two\n\
            columns; an odd PB block gives PB Dx one more sample than PB D29.")]
    pub bmif_columns: usize,

    /// Number of threads (0 = auto) [default: 0]
    #[arg(short = 't', long, default_value = "0")]
    pub threads: usize,

    /// Skip SVG rendering
    #[arg(long)]
    pub no_plots: bool,
}

/// Options of the volcano analysis
#[derive(Args, Debug, Clone)]
pub struct VolcanoArgs {
    /// FDR level for Benjamini-Hochberg rejections [default: 0.05]
    #[arg(short, long, default_value = "0.05")]
    pub alpha: f64,

    /// -log10(adjusted p) threshold [default: 2.0]
    #[arg(long, default_value = "2.0",
        long_help = "Significance threshold on -log10(adjusted p-value).\n\
            Proteins strictly above it are significant; 2.0 means adjusted p < 0.01.")]
    pub significance_threshold: f64,

    /// |log2 ratio| threshold [default: 1.0]
    #[arg(long, default_value = "1.0",
        long_help = "Effect threshold on the log2 ratio of group means.\n\
            Proteins strictly beyond +/- this value are up or down; 1.0 means two-fold.")]
    pub effect_threshold: f64,

    /// Undefined-ratio policy [default: denominator]
    #[arg(long, default_value = "denominator",
        long_help = "When a ratio of group means counts as undefined.\n\
            denominator: denominator mean <= 0 or a zero ratio; log2 of |ratio|\n\
            positive: additionally a negative numerator mean")]
    pub ratio_policy: String,

    /// Also write volcano.json
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every analysis and chart
    #[command(
        long_about = "Run every analysis and chart.\n\n\
            Writes per-sample protein counts, raincloud summaries, the UpSet table and\n\
            the volcano tables of the four contrasts, plus their SVG charts.",
        after_long_help = "\
Examples:
  rust_proteoviz run -i intensities.csv -o results

  # 12 BMIF columns, strict positive-means policy, JSON export
  rust_proteoviz run -i intensities.csv -o results --bmif-columns 12 \\
    --ratio-policy positive --json"
    )]
    Run {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        volcano: VolcanoArgs,

        /// Values a protein needs in a group to be detected [default: 6]
        #[arg(long, default_value = "6")]
        min_present: usize,

        /// Seed of the raincloud jitter [default: 5489]
        #[arg(long, default_value = "5489")]
        seed: u32,
    },

    /// Welch t-tests, BH correction and volcano classification
    #[command(
        long_about = "Volcano analysis of the four contrasts.\n\n\
            Keeps proteins quantified in every sample, median-centres each sample,\n\
            runs a Welch t-test per protein and contrast, corrects each contrast with\n\
            Benjamini-Hochberg and classifies proteins by adjusted significance and\n\
            log2 ratio of group means.",
        after_long_help = "\
Examples:
  rust_proteoviz volcano -i intensities.csv -o results --json
  rust_proteoviz volcano -i intensities.csv --significance-threshold 1.3"
    )]
    Volcano {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        volcano: VolcanoArgs,
    },

    /// Present and missing proteins per sample
    Counts {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Per-sample log10 intensity distributions
    Raincloud {
        #[command(flatten)]
        common: CommonArgs,

        /// Seed of the raincloud jitter [default: 5489]
        #[arg(long, default_value = "5489")]
        seed: u32,
    },

    /// Intersections of detected proteins across groups
    Upset {
        #[command(flatten)]
        common: CommonArgs,

        /// Values a protein needs in a group to be detected [default: 6]
        #[arg(long, default_value = "6")]
        min_present: usize,
    },
}
