//! rust_proteoviz command-line interface

use std::fs;

use clap::Parser;
use log::{info, LevelFilter};

use rust_proteoviz::cli::{Cli, CommonArgs, Commands, VolcanoArgs};
use rust_proteoviz::io::{
    write_contrast_results, write_json, write_raincloud_summary, write_sample_counts, write_upset,
};
use rust_proteoviz::prelude::*;
use rust_proteoviz::render;
use rust_proteoviz::AnalysisParams;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Find the first non-flag argument (potential subcommand)
    let first_positional = args.iter().skip(1).find(|a| !a.starts_with('-'));
    let subcommands = ["run", "volcano", "counts", "raincloud", "upset", "help"];
    let has_subcommand = first_positional.map_or(false, |a| subcommands.contains(&a.as_str()));

    if !has_subcommand {
        if args.len() == 1 {
            print_no_args();
            return;
        }
        if args.iter().any(|a| a == "--help") {
            print_long_help();
            return;
        }
        if args.iter().any(|a| a == "-h") {
            print_short_help();
            return;
        }
        if args.iter().any(|a| a == "-V" || a == "--version") {
            println!("rust_proteoviz {}", VERSION);
            return;
        }
        print_no_args();
        return;
    }

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Some(Commands::Run {
            common,
            volcano,
            min_present,
            seed,
        }) => run_all(&common, &volcano, min_present, seed),
        Some(Commands::Volcano { common, volcano }) => {
            prepare(&common).and_then(|matrix| run_volcano_cmd(&common, &volcano, &matrix))
        }
        Some(Commands::Counts { common }) => prepare(&common).and_then(|matrix| run_counts(&common, &matrix)),
        Some(Commands::Raincloud { common, seed }) => {
            prepare(&common).and_then(|matrix| run_raincloud(&common, &matrix, seed))
        }
        Some(Commands::Upset { common, min_present }) => {
            prepare(&common).and_then(|matrix| run_upset(&common, &matrix, min_present))
        }
        None => {
            print_no_args();
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Custom help output
// ---------------------------------------------------------------------------

fn print_no_args() {
    println!("rust_proteoviz v{}", VERSION);
    println!("Run `rust_proteoviz -h` for usage or `rust_proteoviz --help` for detailed information.");
}

fn print_short_help() {
    println!("rust_proteoviz v{}", VERSION);
    println!();
    println!("Usage: rust_proteoviz <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run        Run every analysis and chart");
    println!("  volcano    Welch t-tests, BH correction and volcano classification");
    println!("  counts     Present and missing proteins per sample");
    println!("  raincloud  Per-sample log10 intensity distributions");
    println!("  upset      Intersections of detected proteins across groups");
    println!();
    println!("Run `rust_proteoviz <COMMAND> -h` for command-specific options.");
}

fn print_long_help() {
    println!("rust_proteoviz v{}", VERSION);
    println!("Exploratory differential-abundance analysis for proteomics intensity matrices");
    println!();
    println!("Usage: rust_proteoviz <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run        Run every analysis and chart");
    println!("  volcano    Volcano analysis of the four contrasts");
    println!("               - complete-case filter and per-sample median centring");
    println!("               - Welch t-test per protein (BMIF Dx/D29, PB Dx/D29,");
    println!("                 Dx BMIF/PB, D29 BMIF/PB)");
    println!("               - Benjamini-Hochberg FDR per contrast");
    println!("  counts     Present and missing proteins per sample");
    println!("  raincloud  Per-sample log10 intensity distributions");
    println!("  upset      Intersections of detected proteins across groups");
    println!();
    println!("Global Options:");
    println!("  -v, --verbose    Enable verbose output");
    println!("  -h               Print short help");
    println!("      --help       Print detailed help");
    println!("  -V, --version    Print version");
    println!();
    println!("Examples:");
    println!("  rust_proteoviz run -i intensities.csv -o results");
    println!();
    println!("  rust_proteoviz volcano -i intensities.csv -o results --json --no-plots");
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

/// Configure threads, create the output directory and load the matrix
fn prepare(common: &CommonArgs) -> Result<IntensityMatrix> {
    if common.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(common.threads)
            .build_global()
            .ok();
    }

    fs::create_dir_all(&common.outdir)?;

    info!("Loading intensity matrix from: {}", common.input.display());
    let matrix = read_intensity_matrix(&common.input)?;
    info!("  {} proteins, {} samples", matrix.n_proteins(), matrix.n_samples());

    Ok(matrix)
}

fn layout(common: &CommonArgs) -> GroupLayout {
    GroupLayout {
        first_tissue_columns: common.bmif_columns,
    }
}

fn run_all(common: &CommonArgs, volcano: &VolcanoArgs, min_present: usize, seed: u32) -> Result<()> {
    let matrix = prepare(common)?;
    run_counts(common, &matrix)?;
    run_raincloud(common, &matrix, seed)?;
    run_upset(common, &matrix, min_present)?;
    run_volcano_cmd(common, volcano, &matrix)?;
    info!("All outputs written to {}", common.outdir.display());
    Ok(())
}

fn run_volcano_cmd(common: &CommonArgs, args: &VolcanoArgs, matrix: &IntensityMatrix) -> Result<()> {
    let params = AnalysisParams {
        layout: layout(common),
        alpha: args.alpha,
        thresholds: Thresholds {
            significance: args.significance_threshold,
            effect: args.effect_threshold,
        },
        ratio_policy: args.ratio_policy.parse()?,
        ..AnalysisParams::default()
    };

    let results = rust_proteoviz::run_volcano(matrix, &params)?;
    info!(
        "{} of {} proteins are quantified in every sample",
        results.n_complete_proteins, results.n_input_proteins
    );

    for contrast in &results.contrasts {
        let path = common.outdir.join(format!("volcano_{}.tsv", contrast.contrast.slug()));
        write_contrast_results(&path, contrast)?;
        info!("Results written to: {}", path.display());
        println!("{}", contrast.summary());
    }

    if args.json {
        let path = common.outdir.join("volcano.json");
        write_json(&path, &results)?;
        info!("Results written to: {}", path.display());
    }

    if !common.no_plots {
        render::render_volcano(common.outdir.join("volcano.svg"), &results, &params.thresholds)?;
    }

    Ok(())
}

fn run_counts(common: &CommonArgs, matrix: &IntensityMatrix) -> Result<()> {
    let groups = layout(common).split(matrix.n_samples())?;
    let counts = sample_presence_counts(matrix, &groups);

    write_sample_counts(common.outdir.join("protein_counts.tsv"), &counts)?;
    if !common.no_plots {
        render::render_sample_counts(common.outdir.join("protein_counts.svg"), &counts)?;
    }
    Ok(())
}

fn run_raincloud(common: &CommonArgs, matrix: &IntensityMatrix, seed: u32) -> Result<()> {
    let groups = layout(common).split(matrix.n_samples())?;
    let clouds = raincloud_distributions(matrix, &groups, seed);

    write_raincloud_summary(common.outdir.join("raincloud_summary.tsv"), &clouds)?;
    if !common.no_plots {
        for cloud in &clouds {
            let path = common.outdir.join(format!("cloud_{}.svg", cloud.group.slug()));
            render::render_raincloud(&path, cloud)?;
        }
    }
    Ok(())
}

fn run_upset(common: &CommonArgs, matrix: &IntensityMatrix, min_present: usize) -> Result<()> {
    let groups = layout(common).split(matrix.n_samples())?;
    let presence = detect_presence(matrix, &groups, min_present);
    let upset = upset_intersections(&presence);

    for (group, size) in &upset.set_sizes {
        info!("  {} detected in {}", size, group.label());
    }

    write_upset(common.outdir.join("upset.tsv"), &upset)?;
    if !common.no_plots {
        render::render_upset(common.outdir.join("upset.svg"), &upset)?;
    }
    Ok(())
}
