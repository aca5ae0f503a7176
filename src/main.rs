use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use diarole::stages::format_turns_for_display;
use diarole::{
    CleanupProfileName, DialogueReport, HumanTranscript, Pipeline, PipelineConfig, RawSegment,
    normalize_language, parse_deepgram_file, parse_segments_file,
};

#[derive(Parser)]
#[command(name = "diarole")]
#[command(author, version, about = "Clinician/patient role attribution for diarized dialogue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// Array of {t0, t1, bucket, text} segments
    Segments,
    /// Deepgram response with word-level diarization
    Deepgram,
}

#[derive(Subcommand)]
enum Commands {
    /// Smooth, attribute roles and clean a diarized dialogue
    Process {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Input file format
        #[arg(long, value_enum, default_value = "segments")]
        format: InputFormat,

        /// Dialogue language tag, e.g. fr-CA or en-US
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Cleanup profile (default or clinical_light), overrides the config file
        #[arg(long)]
        profile: Option<CleanupProfileName>,

        /// Pipeline configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report smoothing and role attribution without writing files
    Analyze {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Input file format
        #[arg(long, value_enum, default_value = "segments")]
        format: InputFormat,

        /// Dialogue language tag, e.g. fr-CA or en-US
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            human_readable,
            format,
            language,
            profile,
            config,
            verbose,
        } => {
            setup_logging(verbose);
            let mut pipeline_config = match config {
                Some(path) => PipelineConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config: {:?}", path))?,
                None => PipelineConfig::default(),
            };
            if let Some(profile) = profile {
                pipeline_config.cleanup.profile = profile;
            }
            process_dialogue(
                &input,
                &output,
                human_readable.as_deref(),
                format,
                &language,
                pipeline_config,
            )
        }
        Commands::Analyze {
            input,
            format,
            language,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_dialogue(&input, format, &language)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_segments(input: &Path, format: InputFormat) -> Result<Vec<RawSegment>> {
    info!("Loading {:?} input from {:?}", format, input);
    let segments = match format {
        InputFormat::Segments => parse_segments_file(input),
        InputFormat::Deepgram => parse_deepgram_file(input),
    }
    .context("Failed to parse input")?;
    info!("Loaded {} segments", segments.len());
    Ok(segments)
}

fn process_dialogue(
    input: &Path,
    output: &Path,
    human_readable: Option<&Path>,
    format: InputFormat,
    language: &str,
    config: PipelineConfig,
) -> Result<()> {
    let segments = load_segments(input, format)?;
    let language = normalize_language(language);

    let pipeline = Pipeline::new(config).context("Invalid cleanup configuration")?;
    let outcome = pipeline.run(&segments, language);

    DialogueReport::from_outcome(&outcome).write_json(output)?;
    info!("Output written to {:?}", output);

    if let Some(human_path) = human_readable {
        HumanTranscript::new(&outcome.turns).write_file(human_path)?;
        info!("Human-readable output written to {:?}", human_path);
    }

    Ok(())
}

fn analyze_dialogue(input: &Path, format: InputFormat, language: &str) -> Result<()> {
    let segments = load_segments(input, format)?;
    let language = normalize_language(language);

    let pipeline = Pipeline::new(PipelineConfig::default())?;
    let outcome = pipeline.run(&segments, language);
    let diagnostics = outcome.smoothing.diagnostics;
    let mapping = &outcome.role_mapping;
    let features = &mapping.features;

    println!("Dialogue Analysis");
    println!("=================");
    println!("Language: {}", outcome.language);
    println!("Raw segments: {}", outcome.raw_segment_count);
    println!("Smoothed segments: {}", outcome.smoothing.segments.len());
    println!();

    println!("Smoothing");
    println!("---------");
    println!("Flips before: {}", diagnostics.flips_before);
    println!("Flips after hysteresis: {}", diagnostics.flips_after);
    println!("Segments merged: {}", diagnostics.merged);
    println!("Crumbs absorbed: {}", diagnostics.crumbs_absorbed);
    println!();

    println!("Role Mapping");
    println!("------------");
    println!(
        "A: {}  B: {}",
        mapping.localized_role_map.a, mapping.localized_role_map.b
    );
    println!("Score: {:.3}", mapping.score);
    println!("Confidence: {:.3}", mapping.confidence);
    println!(
        "Questions: A {:.2}, B {:.2}",
        features.question_ratio_a, features.question_ratio_b
    );
    println!(
        "Self-reports: A {:.2}, B {:.2}",
        features.self_report_ratio_a, features.self_report_ratio_b
    );
    println!(
        "Talk share: A {:.2}, B {:.2}",
        features.talk_share_a, features.talk_share_b
    );
    println!("A starts first: {}", features.starts_first_a == 1);
    println!();

    println!("Turns");
    println!("-----");
    println!("{}", diarole::stages::turn_summary(&outcome.turns));
    println!();
    println!("{}", format_turns_for_display(&outcome.turns));

    Ok(())
}
