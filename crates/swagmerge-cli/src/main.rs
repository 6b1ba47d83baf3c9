use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swagmerge_core::config::{self, CONFIG_FILE_NAME, SwagmergeConfig};
use swagmerge_core::update::{self, PatchedDocs, UpdateReport};
use swagmerge_core::{CommandBuilder, SkipBuild, SpecBuilder, UpdateOptions};

#[derive(Parser)]
#[command(
    name = "swagmerge",
    about = "Merge extension definitions into swag-generated docs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate docs, then merge extension definitions and rewrite refs
    #[command(alias = "u")]
    Update {
        #[command(flatten)]
        target: TargetArgs,

        /// Do not run the spec builder first
        #[arg(long)]
        skip_build: bool,

        /// Program used to generate the docs
        #[arg(long)]
        build_program: Option<String>,

        /// Report what would change without writing docs.go
        #[arg(long)]
        dry_run: bool,

        /// Only log warnings and errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the definitions and planned rewrites for the current docs.go
    Inspect {
        #[command(flatten)]
        target: TargetArgs,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swagmerge configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Directory containing the generated docs.go
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extension files, `|` separated
    #[arg(long = "extand-files", visible_alias = "efs")]
    extension_files: Option<String>,

    /// Marker tag that flags a response description as naming a definition
    #[arg(long)]
    marker: Option<String>,
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Update { quiet: true, .. });
    init_logger(quiet);

    match cli.command {
        Commands::Update {
            target,
            skip_build,
            build_program,
            dry_run,
            quiet: _,
        } => cmd_update(target, skip_build, build_program, dry_run),

        Commands::Inspect { target, format } => cmd_inspect(target, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagmerge", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_logger(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SwagmergeConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Load config and apply the docs dir, extension and marker overrides from the
/// command line.
fn resolve_config(target: TargetArgs) -> Result<SwagmergeConfig> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(output) = target.output {
        cfg.docs_dir = output.to_string_lossy().into_owned();
    }
    if let Some(files) = target.extension_files {
        cfg.extension_files = config::split_extension_files(&files);
    }
    if let Some(marker) = target.marker {
        cfg.marker = marker;
    }
    log::debug!("resolved config: {:?}", cfg);
    Ok(cfg)
}

fn cmd_update(
    target: TargetArgs,
    skip_build: bool,
    build_program: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let mut cfg = resolve_config(target)?;
    if let Some(program) = build_program {
        cfg.build.program = program;
    }

    let builder: Box<dyn SpecBuilder> = if skip_build || cfg.build.skip {
        Box::new(SkipBuild)
    } else {
        Box::new(CommandBuilder::from_config(
            &cfg.build,
            Path::new(&cfg.docs_dir),
        ))
    };

    let mut options = UpdateOptions::from_config(&cfg);
    options.dry_run = dry_run;

    let report = update::build_and_update(builder.as_ref(), &options)
        .with_context(|| format!("failed to update {}", options.docs_file.display()))?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &UpdateReport) {
    for name in &report.merge.added {
        eprintln!("  added definition {}", name);
    }
    for name in &report.merge.overridden {
        eprintln!("  replaced definition {}", name);
    }
    for rewrite in &report.rewrites {
        eprintln!(
            "  POST {} {} -> {}",
            rewrite.path,
            rewrite.status,
            rewrite.ref_path()
        );
    }

    let path = report.docs_file.display();
    match (report.written, report.changed) {
        (true, true) => eprintln!("Updated {}", path),
        (true, false) => eprintln!("{} is up to date", path),
        (false, true) => eprintln!("{} would change (dry run)", path),
        (false, false) => eprintln!("{} would not change (dry run)", path),
    }
}

fn cmd_inspect(target: TargetArgs, format: InspectFormat) -> Result<()> {
    let cfg = resolve_config(target)?;
    let options = UpdateOptions::from_config(&cfg);
    let (_, patched) = update::plan_update(&options)
        .with_context(|| format!("failed to inspect {}", options.docs_file.display()))?;

    let summary = build_inspect_summary(&options, &patched);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(options: &UpdateOptions, patched: &PatchedDocs) -> serde_json::Value {
    let rewrites: Vec<serde_json::Value> = patched
        .rewrites
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path,
                "status": r.status,
                "ref": r.ref_path(),
            })
        })
        .collect();

    serde_json::json!({
        "docs_file": options.docs_file.display().to_string(),
        "extension_files": options
            .extension_files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "definitions": patched.doc.definitions.keys().collect::<Vec<_>>(),
        "added": patched.merge.added,
        "overridden": patched.merge.overridden,
        "rewrites": rewrites,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
