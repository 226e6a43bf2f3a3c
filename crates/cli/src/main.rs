//! Kubernetes API Reference CLI
//!
//! Command-line interface for building API reference documentation from the
//! OpenAPI specification of the Kubernetes API.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use k8s_api_reference_generator::toc::OTHER_RESOURCES_PART;
use k8s_api_reference_generator::{ReferenceGenerator, Toc, TocConfig};
use k8s_api_reference_parser::{parse_spec_file, Spec};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "k8s-api-reference")]
#[command(version, about = "Build Kubernetes API reference documentation from the OpenAPI specification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenAPI spec file (swagger.json)
    #[arg(short, long, global = true, env = "K8S_API_REFERENCE_FILE")]
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the resources of the specification, newest versions first
    Resources,

    /// Show the definition prefixes registered for each group/version
    Gvkeys,

    /// Show the table of contents
    #[command(after_help = "EXAMPLES:\n  \
        k8s-api-reference showtoc -f api/swagger.json -c config/")]
    Showtoc {
        /// Directory containing the documentation configuration (toc.yaml)
        #[arg(short, long)]
        config_dir: PathBuf,
    },

    /// Generate Hugo content
    #[command(after_help = "EXAMPLES:\n  \
        k8s-api-reference hugo \\\n    \
        --file api/swagger.json \\\n    \
        --config-dir config/ \\\n    \
        --output-dir website/content/en/docs")]
    Hugo {
        /// Directory containing the documentation configuration (toc.yaml)
        #[arg(short, long)]
        config_dir: PathBuf,

        /// Existing, empty directory receiving the generated files
        #[arg(short, long)]
        output_dir: PathBuf,
    },

    /// Generate a DocBook book
    #[command(after_help = "EXAMPLES:\n  \
        k8s-api-reference docbook \\\n    \
        --file api/swagger.json \\\n    \
        --config-dir config/ \\\n    \
        --output-dir book/")]
    Docbook {
        /// Directory containing the documentation configuration (toc.yaml)
        #[arg(short, long)]
        config_dir: PathBuf,

        /// Existing, empty directory receiving the generated files
        #[arg(short, long)]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(file) = cli.file else {
        bail!("No spec file given: use --file or set K8S_API_REFERENCE_FILE");
    };

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Resources => resources_command(&file, cli.verbose)?,
        Commands::Gvkeys => gvkeys_command(&file, cli.verbose)?,
        Commands::Showtoc { config_dir } => showtoc_command(&file, &config_dir, cli.verbose)?,
        Commands::Hugo {
            config_dir,
            output_dir,
        } => generate_command(
            &file,
            &config_dir,
            &output_dir,
            OutputFormat::Hugo,
            cli.verbose,
        )?,
        Commands::Docbook {
            config_dir,
            output_dir,
        } => generate_command(
            &file,
            &config_dir,
            &output_dir,
            OutputFormat::DocBook,
            cli.verbose,
        )?,
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_spec(file: &Path, verbose: bool) -> Result<Spec> {
    if verbose {
        println!("{} Parsing spec file: {}", "→".cyan(), file.display());
    }
    let spec = parse_spec_file(file)
        .with_context(|| format!("Failed to load spec file {}", file.display()))?;
    if verbose {
        println!(
            "{} Indexed {} definitions, {} resources",
            "✓".green(),
            spec.definitions().len(),
            spec.resources().count()
        );
    }
    Ok(spec)
}

fn load_toc_config(config_dir: &Path, verbose: bool) -> Result<TocConfig> {
    if verbose {
        println!(
            "{} Loading table of contents from {}",
            "→".cyan(),
            config_dir.display()
        );
    }
    TocConfig::load_from_dir(config_dir).context("Failed to load documentation configuration")
}

fn resources_command(file: &Path, verbose: bool) -> Result<()> {
    let spec = load_spec(file, verbose)?;

    for kind in spec.kinds() {
        println!("{}", kind.bold());
        for resource in spec.resources_of(kind) {
            match &resource.replaced_by {
                Some(newer) => println!(
                    "  {} {} {}",
                    resource.gv().dimmed(),
                    "replaced by".yellow(),
                    newer
                ),
                None => println!("  {}", resource.gv().cyan()),
            }
        }
    }
    Ok(())
}

fn gvkeys_command(file: &Path, verbose: bool) -> Result<()> {
    let spec = load_spec(file, verbose)?;

    for (gv, prefixes) in spec.gv_to_key().iter() {
        println!("{}", gv.bold());
        for prefix in prefixes {
            println!("  {}", prefix);
        }
    }
    Ok(())
}

fn showtoc_command(file: &Path, config_dir: &Path, verbose: bool) -> Result<()> {
    let mut spec = load_spec(file, verbose)?;
    let config = load_toc_config(config_dir, verbose)?;

    let mut toc = Toc::populate(&config, &mut spec).context("Failed to populate table of contents")?;
    toc.add_other_resources(&mut spec)
        .context("Failed to add other resources")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    toc.to_markdown(&mut out)
        .context("Failed to write table of contents")?;
    out.flush()?;
    Ok(())
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Hugo,
    DocBook,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Hugo => write!(f, "Hugo"),
            OutputFormat::DocBook => write!(f, "DocBook"),
        }
    }
}

fn generate_command(
    file: &Path,
    config_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating {} reference into {}",
        "→".cyan(),
        format,
        output_dir.display()
    );

    if !output_dir.is_dir() {
        bail!(
            "Output directory {} does not exist",
            output_dir.display()
        );
    }
    let is_empty = fs::read_dir(output_dir)
        .with_context(|| format!("Failed to read output directory {}", output_dir.display()))?
        .next()
        .is_none();
    if !is_empty {
        bail!("Output directory {} is not empty", output_dir.display());
    }

    let spec = load_spec(file, verbose)?;
    let config = load_toc_config(config_dir, verbose)?;

    let mut generator =
        ReferenceGenerator::new(spec, &config).context("Failed to populate table of contents")?;

    if verbose {
        let toc = generator.toc();
        if toc.parts.iter().any(|p| p.name == OTHER_RESOURCES_PART) {
            println!(
                "{} Resources missing from the configuration are listed under \"{}\"",
                "⚠".yellow(),
                OTHER_RESOURCES_PART
            );
        }
        println!("  Parts: {}", toc.parts.len());
        println!(
            "  Chapters: {}",
            toc.parts.iter().map(|p| p.chapters.len()).sum::<usize>()
        );
        println!("  Sections: {}", toc.link_ends.len());
    }

    let result = match format {
        OutputFormat::Hugo => generator.generate_hugo(output_dir),
        OutputFormat::DocBook => generator.generate_docbook(output_dir),
    };
    result.with_context(|| format!("Failed to generate {} output", format))?;

    if verbose {
        println!(
            "  Documented definitions: {}",
            generator.toc().documented.len()
        );
    }

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  Output: {}", output_dir.display());
    Ok(())
}
