mod cli;

use chorekit::context::AppContext;
use chorekit::download::DownloadJob;
use chorekit::pipeline::VideoJob;
use chorekit::reencode::ReencodeJob;
use chorekit::config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "chorekit=trace,chorekit_av=debug,chorekit_common=debug".to_string()
        } else {
            "chorekit=info,chorekit_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Vedit {
            input,
            actions,
            output_dir,
            output,
        } => vedit(cli.config.as_deref(), &input, &actions, output_dir, output),
        Commands::Download {
            source,
            output_dir,
            output,
        } => download(cli.config.as_deref(), &source, output_dir, output),
        Commands::Reencode {
            source,
            quality,
            recursive,
            output_dir,
            output,
        } => reencode(
            cli.config.as_deref(),
            &source,
            quality.as_deref(),
            recursive,
            output_dir,
            output,
        ),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("chorekit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_context(config_path: Option<&Path>) -> Result<AppContext> {
    let config = config::load_config_or_default(config_path)?;
    AppContext::new(config).context("invalid configuration")
}

fn vedit(
    config_path: Option<&Path>,
    input: &Path,
    actions: &[String],
    output_dir: Option<PathBuf>,
    output: Option<String>,
) -> Result<()> {
    let ctx = load_context(config_path)?;
    let job = VideoJob::new(input, actions, output_dir, output)?;

    tracing::info!("editing {} with {} action(s)", input.display(), job.actions.len());
    let result = job.run(&ctx.executor())?;

    println!("{}", result.display());
    Ok(())
}

fn download(
    config_path: Option<&Path>,
    source: &str,
    output_dir: Option<PathBuf>,
    output: Option<String>,
) -> Result<()> {
    let ctx = load_context(config_path)?;
    let output_dir = output_dir.unwrap_or_else(|| ctx.download_dir());
    let job = DownloadJob::from_source(source, output_dir, output)?;

    tracing::info!("downloading {} URL(s)", job.urls.len());
    let written = ctx.downloader()?.run(&job)?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn reencode(
    config_path: Option<&Path>,
    source: &Path,
    quality: Option<&str>,
    recursive: bool,
    output_dir: Option<PathBuf>,
    output: Option<String>,
) -> Result<()> {
    let ctx = load_context(config_path)?;
    let job = ReencodeJob::from_source(
        source,
        recursive,
        quality,
        ctx.default_quality(),
        output_dir,
        output,
    )?;

    if job.files.is_empty() {
        println!("No files to re-encode in {}", source.display());
        return Ok(());
    }

    tracing::info!("re-encoding {} file(s) at {}", job.files.len(), job.preset);
    let summary = ctx.reencoder()?.run(&job)?;

    for path in &summary.encoded {
        println!("{}", path.display());
    }
    if !summary.skipped.is_empty() {
        println!("Skipped {} file(s) that would overwrite their source", summary.skipped.len());
    }
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    println!("Checking external tools...\n");

    let tools = chorekit_av::check_tools(config.tools.ffmpeg_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. vedit and reencode need ffmpeg.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let output_dir = config
        .output
        .dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "(next to input)".to_string());
    println!("  Output dir: {}", output_dir);
    println!("  Reencode quality: {}", config.reencode.quality);
    println!("  Download first chunk: {}", config.download.first_chunk);
    println!("  Download max chunks: {}", config.download.max_chunks);
    println!("  Download user agent: {}", config.download.user_agent);
    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        println!("  ffmpeg: {}", ffmpeg.display());
    }

    Ok(())
}
