use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use keggmap_core::{compare_uploads, MapColor, Upload, UploadComparison};
use keggmap_server::{KeggmapServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, cli.format),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn read_upload(path: &Path) -> anyhow::Result<Upload> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Upload::new(data).with_filename(name))
}

/// Read both files and compare them.
pub fn compare_files(file1: &Path, file2: &Path) -> anyhow::Result<UploadComparison> {
    let first = read_upload(file1)?;
    let second = read_upload(file2)?;
    Ok(compare_uploads(Some(&first), Some(&second))?)
}

/// Write the map text to `path`.
pub fn write_map(path: &Path, map: &str) -> anyhow::Result<()> {
    fs::write(path, map).with_context(|| format!("failed to write {}", path.display()))
}

fn terminal_color(color: MapColor) -> colored::Color {
    match color {
        MapColor::Yellow => colored::Color::Yellow,
        MapColor::Blue => colored::Color::Blue,
        MapColor::Red => colored::Color::Red,
    }
}

fn summary_text(result: &UploadComparison) -> String {
    result
        .summary_lines()
        .iter()
        .map(|line| line.text.color(terminal_color(line.color)).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let result = compare_files(&args.file1, &args.file2)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            if args.stdout {
                return Ok(());
            }
        }
        OutputFormat::Text if args.stdout => {
            eprintln!("{}", summary_text(&result));
            println!("{}", result.report.map);
            return Ok(());
        }
        OutputFormat::Text => println!("{}", summary_text(&result)),
    }

    write_map(&args.output, &result.report.map)?;
    tracing::debug!(path = %args.output.display(), "wrote map");
    if matches!(format, OutputFormat::Text) {
        println!("{} Wrote {}", "✓".green().bold(), args.output.display().to_string().bold());
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config = config.with_bind_addr(bind);
    }

    println!("keggmap server on {}", config.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(KeggmapServer::new(config).serve())?;
    Ok(())
}
