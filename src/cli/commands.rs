use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::analyzers::TagAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::clients::{GeminiClient, OverpassClient};
use crate::error::Result;
use crate::readers::NodeReader;
use crate::settings::{AreaSettings, Settings};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, JsonWriter};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    debug!(overpass = ?settings.overpass, "Loaded settings");

    match cli.command {
        Commands::Fetch {
            node_type,
            area,
            state,
            url,
            json_output,
            csv_output,
            sample,
            print_query,
        } => {
            if let Some(area) = area {
                settings.overpass.area.handle = AreaSettings::handle_for(&area);
                settings.overpass.area.name = area;
            }
            if let Some(state) = state {
                settings.overpass.area.state = state;
            }
            if let Some(url) = url {
                settings.overpass.url = url;
            }
            if json_output.is_some() {
                settings.output.json = json_output;
            }
            if csv_output.is_some() {
                settings.output.csv = csv_output;
            }
            if let Some(sample) = sample {
                settings.output.sample_size = sample;
            }

            let client = OverpassClient::new(&settings.overpass)?;

            if print_query {
                println!("{}", client.query_builder().build(node_type.as_deref()));
                return Ok(());
            }

            let area = &settings.overpass.area;
            println!("Fetching nodes in {}, {}...", area.name, area.state);
            if let Some(ref node_type) = node_type {
                println!("Filter: {}", node_type);
            }

            let progress = ProgressReporter::new_spinner("Querying Overpass API...", false);
            let outcome = client.fetch_nodes(node_type.as_deref(), Some(&progress)).await;
            let records = outcome.records;

            println!("\nFound {} nodes", records.len());
            if cli.verbose {
                println!("{}", outcome.report.summary());
            }

            let json_path = settings.json_output();
            let csv_path = settings.csv_output();
            ensure_parent_dir(&json_path)?;
            ensure_parent_dir(&csv_path)?;

            let json_writer = JsonWriter::new();
            json_writer.write_records(&records, &json_path)?;
            let csv_writer = CsvWriter::new();
            csv_writer.write_records(&records, &csv_path)?;

            println!(
                "\nSaved data to {} and {}",
                json_path.display(),
                csv_path.display()
            );
            if cli.verbose {
                println!("{}", json_writer.get_file_info(&json_path, records.len())?.summary());
                println!("{}", csv_writer.get_file_info(&csv_path, records.len())?.summary());
            }

            let analyzer = TagAnalyzer::new();
            let table = analyzer.analyze(&records);
            println!("\n{}", table.detailed_summary());
            println!(
                "\n{}",
                analyzer.sample_summary(&records, settings.output.sample_size)
            );
        }

        Commands::AnalyzeImage {
            image,
            description,
            obstacle_type,
            model,
            json,
        } => {
            if let Some(model) = model {
                settings.gemini.model = model;
            }

            println!("Looking for image at: {}", absolute_display(&image));

            let client = GeminiClient::new(&settings.gemini)?;
            info!(endpoint = %client.endpoint(), "Analyzing image");

            let progress = ProgressReporter::new_spinner("Waiting for Gemini...", json);
            let result = client
                .analyze_image(&image, &description, &obstacle_type)
                .await;
            match &result {
                Ok(_) => progress.finish_with_message("Analysis received"),
                Err(_) => progress.abandon_with_message("Analysis failed"),
            }
            let assessment = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("Analysis Result:");
                println!("{}", assessment.summary());
            }
        }

        Commands::Inspect {
            file,
            sample,
            strict,
        } => {
            println!("Analyzing node file: {}", file.display());

            let reader = NodeReader::with_strict_validation(strict);
            let records = reader.read_records(&file)?;
            println!("\nFound {} nodes", records.len());

            let analyzer = TagAnalyzer::new();
            let table = analyzer.analyze(&records);
            println!("\n{}", table.detailed_summary());

            if sample > 0 {
                println!("\n{}", analyzer.sample_summary(&records, sample));
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // A second initialisation (e.g. from tests) is not an error.
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn absolute_display(path: &Path) -> String {
    let absolute: PathBuf = std::fs::canonicalize(path)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(path)))
        .unwrap_or_else(|_| path.to_path_buf());
    absolute.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_parent_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let nested = temp_dir.path().join("out/data/troy_nodes.json");

        ensure_parent_dir(&nested)?;
        assert!(temp_dir.path().join("out/data").is_dir());

        ensure_parent_dir(Path::new("troy_nodes.json"))?;
        Ok(())
    }

    #[test]
    fn test_absolute_display_of_missing_file() {
        let shown = absolute_display(Path::new("pic.jpeg"));
        assert!(shown.ends_with("pic.jpeg"));
        assert!(Path::new(&shown).is_absolute());
    }
}
