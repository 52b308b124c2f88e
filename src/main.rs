use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;

use mdsite::{Config, site};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Convert Markdown files to HTML pages")]
struct Cli {
    /// Single Markdown file to convert; builds the whole site when omitted
    input: Option<PathBuf>,

    /// Output HTML file (defaults to input name with .html extension)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Site configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// HTML template (overrides the configured one)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let template = cli
        .template
        .unwrap_or_else(|| config.paths.template.clone());

    match cli.input {
        Some(input) => {
            let output = cli.output.unwrap_or_else(|| input.with_extension("html"));
            if let Err(e) = site::generate_page(&input, &template, &output) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            println!("Created {}", output.display());
        }
        None => build_site(&config, &template),
    }
}

fn build_site(config: &Config, template: &Path) {
    let paths = &config.paths;

    match site::copy_static(&paths.static_dir, &paths.output) {
        Ok(count) => log::info!("Copied {} static files", count),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let pages = match site::generate_pages(&paths.content, template, &paths.output) {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Created {} pages in {}", pages.len(), paths.output.display());
}
