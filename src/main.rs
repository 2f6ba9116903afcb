use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use replydoc::Config;

const LOCAL_CONFIG: &str = "replydoc.toml";

#[derive(Parser)]
#[command(name = "replydoc")]
#[command(about = "Render generated reply text as a structured document")]
struct Cli {
    /// File holding the reply text (reads stdin when absent or "-")
    input: Option<PathBuf>,

    /// Output file (PDF defaults to the input name with .pdf, text formats to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to produce
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// Config file (defaults to ./replydoc.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Pdf,
    Typst,
    Json,
    Markup,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = cli.input.filter(|path| path != Path::new("-"));
    let text = read_input(input.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    log::info!("rendering {} as {:?}", describe(input.as_deref()), cli.format);

    match cli.format {
        Format::Pdf => {
            let pdf_bytes = replydoc::reply_to_pdf_with_config(&text, &config)?;
            let output = cli.output.unwrap_or_else(|| match &input {
                Some(path) => path.with_extension("pdf"),
                None => PathBuf::from("reply.pdf"),
            });
            fs::write(&output, pdf_bytes)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Created {}", output.display());
        }
        Format::Typst => {
            let typst = replydoc::reply_to_typst_with_config(&text, &config);
            write_text(cli.output.as_deref(), &typst)?;
        }
        Format::Json => {
            let doc = replydoc::parse(&text);
            let json = serde_json::to_string_pretty(&doc)?;
            write_text(cli.output.as_deref(), &(json + "\n"))?;
        }
        Format::Markup => {
            let markup = replydoc::to_markup(&replydoc::parse(&text));
            write_text(cli.output.as_deref(), &markup)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load_from_path(path)?
            .with_context(|| format!("config file {} not found", path.display()));
    }

    match Config::load_from_path(LOCAL_CONFIG)? {
        Some(config) => {
            log::info!("using {}", LOCAL_CONFIG);
            Ok(config)
        }
        None => Ok(Config::compiled_default()),
    }
}

fn write_text(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => io::stdout().write_all(content.as_bytes())?,
    }
    Ok(())
}

fn describe(input: Option<&Path>) -> String {
    input.map_or_else(|| "stdin".to_string(), |path| path.display().to_string())
}
