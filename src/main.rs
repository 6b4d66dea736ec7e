use clap::{Parser, Subcommand};
use imgop::config::{self, ServiceConfig};
use imgop::imaging::{Dimensions, ImageBackend, RustBackend, lookup};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imgop")]
#[command(about = "HTTP service applying fixed image transforms to uploads")]
#[command(long_about = "\
HTTP service applying fixed image transforms to uploads

POST a multipart form to /process with two fields:

  file        the image (PNG, JPEG, WebP, TIFF, BMP, GIF)
  operation   one of the names listed by 'imgop operations'

The response is JSON with the original and processed image, each a
base64-encoded PNG:

  {\"original_image\": \"iVBOR...\", \"processed_image\": \"iVBOR...\"}

Run 'imgop gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (TOML); stock defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config)
    #[arg(long, env = "IMGOP_HOST", global = true)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(long, env = "IMGOP_PORT", global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Apply one operation to a local file and write the result as PNG
    Apply {
        /// Operation name
        #[arg(long, short)]
        operation: String,
        /// Input image
        input: PathBuf,
        /// Output PNG path
        output: PathBuf,
    },
    /// List the available operation names
    Operations,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let mut config = config::load_config(cli.config.as_deref())?;
            if let Some(host) = cli.host {
                config.server.host = host;
            }
            if let Some(port) = cli.port {
                config.server.port = port;
            }
            config.validate()?;
            init_tracing(&config);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(imgop::server::serve(&config))?;
        }
        Command::Apply {
            operation,
            input,
            output,
        } => {
            let operation =
                lookup(&operation).ok_or_else(|| format!("Unknown operation: {operation}"))?;
            let backend = RustBackend::new();
            let original = backend.decode(&std::fs::read(&input)?)?;
            let processed = backend.apply(operation, &original)?;
            std::fs::write(&output, backend.encode_png(&processed)?)?;
            let Dimensions { width, height } = Dimensions::of(&processed);
            println!(
                "{} → {} ({}, {}x{})",
                input.display(),
                output.display(),
                operation,
                width,
                height
            );
        }
        Command::Operations => {
            for op in imgop::imaging::Operation::ALL {
                println!("{}", op);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the fmt subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(config: &ServiceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .init();
}
