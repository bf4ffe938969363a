use std::path::PathBuf;

use clap::{Parser, Subcommand};
use langtree::{ResourceManager, SaveRequest, infer_name_info};
use langtree_cli::{load_options, render_detection, render_tree};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML config with `extra_locales` and `plugins`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra locale code to recognize (repeatable)
    #[arg(long = "locale", global = true)]
    locales: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk a folder and show its translation groups.
    Tree {
        /// The folder to walk
        dir: PathBuf,

        /// Print the walk result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse one file and print its data as JSON.
    Parse {
        /// The file to parse
        file: PathBuf,
    },

    /// Merge new data into a file, keeping everything else it contains.
    Save {
        /// The file to update
        file: PathBuf,

        /// Update as inline JSON
        #[arg(long, conflicts_with = "data_file", required_unless_present = "data_file")]
        data: Option<String>,

        /// Update read from a JSON file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Show the prefix and language inferred from file names.
    Detect {
        /// File names to inspect
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List format plugins in resolution order.
    Plugins,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = load_options(args.config.as_deref(), args.locales).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    });
    let manager = ResourceManager::from_options(&options).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    });

    if let Err(e) = run(args.commands, &manager).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, manager: &ResourceManager) -> Result<(), String> {
    match command {
        Commands::Tree { dir, json } => {
            let nodes = manager
                .load_folder(&dir)
                .await
                .map_err(|e| format!("Cannot load {}: {}", dir.display(), e))?;
            if json {
                let output = serde_json::to_string_pretty(&nodes).map_err(|e| e.to_string())?;
                println!("{}", output);
            } else {
                print!("{}", render_tree(&nodes));
            }
        }
        Commands::Parse { file } => {
            let data = manager
                .parse_file(&file)
                .await
                .ok_or_else(|| format!("Cannot parse {}", file.display()))?;
            let output = serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?;
            println!("{}", output);
        }
        Commands::Save {
            file,
            data,
            data_file,
        } => {
            let raw = match (data, data_file) {
                (Some(data), _) => data,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?,
                (None, None) => return Err("Either --data or --data-file is required".to_string()),
            };
            let update: Value =
                serde_json::from_str(&raw).map_err(|e| format!("Invalid update JSON: {}", e))?;

            let request = SaveRequest::new(&file, update);
            if !manager.save_file(&request).await {
                return Err(format!("Failed to save {}", file.display()));
            }
            println!("Saved {}", file.display());
        }
        Commands::Detect { names } => {
            for name in names {
                let info = infer_name_info(&name, manager.oracle());
                println!("{}", render_detection(&name, &info));
            }
        }
        Commands::Plugins => {
            for plugin in manager.registry().iter() {
                println!("{}: {}", plugin.name(), plugin.file_extensions().join(", "));
            }
        }
    }
    Ok(())
}
