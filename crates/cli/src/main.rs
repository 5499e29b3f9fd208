#![deny(unsafe_code)]
//! CLI binary for koi-engine.
//!
//! Subcommands:
//! - `attributes <token>`: print the attributes derived from a token id
//! - `render <token>`: composite the koi and write a PNG
//! - `list [--variant <name>]`: print the variant catalog and the layer names it uses
//! - `check-assets`: load the asset directory, verify it, optionally warm

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use koi_engine_assets::AssetStore;
use koi_engine_core::{catalog_layer_names, generate, Category, EngineConfig, Variant, VariantKind};
use koi_engine_render::{write_png, KoiEngine};
use log::info;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "koi-engine", about = "Koi NFT attribute and image generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// JSON config file (asset_dir, warm_sizes, worker_threads, ...).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Asset directory; overrides the config file.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the attributes derived from a token id.
    Attributes {
        /// Decimal token id.
        token: String,
    },
    /// Render a token and write a PNG.
    Render {
        /// Decimal token id.
        token: String,

        /// Output edge length in pixels; defaults to the configured size.
        #[arg(short, long)]
        size: Option<u32>,

        /// Render over the primary color at thumbnail size.
        #[arg(long)]
        thumbnail: bool,

        /// Output file path.
        #[arg(short, long, default_value = "koi.png")]
        output: PathBuf,
    },
    /// List variants and the layer names they draw from.
    List {
        /// Show one variant's pattern count bounds and candidate layers.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Load and verify the asset directory.
    CheckAssets {
        /// Also pre-scale every mask to the configured sizes.
        #[arg(long)]
        warm: bool,
    },
}

fn load_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &cli.assets {
        config.asset_dir = dir.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Attributes { token } => {
            let attributes = generate(&token)?;
            if cli.json {
                let info = serde_json::json!({
                    "token": token,
                    "attributes": attributes,
                    "metadata": attributes.metadata(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Token:   {token}");
                println!("Variant: {}", attributes.variant);
                println!("Primary: {}", attributes.primary_color);
                println!("Body:    {}", attributes.body_color);
                println!("Fin:     {}", attributes.fin_color);
                println!("Patterns ({}):", attributes.pattern_quantity());
                for layer in attributes.pattern_layers() {
                    println!("  {} {}", layer.name, layer.color);
                }
            }
        }
        Command::Render {
            token,
            size,
            thumbnail,
            output,
        } => {
            let size = size.unwrap_or(if thumbnail {
                config.thumbnail_size
            } else {
                config.default_size
            });
            let engine = KoiEngine::load_assets(config)?;
            let img = if thumbnail {
                engine.render_thumbnail(&token, size)?
            } else {
                engine.render_image(&token, size)?
            };
            write_png(&img, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "token": token,
                    "size": size,
                    "thumbnail": thumbnail,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("rendered {token} ({size}x{size}) -> {}", output.display());
            }
        }
        Command::List { variant: Some(name) } => {
            let kind = VariantKind::from_name(&name)
                .ok_or_else(|| CliError::Input(format!("unknown variant: {name}")))?;
            let variant = Variant::new(kind, 0)?;
            let pools: Vec<(Category, (usize, usize), Vec<String>)> = Category::ALL
                .iter()
                .map(|&category| {
                    let layers = variant
                        .candidates(category)
                        .iter()
                        .map(|layer| layer.name.to_string())
                        .collect();
                    (category, variant.layer_count_range(category), layers)
                })
                .collect();
            if cli.json {
                let categories: Vec<serde_json::Value> = pools
                    .iter()
                    .map(|(category, (min, max), layers)| {
                        serde_json::json!({
                            "category": category,
                            "min": min,
                            "max": max,
                            "layers": layers,
                        })
                    })
                    .collect();
                let info = serde_json::json!({
                    "variant": kind,
                    "categories": categories,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{kind}:");
                for (category, (min, max), layers) in &pools {
                    println!("  {} ({min}..{max}): {}", category.as_str(), layers.join(", "));
                }
            }
        }
        Command::List { variant: None } => {
            let variants: Vec<&str> = VariantKind::ALL.iter().map(|k| k.as_str()).collect();
            let layers: Vec<String> = catalog_layer_names()
                .iter()
                .map(|name| name.to_string())
                .collect();
            if cli.json {
                let info = serde_json::json!({
                    "variants": variants,
                    "layers": layers,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Variants:");
                for name in variants {
                    println!("  {name}");
                }
                println!("Layers:");
                println!("  {}", layers.join(", "));
            }
        }
        Command::CheckAssets { warm } => {
            let store = AssetStore::load(&config.asset_dir)?;
            let masks = store.len();
            let asset_dir = config.asset_dir.display().to_string();
            let engine = KoiEngine::from_store(store, config)?;
            let warmed = if warm {
                Some(engine.warm_configured_sizes()?)
            } else {
                None
            };
            info!("asset check passed for {asset_dir}");

            if cli.json {
                let info = serde_json::json!({
                    "asset_dir": asset_dir,
                    "masks": masks,
                    "warmed_sizes": warmed.map(|s| s.sizes),
                    "scaled": warmed.map(|s| s.scaled),
                    "warm_ms": warmed.map(|s| s.elapsed.as_millis() as u64),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{asset_dir}: {masks} masks, catalog complete");
                if let Some(stats) = warmed {
                    println!(
                        "warmed {} sizes ({} masks) in {:?}",
                        stats.sizes, stats.scaled, stats.elapsed
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
