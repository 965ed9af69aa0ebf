use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use vectorkit::core::thread_safe;
use vectorkit::designer::{EditorState, EditorStore, GroupTransform, SelectionTransformer, Viewport};
use vectorkit::{default_config_path, init_logging, EditorConfig, BUILD_DATE, VERSION};

const USAGE: &str = "usage: vectorkit [--config FILE] [INPUT.svg]";

/// Rotation applied to the whole document.
const DEMO_ROTATION: f64 = 15.0;

struct Args {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = Args {
        config: None,
        input: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("vectorkit {VERSION} ({BUILD_DATE})");
                return Ok(None);
            }
            "-c" | "--config" => {
                let path = iter.next().context("--config needs a file")?;
                args.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => bail!("unknown option {flag}\n{USAGE}"),
            _ if args.input.is_some() => bail!("only one input file is accepted\n{USAGE}"),
            path => args.input = Some(PathBuf::from(path)),
        }
    }
    Ok(Some(args))
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<EditorConfig> {
    let path = match explicit {
        Some(path) => path,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(EditorConfig::default()),
        },
    };
    let config = EditorConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let config = load_config(args.config)?;

    let mut store = match &args.input {
        Some(_) => EditorStore::with_config(config.clone()),
        None => EditorStore::with_state(
            EditorState::demo(Viewport::new(&config.viewport)),
            config.clone(),
        ),
    };
    if let Some(input) = &args.input {
        let svg = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        store
            .import_svg(&svg)
            .with_context(|| format!("Failed to import {}", input.display()))?;
    }
    store.select_all();

    let store = thread_safe(store);
    let transformer = SelectionTransformer::new(store.clone(), &config);
    let count = transformer
        .apply_gesture(GroupTransform::rotate(DEMO_ROTATION), None, None)
        .await?;
    transformer.flush().await;
    info!(count, rotation = DEMO_ROTATION, "Rotated document");

    print!("{}", store.lock().export_svg());
    Ok(())
}
