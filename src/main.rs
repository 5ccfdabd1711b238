//! `chartmark` - replay a pointer gesture script through the shape editor.
//!
//! ```sh
//! chartmark script.json [--settings settings.json]
//! ```
//!
//! The script supplies the chart scales, the starting collection and a list
//! of device events. The resulting collection is printed as JSON on stdout.

use anyhow::{Context, Result, bail};
use chartmark::settings::default_settings_path;
use chartmark::{
    ChartScales, EditorHost, EditorSettings, InteractionContext, PointerEvent, Shape,
    ShapeCollection, ShapeEditor,
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    scales: ChartScales,
    #[serde(default)]
    x_samples: Vec<f64>,
    #[serde(default)]
    shapes: Vec<Shape>,
    events: Vec<ScriptEvent>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ScriptEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Lost,
}

/// Host that adopts every committed collection.
struct ReplayHost {
    shapes: ShapeCollection,
    commits: usize,
}

impl EditorHost for ReplayHost {
    fn on_start(&mut self) {
        debug!("draw started");
    }

    fn on_complete(
        &mut self,
        shapes: ShapeCollection,
        _ctx: &InteractionContext<'_>,
        _event: Option<&PointerEvent>,
    ) {
        self.commits += 1;
        self.shapes = shapes;
    }

    fn on_hover(&mut self, shape: &Shape, hovering: bool) {
        debug!(shape = %shape.id, hovering, "hover");
    }
}

fn init_logging() {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,chartmark=debug"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn parse_args() -> Result<(PathBuf, Option<PathBuf>)> {
    let mut args = std::env::args().skip(1);
    let mut script = None;
    let mut settings = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings needs a path")?;
                settings = Some(PathBuf::from(path));
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            other => bail!("unexpected argument: {other}"),
        }
    }

    let script = script.context("usage: chartmark <script.json> [--settings <settings.json>]")?;
    Ok((script, settings))
}

fn main() -> Result<()> {
    init_logging();
    let (script_path, settings_path) = parse_args()?;

    let settings = match settings_path {
        Some(path) => EditorSettings::load(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => default_settings_path()
            .map(|path| EditorSettings::load_or_default(&path))
            .unwrap_or_default(),
    };

    let json = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read {}", script_path.display()))?;
    let script: Script = serde_json::from_str(&json).context("invalid gesture script")?;
    let initial = ShapeCollection::new(script.shapes).context("invalid starting collection")?;

    let mut editor = ShapeEditor::new(settings);
    let mut host = ReplayHost {
        shapes: initial,
        commits: 0,
    };
    let ctx = InteractionContext::new(&script.scales, &script.x_samples);

    for event in &script.events {
        // Handlers borrow the collection while the host may replace it
        let shapes = host.shapes.clone();
        match *event {
            ScriptEvent::Down { x, y } => {
                editor.handle_pointer_down(&shapes, &PointerEvent::at(x, y), &ctx, &mut host)
            }
            ScriptEvent::Move { x, y } => {
                editor.handle_pointer_move(&shapes, &PointerEvent::at(x, y), &ctx, &mut host)
            }
            ScriptEvent::Up { x, y } => {
                editor.handle_pointer_up(&shapes, &PointerEvent::at(x, y), &ctx, &mut host)
            }
            ScriptEvent::Lost => {
                editor.on_pointer_lost();
            }
        }
    }

    info!(
        events = script.events.len(),
        commits = host.commits,
        shapes = host.shapes.len(),
        "replay finished"
    );
    println!("{}", host.shapes.to_json_pretty()?);
    Ok(())
}
