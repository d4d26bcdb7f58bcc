#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{bail, Context};
#[cfg(not(target_arch = "wasm32"))]
use blockfall::{GameEvent, GameSettings, Input, PieceKind, RandomizerKind, Session};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Plays a scripted game without a display and prints the final board.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
struct Opts {
    /// Comma-separated inputs: left, right, down, rotate, drop, start, wait
    #[arg(long, default_value = "")]
    script: String,
    /// Settings JSON file; flags below override its randomizer
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the uniform piece draw
    #[arg(long)]
    seed: Option<u64>,
    /// Deal only this piece (I, J, L, O, S, T, Z)
    #[arg(long)]
    piece: Option<String>,
    /// Milliseconds of simulated time per frame
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
    /// Extra input-free frames after the script
    #[arg(long, default_value_t = 0)]
    settle_frames: u32,
    /// Print the JSON snapshot instead of the ASCII board
    #[arg(long)]
    json: bool,
}

#[cfg(not(target_arch = "wasm32"))]
enum Step {
    Press(Input),
    Wait,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_script(script: &str) -> anyhow::Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|token| {
            if token.eq_ignore_ascii_case("wait") {
                Ok(Step::Wait)
            } else {
                token
                    .parse::<Input>()
                    .map(Step::Press)
                    .map_err(anyhow::Error::msg)
            }
        })
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_piece(name: &str) -> anyhow::Result<PieceKind> {
    let kind = PieceKind::all()
        .into_iter()
        .find(|k| format!("{k:?}").eq_ignore_ascii_case(name));
    match kind {
        Some(k) => Ok(k),
        None => bail!("unknown piece `{name}`"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(opts: &Opts) -> anyhow::Result<GameSettings> {
    let mut settings = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GameSettings::default(),
    };
    if let Some(name) = &opts.piece {
        settings.randomizer = RandomizerKind::SinglePiece {
            piece: parse_piece(name)?,
        };
    } else if opts.seed.is_some() {
        settings.randomizer = RandomizerKind::Uniform { seed: opts.seed };
    }
    settings.validate().map_err(anyhow::Error::msg)?;
    Ok(settings)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    if !(opts.frame_ms.is_finite() && opts.frame_ms > 0.0) {
        bail!("--frame-ms must be positive");
    }
    let settings = load_settings(&opts)?;
    let steps = parse_script(&opts.script)?;

    let mut session = Session::with_settings(settings);
    let mut now = 0.0;
    session.start(now);

    let settle = (0..opts.settle_frames).map(|_| Step::Wait);
    for step in steps.into_iter().chain(settle) {
        if let Step::Press(input) = step {
            session.handle_input(input);
        }
        now += opts.frame_ms;
        if session.scheduler().is_pending() {
            session.tick(now);
        }
        for event in session.take_events() {
            match event {
                GameEvent::PieceLocked { lines, points } if lines > 0 => {
                    println!("cleared {lines} line(s) for {points}");
                }
                GameEvent::GameOver { score } => println!("game over, final score {score}"),
                GameEvent::PieceLocked { .. } => {}
            }
        }
    }

    let view = session.snapshot();
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.render_ascii());
    }
    Ok(())
}
