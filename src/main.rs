//! PixelVoid headless runner
//!
//! Plays one autopiloted round at a fixed frame rate and prints the result.
//! Useful for balance checks and for watching the simulation in the logs
//! (`RUST_LOG=debug`).

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, bail};
    use clap::Parser;

    use pixel_void::commentary::commentary_or_fallback;
    use pixel_void::sim::{Snapshot, ThemeKind, TickInput};
    use pixel_void::{RoundConfig, Session};

    #[derive(Debug, Parser)]
    #[command(name = "pixel-void", about = "Run a headless PixelVoid round")]
    struct Args {
        /// JSON round config; missing fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// RNG seed for world generation and bot wandering
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Theme override: city, candy or cyber
        #[arg(long)]
        theme: Option<String>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print the final snapshot as JSON
        #[arg(long)]
        dump_snapshot: bool,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                RoundConfig::from_json(&json)?
            }
            None => RoundConfig::default(),
        };
        if let Some(name) = &args.theme {
            let Some(theme) = ThemeKind::parse(name) else {
                bail!("unknown theme {name:?}");
            };
            config.theme = theme;
        }
        if !(args.fps > 0.0) {
            bail!("fps must be positive");
        }

        let mut session = Session::new(config, args.seed)?;
        log::info!(
            "Playing {} on a {}x{} map for {}s",
            session.round.theme().name,
            session.round.config.map_width,
            session.round.config.map_height,
            session.round.config.round_duration
        );

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let frame_dt = 1.0 / args.fps;
        let mut last: Option<Snapshot> = None;
        let mut last_second = session.time_left.ceil();
        while let Some(snapshot) = session.advance(&input, frame_dt) {
            if session.time_left.ceil() < last_second {
                last_second = session.time_left.ceil();
                if last_second as u32 % 10 == 0 {
                    let stats = session.stats();
                    log::info!(
                        "{}s left: score {}, rank {}, zoom {:.2}",
                        last_second,
                        stats.score,
                        stats.rank,
                        session.zoom
                    );
                }
            }
            last = Some(snapshot);
        }

        let stats = session.stats();
        let won = stats.won();
        println!("{}", if won { "VICTORY" } else { "GAME OVER" });
        println!("rank:  #{}", stats.rank);
        println!("score: {} pts", stats.score);
        println!("kills: {}", stats.kills);
        println!("mass:  {} kg", stats.max_size);

        let comment = futures::executor::block_on(commentary_or_fallback(None, stats, won));
        println!("\n{comment}");

        if args.dump_snapshot {
            if let Some(snapshot) = last {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is embedded by a web host; there is no standalone binary
}
