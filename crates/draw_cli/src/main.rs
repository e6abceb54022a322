//! wc-draw CLI
//!
//! 2026 월드컵 조 추첨 시뮬레이터 (단계별 공개, 즉시 추첨, 부분 추첨 완성, 배치 검사)

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "wc-draw")]
#[command(about = "Simulate the FIFA World Cup 2026 group draw", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RNG seed (random when omitted; printed so the draw can be replayed)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Team catalog JSON (defaults to the embedded 2026 pots)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Draw rules JSON (defaults to the 2026 rules)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long, global = true, default_value = "false")]
    json: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a full draw and reveal it team by team
    Draw {
        /// Pause between two revealed teams
        #[arg(long, default_value = "400")]
        delay_ms: u64,
    },

    /// Run a full draw and print only the final groups
    Instant,

    /// Complete a partial draw
    Complete {
        /// JSON array of team-code arrays, group A first
        #[arg(long)]
        partial: PathBuf,
    },

    /// Check whether a team may go to a group
    Check {
        /// Team code (e.g. "JPN")
        #[arg(long)]
        team: String,

        /// Group letter or 0-based index
        #[arg(long)]
        group: String,

        /// Partial draw to check against (empty draw when omitted)
        #[arg(long)]
        partial: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
static CANCELLED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = draw_cli::load_engine(cli.catalog.as_deref(), cli.rules.as_deref())?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    match cli.command {
        Commands::Draw { delay_ms } => {
            let result = run_draw(&engine, seed, None)?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("🎲 Seed: {seed}");
                reveal(&result, delay_ms)?;
            }
        }

        Commands::Instant => {
            let result = run_draw(&engine, seed, None)?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("🎲 Seed: {seed}\n");
                println!("{}", draw_cli::render_groups(&result.assignment));
            }
        }

        Commands::Complete { partial } => {
            let partial = draw_cli::load_partial(&partial, &engine)?;
            let result = run_draw(&engine, seed, Some(&partial))?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("🎲 Seed: {seed}");
                println!("   Already placed: {}", partial.placed_count());
                println!("   Placed now:     {}\n", result.reveal_order.len());
                println!("{}", draw_cli::render_groups(&result.assignment));
            }
        }

        Commands::Check { team, group, partial } => {
            let state = match partial {
                Some(path) => draw_cli::load_partial(&path, &engine)?,
                None => engine.empty_assignment(),
            };
            let group = draw_cli::parse_group(&group, engine.rules().group_count)?;
            let entry = engine
                .catalog()
                .team(&team)
                .with_context(|| format!("unknown team code: {team}"))?;

            let excluded = state.group_of(&team);
            let allowed = engine.can_place(entry, group, &state, excluded);
            let legal: Vec<char> = engine
                .legal_groups(entry, &state, excluded)
                .into_iter()
                .map(draw_core::models::group_letter)
                .collect();

            if cli.json {
                let report = serde_json::json!({
                    "team": team,
                    "group": draw_core::models::group_letter(group),
                    "allowed": allowed,
                    "legal_groups": legal,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let mark = if allowed { "✅" } else { "❌" };
                println!("{mark} {} -> Group {}", entry.display(), draw_core::models::group_letter(group));
                let legal: Vec<String> = legal.iter().map(char::to_string).collect();
                println!("   Legal groups: {}", legal.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn run_draw(
    engine: &draw_core::DrawEngine,
    seed: u64,
    partial: Option<&draw_core::Assignment>,
) -> Result<draw_core::DrawResult> {
    use rand::SeedableRng;

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let result = match partial {
        Some(partial) => engine.complete(partial, &mut rng),
        None => engine.full_draw(&mut rng),
    };
    result.with_context(|| format!("❌ Draw failed (seed {seed}); try another seed or start over"))
}

#[cfg(feature = "cli")]
fn reveal(result: &draw_core::DrawResult, delay_ms: u64) -> Result<()> {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    ctrlc::set_handler(|| CANCELLED.store(true, Ordering::SeqCst))
        .context("Failed to register Ctrl+C handler")?;

    println!("🎲 Drawing {} teams...\n", result.reveal_order.len());
    let total = result.reveal_order.len();
    let mut steps = result.reveal().with_cancel(&CANCELLED);
    for step in steps.by_ref() {
        println!("{}", draw_cli::render_step(&step, total));
        std::thread::sleep(Duration::from_millis(delay_ms));
    }

    if steps.is_cancelled() {
        println!("\n⏹  Draw cancelled ({} teams not revealed)", steps.remaining());
        return Ok(());
    }

    println!("\n✅ Draw complete!\n");
    println!("{}", draw_cli::render_groups(&result.assignment));
    Ok(())
}

#[cfg(feature = "cli")]
fn print_json(result: &draw_core::DrawResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("wc-draw CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
