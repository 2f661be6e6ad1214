//! fm - match engine CLI
//!
//! 배치 시뮬레이션, 골 비율 보정, 시즌 성장 실행, 라이브 중계

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fm_core::api::MatchRequest;
use fm_core::data::{demo_match, generate_squad};
use fm_core::models::{MatchResult, MatchSetup, TeamSide};
use fm_core::{
    sample_goal_rate, simulate_match_json, DevelopmentConfig, DevelopmentProcessor, EngineConfig,
    LiveMatchController, LivePhase, MatchEngine, MatchSpeed, SimulcastCoordinator, Tactic,
    TickReport,
};

#[derive(Parser)]
#[command(name = "fm")]
#[command(version, about = "Probabilistic football match engine", long_about = None)]
struct Cli {
    /// Force debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match in batch mode
    Simulate {
        /// JSON match request file (demo squads when omitted)
        #[arg(long)]
        request: Option<PathBuf>,

        /// Print the raw JSON response
        #[arg(long, default_value = "false")]
        json: bool,

        #[command(flatten)]
        fixture: FixtureArgs,
    },

    /// Sample the goal rate over many seeded matches
    Calibrate {
        /// Number of matches
        #[arg(long, default_value = "10000")]
        matches: usize,

        #[command(flatten)]
        fixture: FixtureArgs,
    },

    /// Run player development over a generated squad
    Develop {
        #[arg(long, default_value = "5")]
        seasons: u32,

        #[arg(long, default_value = "25")]
        squad_size: usize,

        #[arg(long, default_value = "1")]
        seed: u64,

        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2025-06-01")]
        start: NaiveDate,

        /// DevelopmentConfig YAML file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Drive a live match and print every tick
    Live {
        /// Game-time multiplier; 0 runs instantly
        #[arg(long, default_value = "0")]
        speed: f32,

        /// Stop at half-time until Enter is pressed
        #[arg(long, default_value = "false")]
        pause_at_half_time: bool,

        /// Home tactic switch at the given minute, e.g. 60:attacking
        #[arg(long)]
        home_tactic_at: Option<String>,

        #[command(flatten)]
        fixture: FixtureArgs,
    },

    /// Play several live matches in lockstep and print the scoreboard
    Simulcast {
        #[arg(long, default_value = "6")]
        matches: u64,

        #[command(flatten)]
        fixture: FixtureArgs,
    },
}

#[derive(clap::Args, Clone)]
struct FixtureArgs {
    #[arg(long, default_value = "42")]
    seed: u64,

    #[arg(long, default_value = "70")]
    home_skill: u8,

    #[arg(long, default_value = "70")]
    away_skill: u8,

    /// Play at a neutral venue
    #[arg(long, default_value = "false")]
    neutral: bool,

    #[arg(long, value_enum, default_value = "realistic")]
    preset: Preset,

    /// EngineConfig YAML file (replaces the preset)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Realistic,
    Arcade,
    Simulation,
    Minimal,
}

impl FixtureArgs {
    fn engine_config(&self) -> Result<EngineConfig> {
        if let Some(path) = &self.config {
            let yaml = read_file(path)?;
            return EngineConfig::from_yaml_str(&yaml)
                .with_context(|| format!("Invalid engine config {}", path.display()));
        }
        Ok(match self.preset {
            Preset::Realistic => EngineConfig::realistic(),
            Preset::Arcade => EngineConfig::arcade(),
            Preset::Simulation => EngineConfig::simulation(),
            Preset::Minimal => EngineConfig::minimal(),
        })
    }

    fn setup(&self) -> Result<MatchSetup> {
        let setup = demo_match(self.home_skill, self.away_skill)?;
        Ok(if self.neutral { setup.neutral_venue() } else { setup })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate { request, json, fixture } => run_simulate(request, json, &fixture),
        Commands::Calibrate { matches, fixture } => run_calibrate(matches, &fixture),
        Commands::Develop { seasons, squad_size, seed, start, config } => {
            run_develop(seasons, squad_size, seed, start, config)
        }
        Commands::Live { speed, pause_at_half_time, home_tactic_at, fixture } => {
            run_live(speed, pause_at_half_time, home_tactic_at, &fixture)
        }
        Commands::Simulcast { matches, fixture } => run_simulcast(matches, &fixture),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

// ============================================================================
// simulate
// ============================================================================

fn run_simulate(request: Option<PathBuf>, json: bool, fixture: &FixtureArgs) -> Result<()> {
    if let Some(path) = request {
        let text = read_file(&path)?;
        if json {
            println!("{}", simulate_match_json(&text)?);
            return Ok(());
        }
        let request: MatchRequest = serde_json::from_str(&text).context("Invalid match request")?;
        let (setup, config, seed) = request.into_setup()?;
        let result = MatchEngine::new(setup.clone(), config, seed)?.simulate();
        print_result(&setup, &result);
        return Ok(());
    }

    let setup = fixture.setup()?;
    let result = MatchEngine::new(setup.clone(), fixture.engine_config()?, fixture.seed)?.simulate();
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&setup, &result);
    }
    Ok(())
}

fn print_result(setup: &MatchSetup, result: &MatchResult) {
    println!("{} {} {}  (FT {}')", result.home_team, result.score, result.away_team, result.minute);
    println!();
    for event in &result.events {
        let name = setup.player(event.player_id).map(|p| p.name.as_str()).unwrap_or("?");
        let team = setup.sheet(event.side).name.as_str();
        println!("  {:<40} {} / {}", event.describe(), team, name);
    }
    println!();
    println!("Ratings:");
    for side in TeamSide::BOTH {
        let mut rated: Vec<_> = result.player_stats.iter().filter(|(_, s)| s.side == side).collect();
        rated.sort_by(|a, b| b.1.rating.total_cmp(&a.1.rating));
        println!("  {}", setup.sheet(side).name);
        for (id, stats) in rated.into_iter().take(5) {
            let name = setup.player(*id).map(|p| p.name.as_str()).unwrap_or("?");
            println!("    {:<20} {:>4.1}  {}'", name, stats.rating, stats.minutes);
        }
    }
    println!();
    println!("event log sha256: {}", result.event_log_digest());
}

// ============================================================================
// calibrate
// ============================================================================

fn run_calibrate(matches: usize, fixture: &FixtureArgs) -> Result<()> {
    let setup = fixture.setup()?;
    let config = fixture.engine_config()?;
    let started = Instant::now();
    let sample = sample_goal_rate(&setup, &config, fixture.seed, matches)?;
    println!("{}", sample);
    println!("elapsed: {:.2?}", started.elapsed());
    if matches > 0 && !sample.within(2.0, 3.0) {
        println!("warning: mean goals outside the 2.0-3.0 band");
    }
    Ok(())
}

// ============================================================================
// develop
// ============================================================================

fn run_develop(
    seasons: u32,
    squad_size: usize,
    seed: u64,
    start: NaiveDate,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(path) => DevelopmentConfig::from_yaml_str(&read_file(&path)?)?,
        None => DevelopmentConfig::default(),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut squad = generate_squad(1, squad_size, &config.valuation, &mut rng);
    let mut processor = DevelopmentProcessor::new(config, rng, start);

    let Some(end) = start.with_year(start.year() + seasons as i32) else {
        bail!("Cannot advance {} seasons from {}", seasons, start);
    };
    let report = processor.advance_to(end, &mut squad);
    info!("Advanced {} weeks to {}", report.weeks, end);

    for (i, season) in report.seasons.iter().enumerate() {
        println!(
            "Season {}: {} improved, {} declined, {} retired",
            i + 1,
            season.improved(),
            season.declined(),
            season.retired.len()
        );
        for p in &season.retired {
            println!("    retired: {} (age {}, skill {})", p.name, p.age, p.skill_base);
        }
    }

    squad.sort_by(|a, b| b.market_value.cmp(&a.market_value));
    println!();
    println!("{:<20} {:>3} {:>4} {:>4} {:>5} {:>12} {:>8}", "name", "age", "pos", "skl", "cond", "value", "wage");
    for p in &squad {
        println!(
            "{:<20} {:>3} {:>4} {:>4} {:>5} {:>12} {:>8}",
            p.name,
            p.age,
            p.position_main,
            p.skill_base,
            p.condition.arrow(),
            p.market_value,
            p.wage
        );
    }
    Ok(())
}

// ============================================================================
// live
// ============================================================================

fn parse_tactic_change(arg: &str) -> Result<(u8, Tactic)> {
    let Some((minute, tactic)) = arg.split_once(':') else {
        bail!("Expected MINUTE:TACTIC, got {arg}");
    };
    let minute: u8 = minute.parse().with_context(|| format!("Bad minute in {arg}"))?;
    let tactic: Tactic = tactic.parse().map_err(anyhow::Error::msg)?;
    Ok((minute, tactic))
}

fn print_tick(report: &TickReport) {
    println!("{:>3}' {}", report.minute, report.score);
    for event in &report.events {
        println!("      {}", event.describe());
    }
    if report.half_time {
        println!("  -- half time --");
    }
}

fn run_live(
    speed: f32,
    pause_at_half_time: bool,
    home_tactic_at: Option<String>,
    fixture: &FixtureArgs,
) -> Result<()> {
    let mut tactic_change = home_tactic_at.as_deref().map(parse_tactic_change).transpose()?;

    let mut controller = LiveMatchController::new(fixture.setup()?, fixture.engine_config()?, fixture.seed)?;
    controller.set_pause_at_half_time(pause_at_half_time);
    controller.on_tick(print_tick);
    controller.on_match_end(|result| println!("Full time: {} {} {}", result.home_team, result.score, result.away_team));
    controller.set_speed(if speed > 0.0 { MatchSpeed::Accelerated(speed) } else { MatchSpeed::Instant });
    controller.kick_off();

    let mut last = Instant::now();
    while !controller.is_finished() {
        if let Some((minute, tactic)) = tactic_change {
            if controller.minute() >= minute {
                if controller.change_tactic(TeamSide::Home, tactic) {
                    println!("  home switches to {}", tactic.display_name());
                }
                tactic_change = None;
            }
        }

        if controller.phase() == LivePhase::HalfTimeBreak {
            println!("Press Enter to start the second half");
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            controller.resume_second_half();
            last = Instant::now();
        }

        match controller.tick_interval() {
            Some(interval) => std::thread::sleep(interval.min(Duration::from_millis(200))),
            None => debug!("Instant speed: running remaining ticks"),
        }
        let now = Instant::now();
        controller.advance(now - last);
        last = now;
    }
    Ok(())
}

// ============================================================================
// simulcast
// ============================================================================

fn run_simulcast(matches: u64, fixture: &FixtureArgs) -> Result<()> {
    let config = fixture.engine_config()?;
    let mut simulcast = SimulcastCoordinator::new();
    for i in 0..matches {
        let setup = fixture.setup()?;
        simulcast.add(LiveMatchController::new(setup, config.clone(), fixture.seed.wrapping_add(i))?);
    }

    while !simulcast.all_finished() {
        let reports = simulcast.step_all();
        if reports.is_empty() {
            simulcast.resume_all_second_half();
            continue;
        }
        for (idx, report) in reports.iter().filter(|(_, r)| !r.events.is_empty()) {
            for event in &report.events {
                println!("[{}] {}", idx, event.describe());
            }
        }
        if reports.iter().any(|(_, r)| r.half_time) {
            println!("-- half time --");
            for line in simulcast.scoreboard() {
                println!("{}", line);
            }
        }
    }

    println!("-- full time --");
    for line in simulcast.scoreboard() {
        println!("{}", line);
    }
    Ok(())
}
