//! Train command - Self-play training with a summary report

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::LearnerArgs,
        output::{format_number, format_percent, print_kv, print_section},
    },
    learning::Learner,
    pipeline::{
        CsvObserver, MilestoneObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train the learner by self-play")]
pub struct TrainArgs {
    /// Number of self-play games
    #[arg(long, short = 'g', default_value_t = 15)]
    pub games: usize,

    #[command(flatten)]
    pub learner: LearnerArgs,

    /// Which player opens each game (`x` or `o`)
    #[arg(long, default_value_t = Player::X)]
    pub first_player: Player,

    /// Optional file for a per-game CSV log
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Log a results line every N games
    #[arg(long, default_value_t = 1000)]
    pub milestone_interval: usize,
}

/// Run self-play training for `config`, attaching the requested observers.
pub fn train_learner(
    learner: &mut Learner,
    config: TrainingConfig,
    csv: Option<&PathBuf>,
    progress: bool,
    milestone_interval: usize,
) -> Result<TrainingResult> {
    let mut pipeline =
        TrainingPipeline::new(config).with_observer(Box::new(MilestoneObserver::new(milestone_interval)));
    if progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = csv {
        let observer = CsvObserver::new(path)
            .with_context(|| format!("creating CSV log {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }
    Ok(pipeline.run(learner)?)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let learner_config = args.learner.resolve()?;
    let mut learner = Learner::new(learner_config);

    let config = TrainingConfig {
        num_games: args.games,
        first_player: args.first_player,
    };
    let result = train_learner(
        &mut learner,
        config,
        args.csv.as_ref(),
        !args.no_progress,
        args.milestone_interval,
    )?;

    print_section("Training Summary");
    print_kv("Games", &format_number(result.total_games));
    print_kv(
        "X wins",
        &format!("{} ({})", format_number(result.x_wins), format_percent(result.x_win_rate())),
    );
    print_kv(
        "O wins",
        &format!("{} ({})", format_number(result.o_wins), format_percent(result.o_win_rate())),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", format_number(result.draws), format_percent(result.draw_rate())),
    );
    if result.exhausted > 0 {
        print_kv("Exhausted", &format_number(result.exhausted));
    }
    print_kv("Mean length", &format!("{:.2} plies", result.mean_length()));

    let stats = learner.stats();
    print_kv("States", &format_number(stats.registered_states));
    print_kv("Pools", &format_number(stats.pools));
    print_kv("Pool entries", &format_number(stats.pool_entries));
    print_kv("Exhaustion", &learner.store().exhaustion().to_string());
    let identity = if learner.registry().is_deduplicating() {
        "shared by layout"
    } else {
        "per move path"
    };
    print_kv("State identity", identity);

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("writing summary {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }
    if let Some(path) = &args.csv {
        println!("Game log written to {}", path.display());
    }

    Ok(())
}
