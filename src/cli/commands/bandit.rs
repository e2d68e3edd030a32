use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::app::{AppContext, StateLock};
use crate::bandit::{Bandit, Selection};
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct BanditArgs {
    #[command(subcommand)]
    pub command: BanditCommand,
}

#[derive(Subcommand, Debug)]
pub enum BanditCommand {
    /// Show bandit statistics
    Stats(StateArgs),

    /// Pick the next arm
    Select(SelectArgs),

    /// Apply an observed reward to an arm
    Record(RecordArgs),

    /// Reset learned state, keeping the configuration
    Reset(StateArgs),
}

#[derive(Args, Debug, Default)]
pub struct StateArgs {
    /// Optional bandit state path
    #[arg(long)]
    pub state: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct SelectArgs {
    /// Force a specific arm instead of asking the policy
    #[arg(long)]
    pub force: Option<usize>,

    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Arm that produced the content
    pub arm: usize,

    /// Observed reward
    pub reward: f64,

    #[command(flatten)]
    pub state: StateArgs,
}

pub fn run(ctx: &AppContext, args: &BanditArgs) -> Result<()> {
    match &args.command {
        BanditCommand::Stats(args) => stats(ctx, args),
        BanditCommand::Select(args) => select(ctx, args),
        BanditCommand::Record(args) => record(ctx, args),
        BanditCommand::Reset(args) => reset(ctx, args),
    }
}

fn stats(ctx: &AppContext, args: &StateArgs) -> Result<()> {
    let path = ctx.state_path(args.state.as_deref());
    let bandit = ctx.open_bandit(&path)?;
    let stats = bandit.get_statistics();

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "path": path.display().to_string(),
            "n_arms": bandit.n_arms(),
            "learning_rate": bandit.learning_rate(),
            "history_len": bandit.history().len(),
            "statistics": stats,
        })));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Bandit Stats")
        .section("State")
        .kv("Path", &path.display().to_string())
        .kv("Total actions", &stats.total_actions.to_string())
        .kv("Total reward", &format!("{:.4}", stats.total_reward))
        .kv("Average reward", &format!("{:.4}", stats.avg_reward))
        .kv("Best arm", &stats.best_action.to_string())
        .kv("Best Q-value", &format!("{:.4}", stats.best_q_value))
        .blank()
        .section("Config")
        .kv("Arms", &bandit.n_arms().to_string())
        .kv("Epsilon", &format!("{:.3}", stats.epsilon))
        .kv(
            "Learning rate",
            &bandit
                .learning_rate()
                .map_or_else(|| "(sample mean)".to_string(), |rate| format!("{rate:.3}")),
        )
        .blank()
        .section("Arms");

    for (arm, (q_value, count)) in stats
        .q_values
        .iter()
        .zip(&stats.action_counts)
        .enumerate()
    {
        layout.kv(
            &format!("Arm {arm}"),
            &format!(
                "q={q_value:.4} n={count} share={:.1}%",
                stats.action_probabilities[arm] * 100.0
            ),
        );
    }

    emit_human(layout);
    Ok(())
}

fn select(ctx: &AppContext, args: &SelectArgs) -> Result<()> {
    let path = ctx.state_path(args.state.state.as_deref());
    let bandit = ctx.open_bandit(&path)?;
    let selection = bandit.select(args.force)?;
    emit_selection(ctx, &bandit, selection)
}

fn emit_selection(ctx: &AppContext, bandit: &Bandit, selection: Selection) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "selection": selection,
            "best_action": bandit.get_best_action(),
        })));
    }
    let mut layout = HumanLayout::new();
    layout
        .title("Selection")
        .kv("Arm", &selection.action.to_string())
        .kv("Decision", selection.decision.label())
        .kv("Best arm", &bandit.get_best_action().to_string());
    emit_human(layout);
    Ok(())
}

fn record(ctx: &AppContext, args: &RecordArgs) -> Result<()> {
    let path = ctx.state_path(args.state.state.as_deref());
    let _lock = StateLock::acquire(&path)?;
    let mut bandit = ctx.open_bandit(&path)?;
    bandit.update(args.arm, args.reward)?;
    bandit.save_state(&path)?;

    let q_value = bandit.q_values()[args.arm];
    let count = bandit.action_counts()[args.arm];
    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "path": path.display().to_string(),
            "arm": args.arm,
            "reward": args.reward,
            "q_value": q_value,
            "count": count,
        })));
    }
    let mut layout = HumanLayout::new();
    layout
        .title("Reward Recorded")
        .kv("Arm", &args.arm.to_string())
        .kv("Reward", &format!("{:.4}", args.reward))
        .kv("Q-value", &format!("{q_value:.4}"))
        .kv("Count", &count.to_string());
    emit_human(layout);
    Ok(())
}

fn reset(ctx: &AppContext, args: &StateArgs) -> Result<()> {
    let path = ctx.state_path(args.state.as_deref());
    let _lock = StateLock::acquire(&path)?;
    // Built from configuration; the old snapshot is never read.
    let bandit = ctx.config.bandit.build()?;
    bandit.save_state(&path)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "reset": true,
            "path": path.display().to_string(),
        })));
    }
    let mut layout = HumanLayout::new();
    layout
        .title("Bandit Reset")
        .kv("Path", &path.display().to_string())
        .kv("Reset", "true");
    emit_human(layout);
    Ok(())
}
