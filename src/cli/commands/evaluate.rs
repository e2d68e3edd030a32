use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::app::{AppContext, StateLock};
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::metrics::{evaluate, metrics_summary};

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Content file (markdown or plain text)
    pub file: PathBuf,

    /// SEO keyword; the first one is the primary keyword
    #[arg(long = "keyword", short = 'k')]
    pub keywords: Vec<String>,

    /// Arm the content was written with (omit to let the bandit choose)
    #[arg(long)]
    pub arm: Option<usize>,

    /// Target word count (defaults to the configured value)
    #[arg(long)]
    pub target_length: Option<usize>,

    /// Optional bandit state path
    #[arg(long)]
    pub state: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &EvaluateArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)?;
    let target_length = ctx.config.metrics.check_target_length(
        args.target_length
            .unwrap_or(ctx.config.metrics.default_target_length),
    )?;
    let path = ctx.state_path(args.state.as_deref());

    let _lock = StateLock::acquire(&path)?;
    let mut bandit = ctx.open_bandit(&path)?;
    let selection = bandit.select(args.arm)?;

    let evaluation = evaluate(&content, &args.keywords, target_length, selection.action);
    bandit.update(selection.action, evaluation.reward)?;
    bandit.save_state(&path)?;
    info!(
        arm = selection.action,
        decision = selection.decision.label(),
        seo_score = evaluation.seo_score,
        reward = evaluation.reward,
        "content evaluated"
    );

    let summary = metrics_summary(evaluation.seo_score, &evaluation.engagement);
    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "selection": selection,
            "summary": summary,
            "q_value": bandit.q_values()[selection.action],
            "best_action": bandit.get_best_action(),
        })));
    }

    let engagement = &summary.engagement;
    let mut layout = HumanLayout::new();
    layout
        .title("Evaluation")
        .kv("Arm", &selection.action.to_string())
        .kv("Decision", selection.decision.label())
        .kv("SEO score", &format!("{:.1}", summary.seo_score))
        .kv("Grade", summary.quality_grade.label())
        .kv("Reward", &format!("{:.4}", summary.reward))
        .blank()
        .section("Engagement (simulated)")
        .kv("CTR", &format!("{:.2}%", engagement.ctr * 100.0))
        .kv("Time on page", &format!("{:.0}s", engagement.time_on_page))
        .kv("Search position", &format!("{:.1}", engagement.search_position))
        .kv("Bounce rate", &format!("{:.1}%", engagement.bounce_rate * 100.0))
        .blank()
        .section("Recommendations");
    for recommendation in &summary.recommendations {
        layout.bullet(recommendation);
    }
    layout
        .blank()
        .kv("Arm Q-value", &format!("{:.4}", bandit.q_values()[selection.action]))
        .kv("Best arm", &bandit.get_best_action().to_string());
    emit_human(layout);
    Ok(())
}
