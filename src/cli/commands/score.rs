use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::metrics::{calculate_seo_score, seo_breakdown};

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Content file (markdown or plain text)
    pub file: PathBuf,

    /// SEO keyword; the first one is the primary keyword
    #[arg(long = "keyword", short = 'k')]
    pub keywords: Vec<String>,

    /// Target word count (defaults to the configured value)
    #[arg(long)]
    pub target_length: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &ScoreArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)?;
    let target_length = ctx.config.metrics.check_target_length(
        args.target_length
            .unwrap_or(ctx.config.metrics.default_target_length),
    )?;

    let score = calculate_seo_score(&content, &args.keywords, target_length);
    let breakdown = seo_breakdown(&content, &args.keywords, target_length);

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "file": args.file.display().to_string(),
            "target_length": target_length,
            "seo_score": score,
            "breakdown": breakdown,
        })));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("SEO Score")
        .kv("File", &args.file.display().to_string())
        .kv("Score", &format!("{score:.1}/100"))
        .blank()
        .section("Breakdown")
        .kv("Words", &breakdown.word_count.to_string())
        .kv("Length", &format!("{:.0}/25", breakdown.length))
        .kv("Keyword density", &format!("{:.0}/30", breakdown.keyword_density))
        .kv("Keyword placement", &format!("{:.0}/15", breakdown.keyword_placement))
        .kv("Structure", &format!("{:.0}/10", breakdown.structure))
        .kv("Paragraphs", &format!("{:.0}/10", breakdown.paragraph_balance))
        .kv("Call to action", &format!("{:.0}/10", breakdown.call_to_action));
    emit_human(layout);
    Ok(())
}
