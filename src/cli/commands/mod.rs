//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod bandit;
pub mod evaluate;
pub mod score;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Bandit(args) => bandit::run(ctx, args),
        Commands::Score(args) => score::run(ctx, args),
        Commands::Evaluate(args) => evaluate::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and drive the strategy bandit
    Bandit(bandit::BanditArgs),

    /// Compute the SEO score of a content file
    Score(score::ScoreArgs),

    /// Score a content file, simulate engagement, and feed the reward back
    Evaluate(evaluate::EvaluateArgs),
}
