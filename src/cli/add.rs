use anyhow::Result;
use clap::Args;

use playbook::card::{CardDraft, MethodCard, ToolCalls};
use playbook::config::PlaybookConfig;
use playbook::moderation::moderate;
use playbook::store::CardStore;

#[derive(Args)]
pub struct AddArgs {
    /// Short description of the task this card addresses
    #[arg(long)]
    pub task_intent: String,
    /// Free-form situational notes
    #[arg(long, default_value = "")]
    pub context: String,
    /// The recommended methodology/steps
    #[arg(long, default_value = "")]
    pub plan: String,
    /// Tool-call trace from the originating run (free text)
    #[arg(long, default_value = "")]
    pub tool_calls: String,
    /// Known failure modes for this task type
    #[arg(long, default_value = "")]
    pub mistakes: String,
    /// Corrective guidance
    #[arg(long, default_value = "")]
    pub fixes: String,
    /// Judged quality of the originating run, 0-10
    #[arg(long, default_value_t = 0.0)]
    pub score: f64,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

/// Build a card from the arguments, run it through the moderation gate, and
/// store it. A rejected card is never persisted.
pub fn add(config: &PlaybookConfig, args: AddArgs) -> Result<()> {
    let card = MethodCard::build(CardDraft {
        task_intent: args.task_intent,
        context: args.context,
        plan: args.plan,
        tool_calls: ToolCalls::Raw(args.tool_calls),
        mistakes: args.mistakes,
        fixes: args.fixes,
        outcome_score: args.score,
        tags: args
            .tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        ..Default::default()
    });

    if !moderate(&card, &config.moderation) {
        println!("Card rejected by moderation (empty, oversized, or spam-like task intent).");
        return Ok(());
    }

    let store = CardStore::new(config);
    if store.save(&card) {
        println!("Stored card {}.", card.id);
    } else {
        println!("Failed to store card.");
    }
    Ok(())
}
