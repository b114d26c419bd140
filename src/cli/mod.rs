pub mod add;
pub mod doctor;
pub mod recent;
pub mod search;
pub mod seed;
pub mod upvote;

use playbook::card::MethodCard;

/// Print a list of cards in a compact terminal form.
pub fn print_cards(cards: &[MethodCard]) {
    for (i, card) in cards.iter().enumerate() {
        let preview = if card.plan.chars().count() > 120 {
            let head: String = card.plan.chars().take(120).collect();
            format!("{head}...")
        } else {
            card.plan.clone()
        };
        println!(
            "  {}. {} (upvotes: {}, score: {:.1})",
            i + 1,
            card.task_intent,
            card.upvotes,
            card.outcome_score,
        );
        println!("     id: {}", card.id);
        if !card.tags.is_empty() {
            println!("     tags: {}", card.tags.join(", "));
        }
        if !preview.is_empty() {
            println!("     {preview}");
        }
        println!();
    }
}
