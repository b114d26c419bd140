use anyhow::Result;

use playbook::config::PlaybookConfig;
use playbook::store::CardStore;

/// Add one upvote to a card. Each invocation adds exactly one; dedupe
/// "at most one upvote per event" before calling.
pub fn upvote(config: &PlaybookConfig, id: &str) -> Result<()> {
    let store = CardStore::new(config);
    if store.increment_upvote(id) {
        println!("Upvoted card {id}.");
    } else {
        println!("Card {id} not found.");
    }
    Ok(())
}
