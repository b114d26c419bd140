use anyhow::Result;

use playbook::config::PlaybookConfig;
use playbook::ranking;
use playbook::store::CardStore;

/// Show the top-ranked cards with no text filter.
pub fn recent(config: &PlaybookConfig, limit: Option<usize>) -> Result<()> {
    let store = CardStore::new(config);
    let top_n = limit.unwrap_or(config.retrieval.default_top_n);

    let results = ranking::recent(&store, top_n);
    if results.is_empty() {
        println!("Store is empty. Run `playbook seed` to plant the baseline cards.");
        return Ok(());
    }

    println!("Top {} card(s):\n", results.len());
    super::print_cards(&results);
    Ok(())
}
