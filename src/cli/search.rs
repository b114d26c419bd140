use anyhow::Result;

use playbook::config::PlaybookConfig;
use playbook::ranking;
use playbook::store::CardStore;

/// Run a keyword search from the terminal.
pub fn search(config: &PlaybookConfig, query: &str, limit: Option<usize>) -> Result<()> {
    let store = CardStore::new(config);
    let top_n = limit.unwrap_or(config.retrieval.default_top_n);

    let results = ranking::search(&store, query, top_n, &config.retrieval);
    if results.is_empty() {
        println!("No cards match {query:?}. Try `playbook recent` for the top-ranked cards.");
        return Ok(());
    }

    println!("Found {} card(s) for {query:?}:\n", results.len());
    super::print_cards(&results);
    Ok(())
}
