use anyhow::Result;

use playbook::config::PlaybookConfig;
use playbook::seed::ensure_baseline;
use playbook::store::CardStore;

/// Plant the baseline cards. Safe to run repeatedly.
pub fn seed(config: &PlaybookConfig) -> Result<()> {
    let store = CardStore::new(config);
    let added = ensure_baseline(&store);
    if added == 0 {
        println!("All baseline cards already present.");
    } else {
        println!("Seeded {added} baseline card(s).");
    }
    Ok(())
}
