//! CLI `doctor` command — report backend reachability and card counts.

use anyhow::Result;

use playbook::config::PlaybookConfig;
use playbook::store::durable::DurableBackend;
use playbook::store::file::FileStore;

/// Probe both backends and print a health report.
pub fn doctor(config: &PlaybookConfig) -> Result<()> {
    println!("Playbook Health Report");
    println!("======================");
    println!();

    match config.backend.endpoint() {
        None => {
            println!("Durable backend:   not configured (set CLICKHOUSE_HOST or [backend] host)");
        }
        Some((host, port)) => {
            println!("Durable backend:   {host}:{port}");
            match DurableBackend::connect(&config.backend) {
                Some(backend) => match backend.count() {
                    Ok(count) => {
                        println!("  Status:          reachable");
                        println!("  Cards:           {count}");
                    }
                    Err(e) => {
                        println!("  Status:          UNREACHABLE ({e})");
                        println!("  Saves and reads will use the local file fallback.");
                    }
                },
                None => {
                    println!("  Status:          client construction failed");
                }
            }
        }
    }

    println!();
    let cards_file = config.resolved_cards_file();
    let file_store = FileStore::new(cards_file.clone(), config.storage.retention_cap);
    let local_count = file_store.load().len();
    println!("Fallback file:     {}", cards_file.display());
    println!("  Exists:          {}", cards_file.exists());
    println!("  Cards:           {local_count}");
    println!("  Retention cap:   {}", config.storage.retention_cap);

    Ok(())
}
