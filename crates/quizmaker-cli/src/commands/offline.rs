//! The `quizmaker offline` command.
//!
//! Prints the offline cache plan for the configured cache version.

use std::path::PathBuf;

use anyhow::Result;

use quizmaker_core::config::load_config_from;
use quizmaker_core::offline::OfflinePolicy;

pub fn execute(config_path: Option<PathBuf>, existing: Vec<String>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let policy = OfflinePolicy::new(config.offline_cache_version.as_str());

    println!("Cache: {}", policy.cache_name());
    println!("Precache:");
    for asset in policy.precache_assets() {
        println!("  {asset}");
    }

    if !existing.is_empty() {
        let stale = policy.stale_caches(existing.iter().map(String::as_str));
        if stale.is_empty() {
            println!("No stale caches.");
        } else {
            println!("Stale caches to delete:");
            for name in stale {
                println!("  {name}");
            }
        }
    }

    Ok(())
}
