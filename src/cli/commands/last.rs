use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LocationStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, location};
use crate::utils::formatting::format_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Last { json } = cmd {
        let store = LocationStore::open(&cfg.database)?;
        let last = store.most_recent()?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&last)?);
            return Ok(());
        }

        match last {
            Some(sample) => {
                location(
                    "Last known location",
                    &sample.coordinates(),
                    cfg.coordinate_precision,
                );
                println!(
                    "   #{} recorded {}",
                    sample.id,
                    format_timestamp(sample.recorded_at.as_ref())
                );
            }
            None => info("No location recorded yet."),
        }
    }

    Ok(())
}
