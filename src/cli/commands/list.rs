use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LocationStore;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::formatting::{format_coordinates, format_timestamp};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit } = cmd {
        let store = LocationStore::open(&cfg.database)?;
        let samples = store.list(*limit)?;

        if samples.is_empty() {
            println!("No locations recorded.");
            return Ok(());
        }

        let id_w = samples
            .iter()
            .map(|s| s.id.to_string().len())
            .max()
            .unwrap_or(2)
            .max(2);

        println!(
            "{CYAN}{:>id_w$} | {:<19} | position{RESET}",
            "id",
            "recorded",
            id_w = id_w
        );
        println!("{GREY}{}{RESET}", "-".repeat(id_w + 45));

        for s in &samples {
            println!(
                "{:>id_w$} | {:<19} | {}",
                s.id,
                format_timestamp(s.recorded_at.as_ref()),
                format_coordinates(&s.coordinates(), cfg.coordinate_precision),
                id_w = id_w
            );
        }
    }

    Ok(())
}
