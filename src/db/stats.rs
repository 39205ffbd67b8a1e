use crate::db::store::LocationStore;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::format_coordinates;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(store: &LocationStore, db_path: &str, precision: usize) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTAL SAMPLES
    //
    let count = store.count()?;
    println!("{}• Total fixes:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);

    //
    // 3) TIME RANGE
    //
    let first: Option<String> = store
        .conn()
        .query_row(
            "SELECT recorded_at FROM locations WHERE recorded_at IS NOT NULL ORDER BY id ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = store
        .conn()
        .query_row(
            "SELECT recorded_at FROM locations WHERE recorded_at IS NOT NULL ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let grey_dash = || format!("{GREY}--{RESET}");
    println!("{}• Recorded:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(grey_dash));
    println!("    to:   {}", last.unwrap_or_else(grey_dash));

    //
    // 4) LAST KNOWN LOCATION
    //
    let last_known = store
        .most_recent()?
        .map(|s| format!("#{} {}", s.id, format_coordinates(&s.coordinates(), precision)))
        .unwrap_or_else(grey_dash);
    println!("{}• Last known:{} {}", CYAN, RESET, last_known);

    println!();
    Ok(())
}
