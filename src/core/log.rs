use crate::db::log::read_log;
use crate::db::store::LocationStore;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_operation};

const MAX_OP_WIDTH: usize = 40;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &LocationStore) -> AppResult<()> {
        let entries = read_log(store.conn())?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for (entry, op_target) in entries.iter().zip(op_targets) {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| entry.date.clone());

            let visible: String = if op_target.chars().count() > op_w {
                let mut s: String = op_target.chars().take(op_w.saturating_sub(3)).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

            println!(
                "{:>id_w$}: {:<25} | {}{}{}{} => {}",
                entry.id,
                date,
                color_for_operation(&entry.operation),
                visible,
                RESET,
                padding,
                entry.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
