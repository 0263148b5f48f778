use cipherforge::engine::history::format_rate;
use cipherforge::engine::runner::RestartOutcome;
use cipherforge::error::DfResult;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_run_report(outcome: &RestartOutcome) -> DfResult<()> {
    let decryptor = &outcome.decryptor;
    let summary = &outcome.summary;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Model").add_attribute(Attribute::Bold),
        Cell::new("Symbols"),
        Cell::new("Chain"),
        Cell::new("Steps"),
        Cell::new("Accepted"),
        Cell::new("Acc. Rate"),
        Cell::new("Plateau"),
        Cell::new("Best Score").fg(Color::Cyan),
    ]);

    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let rate = decryptor
        .acc_rate()
        .map(format_rate)
        .unwrap_or_else(|_| "n/a".to_string());
    let chain = match outcome.seed {
        Some(seed) => format!("{}/{} (seed {})", outcome.chain_index + 1, outcome.restarts, seed),
        None => format!("{}/{}", outcome.chain_index + 1, outcome.restarts),
    };

    table.add_row(vec![
        Cell::new(decryptor.model().name()).add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{}/{}",
            decryptor.symbols()?.len(),
            decryptor.model().len()
        )),
        Cell::new(chain),
        Cell::new(summary.steps_taken),
        Cell::new(summary.accepted),
        Cell::new(rate),
        Cell::new(if summary.stopped_early { "yes" } else { "no" }),
        Cell::new(format!("{:.3}", summary.best_score)).fg(Color::Cyan),
    ]);

    println!("\n{}", table);
    Ok(())
}

pub fn print_key_table(key: &[(char, char)]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let show = |c: char| if c == ' ' { "␣".to_string() } else { c.to_string() };
    for chunk in key.chunks(16) {
        let cipher: Vec<Cell> = chunk
            .iter()
            .map(|&(c, _)| Cell::new(show(c)).set_alignment(CellAlignment::Center))
            .collect();
        let plain: Vec<Cell> = chunk
            .iter()
            .map(|&(_, p)| {
                Cell::new(show(p))
                    .set_alignment(CellAlignment::Center)
                    .fg(Color::Green)
            })
            .collect();
        table.add_row(cipher);
        table.add_row(plain);
    }
    println!("\nKey (cipher → plain):\n{}", table);
}
