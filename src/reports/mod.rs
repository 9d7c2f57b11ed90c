use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mixforge::summary::{MixtureDesign, MixtureSummary};

fn score_cell(score: Option<i32>) -> Cell {
    match score {
        Some(s) if s >= 8 => Cell::new(s).fg(Color::Green),
        Some(s) if s >= 4 => Cell::new(s).fg(Color::Yellow),
        Some(s) => Cell::new(s).fg(Color::Red),
        None => Cell::new("-"),
    }
}

fn format_peaks(peaks: &[f64]) -> String {
    peaks
        .iter()
        .map(|p| format!("{:.3}", p))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_mixture_table(pools: &[MixtureSummary]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Mixture").add_attribute(Attribute::Bold),
        Cell::new("Size"),
        Cell::new("Min").fg(Color::Cyan),
        Cell::new("Avg").fg(Color::Cyan),
        Cell::new("Overlap").fg(Color::Red),
        Cell::new("Components"),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for pool in pools {
        let avg = pool
            .average_score
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&pool.name).add_attribute(Attribute::Bold),
            Cell::new(pool.components.len()),
            score_cell(pool.min_score),
            Cell::new(avg),
            Cell::new(format!("{:.2}", pool.overlap_score)),
            Cell::new(pool.component_names().join(", ")),
        ]);
    }
    println!("\n{}", table);
}

/// Per-component scores, including the peaks that collide with pool-mates.
pub fn print_component_table(pools: &[MixtureSummary]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Mixture").add_attribute(Attribute::Bold),
        Cell::new("Component"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Overlapped peaks"),
    ]);

    for pool in pools {
        for c in &pool.components {
            let overlapped = if c.overlapped_peaks.is_empty() {
                Cell::new("-")
            } else {
                Cell::new(format_peaks(&c.overlapped_peaks)).fg(Color::Red)
            };
            table.add_row(vec![
                Cell::new(&pool.name),
                Cell::new(&c.name).add_attribute(Attribute::Bold),
                score_cell(Some(c.score)).set_alignment(CellAlignment::Right),
                overlapped,
            ]);
        }
    }
    println!("\n{}", table);
}

pub fn print_design_report(design: &MixtureDesign) {
    print_mixture_table(&design.pools);
    print_component_table(&design.pools);

    println!("Total overlap: {:.3}", design.total_overlap);
    if !design.excluded.is_empty() {
        println!(
            "⚠️  Excluded (no peaks): {}",
            design.excluded.join(", ")
        );
    }
}
