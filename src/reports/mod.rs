use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keylist::combinations::Keylist;
use keylist::pipeline::SelectionReport;
use keylist::scorer::{KeywordBreakdown, SENTINEL_SCORE};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn score_cell(raw: f64, text: String) -> Cell {
    if raw == SENTINEL_SCORE {
        Cell::new("missing").fg(Color::Red)
    } else {
        Cell::new(text)
    }
}

pub fn print_keyword_scores(title: &str, breakdowns: &[KeywordBreakdown]) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Diff"),
        Cell::new("Traffic"),
        Cell::new("Apps"),
        Cell::new("Len"),
        Cell::new("nDiff"),
        Cell::new("nTraf"),
        Cell::new("nApps"),
        Cell::new("nLen"),
    ]);
    align_right(&mut table, 1..=9);

    for b in breakdowns {
        let f = &b.factors;
        table.add_row(vec![
            Cell::new(&b.key).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", b.score)).fg(Color::Cyan),
            Cell::new(format!("{:.1}", b.avg_difficulty)),
            Cell::new(format!("{:.1}", b.traffic)),
            Cell::new(format!("{:.0}", b.avg_apps)),
            Cell::new(b.key_len),
            Cell::new(format!("{:.2}", f.norm_diff)),
            Cell::new(format!("{:.2}", f.norm_traffic)),
            Cell::new(format!("{:.2}", f.norm_apps)),
            Cell::new(format!("{:.2}", f.norm_keylen)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_candidates(candidates: &[Keylist], limit: usize) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Keylist").add_attribute(Attribute::Bold),
        Cell::new("Length"),
        Cell::new("Words"),
    ]);
    align_right(&mut table, 2..=3);

    for (i, c) in candidates.iter().take(limit).enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(c.joined()),
            Cell::new(c.composite_length()),
            Cell::new(c.word_count()),
        ]);
    }
    println!("\n{}", table);

    if candidates.len() > limit {
        println!("... {} more candidates", candidates.len() - limit);
    }
}

pub fn print_ranking(report: &SelectionReport, top: usize) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Rank"),
        Cell::new("Keylist").add_attribute(Attribute::Bold),
        Cell::new("Key"),
        Cell::new("Pair"),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Len"),
        Cell::new("Words"),
    ]);
    align_right(&mut table, 2..=6);

    for (rank, s) in report.ranked().into_iter().take(top).enumerate() {
        let joined = s.keylist.joined();
        let name = if rank == 0 {
            Cell::new(&joined)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&joined)
        };

        table.add_row(vec![
            Cell::new(rank + 1),
            name,
            score_cell(s.key_score, format!("{:.4}", s.norm_key_score)),
            if report.dual_keys_used {
                score_cell(s.keypair_score, format!("{:.4}", s.norm_keypair_score))
            } else {
                Cell::new("-")
            },
            Cell::new(format!("{:.4}", s.cumulative_score)).fg(Color::Cyan),
            Cell::new(s.keylist.composite_length()),
            Cell::new(s.keylist.word_count()),
        ]);
    }
    println!("\n{}", table);
}
