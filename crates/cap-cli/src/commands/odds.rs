use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use cap_core::odds::{MAX_POINTS, OVERRIDE_PROBABILITY};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let machine = super::open_machine(ctx)?;
    let state = machine.state();
    let odds = machine.odds();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Component", "Value", "Points"]);

    let shown = |raw: &Option<String>| raw.as_deref().unwrap_or("-").to_string();
    table.add_row(vec!["Base".to_string(), String::new(), format!("{}", odds.base)]);
    table.add_row(vec![
        "Education".to_string(),
        shown(&state.profile.education),
        super::signed(f64::from(odds.education)),
    ]);
    table.add_row(vec![
        "Wage level".to_string(),
        shown(&state.profile.wage_level),
        super::signed(f64::from(odds.wage)),
    ]);
    table.add_row(vec![
        "Occupation".to_string(),
        shown(&state.profile.occupation),
        super::signed(f64::from(odds.occupation)),
    ]);
    table.add_row(vec![
        "Coins".to_string(),
        state.coins.to_string(),
        super::signed(odds.coin_bonus),
    ]);
    table.add_row(vec![
        "Total".to_string(),
        format!("clamped to 0..{MAX_POINTS}"),
        format!("{}", odds.clamped_total),
    ]);

    println!("{table}");
    println!();

    if odds.override_applied {
        println!(
            "  {} {} coins override the table: {}",
            "Override".green().bold(),
            state.coins,
            super::percent(OVERRIDE_PROBABILITY)
        );
    }
    println!("  Win probability: {}", super::percent(odds.probability).bold());

    Ok(())
}
