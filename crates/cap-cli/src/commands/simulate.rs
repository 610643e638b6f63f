use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context, draws: u64, probability: Option<f64>) -> Result<(), String> {
    let mut machine = super::open_machine(ctx)?;
    let probability = probability.unwrap_or_else(|| machine.odds().probability);

    let report = machine
        .simulate(probability, draws)
        .map_err(|e| e.to_string())?;

    println!(
        "  {} {} draws at {}",
        "Simulation".bold(),
        report.draws,
        super::percent(report.probability)
    );
    println!(
        "  Favorable: {} ({})",
        report.favorable,
        super::percent(report.favorable_rate())
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Code", "Count", "Share"]);
    for (code, count) in &report.counts {
        let share = if report.draws == 0 {
            0.0
        } else {
            *count as f64 / report.draws as f64
        };
        table.add_row(vec![code.clone(), count.to_string(), super::percent(share)]);
    }
    println!("{table}");

    Ok(())
}
