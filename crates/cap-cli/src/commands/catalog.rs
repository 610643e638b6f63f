use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let catalog = ctx.load_catalog()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Code", "Title", "Message"]);
    for outcome in catalog.outcomes() {
        table.add_row(vec![
            outcome.code.clone(),
            outcome.title.clone(),
            outcome.message.clone(),
        ]);
    }

    println!("{table}");
    println!(
        "  {} outcomes: favorable {}, {} unfavorable",
        catalog.len(),
        catalog.favorable().code.green(),
        catalog.unfavorable().len()
    );
    Ok(())
}
