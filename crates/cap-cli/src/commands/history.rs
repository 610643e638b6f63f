use clap::ValueEnum;

use super::Context;

/// Output format for the history command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HistoryFormat {
    /// Plain text, one line per entry.
    Text,
    /// Markdown list.
    Markdown,
    /// Raw JSON entries.
    Json,
}

pub fn run(ctx: &Context, format: HistoryFormat) -> Result<(), String> {
    let machine = super::open_machine(ctx)?;
    let history = &machine.state().history;

    let output = match format {
        HistoryFormat::Text => history.export_text(),
        HistoryFormat::Markdown => history.export_markdown(),
        HistoryFormat::Json => serde_json::to_string_pretty(history).map_err(|e| e.to_string())?,
    };
    println!("{output}");

    if !matches!(format, HistoryFormat::Json) {
        let spins = history.spins().count();
        eprintln!(
            "  {spins} spin{}, {} favorable",
            if spins == 1 { "" } else { "s" },
            history.favorable_count()
        );
    }
    Ok(())
}
