use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, count: u32) -> Result<(), String> {
    let mut machine = super::open_machine(ctx)?;

    let balance = machine.insert_coins(count);

    println!(
        "  {} {count} coin{}. Balance: {balance}",
        "Inserted".bold(),
        if count == 1 { "" } else { "s" },
    );
    if balance.triggers_override() {
        println!("  {}", "Full stack: the next spin is near certain.".green());
    }
    println!(
        "  {}",
        format!("win probability {}", super::percent(machine.odds().probability)).dimmed()
    );

    super::save_machine(ctx, machine)
}
