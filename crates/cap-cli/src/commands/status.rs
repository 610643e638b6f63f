use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let machine = super::open_machine(ctx)?;
    let state = machine.state();

    println!("  {} {}", "State file:".bold(), ctx.state_path.display());
    println!("  {:<12} {}", "Coins", state.coins);
    let lock = if state.spin_locked {
        "locked".red().to_string()
    } else {
        "ready".green().to_string()
    };
    println!("  {:<12} {lock}", "Spin");
    println!(
        "  {:<12} {}",
        "Odds",
        super::percent(machine.odds().probability)
    );
    println!();

    super::profile::print_profile(&state.profile);
    println!();

    match &state.last_spin {
        Some(last) => {
            println!("  {}", "Last spin".bold().underline());
            println!("  {}  {}", last.outcome.code, last.outcome.title);
            println!("  {}", last.outcome.message);
            println!(
                "  {}",
                format!(
                    "{} at {}",
                    last.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                    super::percent(last.probability)
                )
                .dimmed()
            );
        }
        None => println!("  {}", "No spins yet.".dimmed()),
    }

    Ok(())
}
