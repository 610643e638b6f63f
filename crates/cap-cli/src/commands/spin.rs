use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;

use cap_machine::reels::render_reels;

use super::Context;

pub fn run(ctx: &Context, reels: usize, animate: bool) -> Result<(), String> {
    let config = ctx.config().with_reel_count(reels);
    let mut machine = super::open_machine_with(ctx, config)?;

    let report = machine.spin().map_err(|e| e.to_string())?;

    if animate {
        let mut elapsed = 0;
        for t in report.reels.ticks() {
            thread::sleep(Duration::from_millis(t - elapsed));
            elapsed = t;
            let frame = machine.reel_frame(&report.reels, t);
            print!("\r  {}", render_reels(&frame));
            io::stdout().flush().map_err(|e| e.to_string())?;
        }
        println!();
    } else {
        println!("  {}", render_reels(report.reels.final_glyphs()));
    }

    let outcome = &report.result.outcome;
    let headline = format!("{}  {}", outcome.code, outcome.title);
    if report.favorable {
        println!("  {}", headline.green().bold());
    } else {
        println!("  {}", headline.red().bold());
    }
    println!("  {}", outcome.message);
    println!(
        "  {}",
        format!("win probability {}", super::percent(report.result.probability)).dimmed()
    );

    super::save_machine(ctx, machine)
}
