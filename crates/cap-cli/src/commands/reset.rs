use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let mut machine = super::open_machine(ctx)?;
    machine.reset();
    println!("  Machine reset. History kept ({} entries).", machine.state().history.len());
    super::save_machine(ctx, machine)
}
