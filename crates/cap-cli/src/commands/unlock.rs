use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let mut machine = super::open_machine(ctx)?;
    if !machine.state().spin_locked {
        println!("  Machine is not locked.");
        return Ok(());
    }
    machine.unlock();
    println!("  Spin lock cleared.");
    super::save_machine(ctx, machine)
}
