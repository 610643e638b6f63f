use colored::Colorize;

use cap_core::PlayerProfile;

use super::Context;

/// Apply an update: `None` keeps the field, an empty string clears it.
fn apply(field: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        let value = value.trim().to_string();
        *field = (!value.is_empty()).then_some(value);
    }
}

pub fn run(
    ctx: &Context,
    education: Option<String>,
    wage: Option<String>,
    occupation: Option<String>,
) -> Result<(), String> {
    let mut machine = super::open_machine(ctx)?;

    let changed = education.is_some() || wage.is_some() || occupation.is_some();
    if changed {
        let mut profile = machine.state().profile.clone();
        apply(&mut profile.education, education);
        apply(&mut profile.wage_level, wage);
        apply(&mut profile.occupation, occupation);
        machine.set_profile(profile);
    }

    print_profile(&machine.state().profile);

    if changed {
        super::save_machine(ctx, machine)?;
    }
    Ok(())
}

/// Print each profile field with its recognized value and adjustment.
pub fn print_profile(profile: &PlayerProfile) {
    println!("  {}", "Profile".bold().underline());
    print_field(
        "Education",
        profile.education.as_deref(),
        profile.education_level().map(|l| (l.to_string(), l.delta())),
    );
    print_field(
        "Wage level",
        profile.wage_level.as_deref(),
        profile.wage().map(|l| (l.to_string(), l.delta())),
    );
    print_field(
        "Occupation",
        profile.occupation.as_deref(),
        profile.occupation_category().map(|c| (c.to_string(), c.delta())),
    );
}

fn print_field(label: &str, raw: Option<&str>, parsed: Option<(String, i32)>) {
    match (raw, parsed) {
        (None, _) => println!("  {label:<12} {}", "-".dimmed()),
        (Some(_), Some((name, delta))) => {
            println!("  {label:<12} {name} ({})", super::signed(f64::from(delta)))
        }
        (Some(raw), None) => println!(
            "  {label:<12} {raw} {}",
            "(unrecognized, +0)".yellow()
        ),
    }
}
