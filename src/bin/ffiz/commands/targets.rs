//! `ffiz targets` command

use anyhow::Result;

use ffiz::core::target::Target;

pub fn execute() -> Result<()> {
    let host = Target::host().ok();

    for target in Target::ALL {
        let marker = if Some(target) == host { "  (host)" } else { "" };
        println!("{:<18} {}{}", target.as_str(), target.zig_triple(), marker);
    }

    Ok(())
}
