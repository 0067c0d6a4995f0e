use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, RenderSettings};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!("{} {key} = {value}", "Set".green().bold());
            println!("  {}", path.display().to_string().dimmed());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load_or_default();
    let settings = RenderSettings::resolve(&config, None, None, None);
    let defaults = config.defaults.unwrap_or_default();

    match Config::path() {
        Ok(path) if path.exists() => println!("{} {}", "Config:".bold(), path.display()),
        Ok(path) => println!(
            "{} {} {}",
            "Config:".bold(),
            path.display(),
            "(not created yet)".dimmed()
        ),
        Err(e) => println!("{} {e}", "Config:".bold()),
    }
    println!();

    let rows: [(&str, String, bool); 9] = [
        ("width", settings.width.to_string(), defaults.width.is_some()),
        ("height", settings.height.to_string(), defaults.height.is_some()),
        ("theme", settings.theme.clone(), defaults.theme.is_some()),
        ("overlap", settings.overlap.name().to_string(), defaults.overlap.is_some()),
        ("rails", settings.rails.name().to_string(), defaults.rails.is_some()),
        ("segment_ratio", settings.segment_ratio.to_string(), defaults.segment_ratio.is_some()),
        (
            "departure_multiplier",
            settings.departure_multiplier.to_string(),
            defaults.departure_multiplier.is_some(),
        ),
        ("wire_width", settings.wire_width.to_string(), defaults.wire_width.is_some()),
        ("strict", settings.strict.to_string(), defaults.strict.is_some()),
    ];
    for (key, value, is_set) in rows {
        let source = if is_set { "" } else { " (default)" };
        println!("  defaults.{key:<22} {value}{}", source.dimmed());
    }
    Ok(())
}
