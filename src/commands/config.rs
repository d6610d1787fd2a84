use anyhow::Result;
use calpick_core::config::CalpickConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalpickConfig) -> Result<()> {
    let path = CalpickConfig::config_path()?;

    println!("{}", format!("# {}", path.display()).dimmed());
    print!("{}", config.to_toml()?);
    println!(
        "{}",
        format!("# effective locale: {}", config.locale()).dimmed()
    );

    Ok(())
}
