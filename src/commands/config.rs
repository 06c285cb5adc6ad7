//! Config subcommands handler

use anyhow::Result;

use termreel::Config;

/// Show the current configuration as TOML.
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = config.to_toml()?;
    if config == Config::default() {
        println!("# No playback options set, defaults are in use");
    }
    print!("{}", toml_str);
    Ok(())
}

/// Print the path the configuration is read from.
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
