use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Floodcast Configuration

[store]
# path = "floodcast-events.json"

# Readings used when --rainfall / --elevation aren't given. Leave a value
# out to treat that reading as unavailable (scored as 0).
[providers]
# rainfall_mm = 0.0
# elevation_m = 0.0

[alerts]
auto_notify = true
default_radius_km = 5.0
default_min_severity = "Medium"

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    write_default_config(Path::new(CONFIG_FILE_NAME), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(path, DEFAULT_CONFIG)
}
