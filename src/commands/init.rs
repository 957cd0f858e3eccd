use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".poisonmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Poisonmap Configuration

# Weights of the poisoning index; must sum to 1.0.
[weights]
alpha = 0.25   # single-implementation risk
beta = 0.15    # usage utilization
gamma = 0.25   # unused-method rate
delta = 0.35   # normalized call depth

# Risk band boundaries. Scores above `high` are HIGH risk; scores at or
# above `medium` are MEDIUM.
[thresholds]
medium = 0.4
high = 0.7

[ignore]
patterns = [
    "**/generated/**",
    "**/build/**",
    "**/target/**",
]
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .poisonmap.toml configuration file");

    Ok(())
}
