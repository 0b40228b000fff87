//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# longline configuration

# preset = "recommended"  # or "comments-only"

[analyzer]
# File or directory to analyze (default: current directory)
# root = "./course"

# Lines longer than this many characters get feedback
max_line_length = 100

# File extensions to scan
extensions = ["py"]

# Glob patterns to exclude from analysis
exclude = [
    "**/.venv/**",
    "**/__pycache__/**",
]

# Give up on a file whose parse takes longer than this
parse_timeout_ms = 10000

# Classifier configurations
# Each classifier can be disabled and has its own limits

[classifiers.long-comment]
enabled = true

[classifiers.extract-variable]
enabled = true
max_operands = 4

[classifiers.multi-assignment]
enabled = true

[classifiers.function-signature]
enabled = true
max_parameters = 4
long_parameter_name = 25
# line_length_limit = 100  # defaults to max_line_length
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("longline.toml"), force)?;

    println!("Created longline.toml");
    println!("\nNext steps:");
    println!("  1. Edit longline.toml to configure classifiers");
    println!("  2. Run: longline check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
