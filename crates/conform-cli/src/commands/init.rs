//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "conform.toml";

const TEMPLATE: &str = r#"# conform rule configuration
#
# Selections are named subsets of the symbol graph; rules state what every
# symbol in a subject selection must satisfy.

[[selections]]
name = "domain"
namespace = "App.Domain.*"

[[selections]]
name = "infrastructure"
namespace = "App.Infrastructure.*"

# The domain layer depends only on itself.
[[rules]]
name = "domain-isolation"
subject = "domain"
only-depend-on = ["domain"]

# Controllers never reach into infrastructure directly.
[[rules]]
name = "controllers-avoid-infrastructure"
subject-namespace = "App.Controllers.*"
not-depend-on-any = ["infrastructure"]

# DTOs are record-like value carriers.
[[rules]]
name = "dtos-are-records"
subject-namespace = "App.Application.DTO.*"
record-like = true
"#;

/// Runs the init command, returning the process exit code.
pub fn run(force: bool) -> Result<i32> {
    write_template(Path::new(CONFIG_FILE), force)?;
    println!("Wrote {CONFIG_FILE}");
    Ok(0)
}

fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(path, TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_a_valid_rule_config() {
        let rules = conform_rules::declarative::load_rules_from_toml(TEMPLATE)
            .expect("template must parse");
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        write_template(&path, false).unwrap();
        assert!(write_template(&path, false).is_err());
        assert!(write_template(&path, true).is_ok());
    }
}
