//! Project configuration applied to a registry

use crate::registry::Registry;
use crate::sniff::{SniffHandle, SniffOptions};
use crate::update::update_sniff;
use polish_core::config::{ConfigSchema, ShellSniffConfig};
use polish_core::process::local;
use polish_core::{Result, ResultExt};

impl Registry {
    /// Register a sniff that runs one shell command line
    ///
    /// Severity and timing are validated first; an invalid entry is never
    /// registered.
    pub fn register_shell(&mut self, config: &ShellSniffConfig) -> Result<SniffHandle> {
        let mut options = SniffOptions::parse(&config.severity, &config.timing)
            .context(format!("While registering sniff '{}'", config.name))?;
        if let Some(description) = &config.description {
            options = options.description(description.clone());
        }

        let command = config.command.clone();
        let description = config.description.clone();
        Ok(self.sniff_with(options, config.name.clone(), move || {
            if let Some(description) = &description {
                crate::info(description);
            }
            local(&command)
        }))
    }

    /// Register the project's own sniffs, then apply its overrides
    pub fn apply_config(&mut self, schema: &ConfigSchema) -> Result<()> {
        for sniff in &schema.sniffs {
            self.register_shell(sniff)?;
        }
        for (name, reclassify) in &schema.overrides {
            update_sniff(
                self,
                name,
                reclassify.severity.as_deref(),
                reclassify.timing.as_deref(),
            )
            .context(format!("While applying overrides for '{}'", name))?;
        }
        Ok(())
    }
}
