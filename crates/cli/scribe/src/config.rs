//! `scribe.toml` project configuration

use anyhow::{Context, Result};
use sc_generator::{GreetingAttributeGenerator, GreetingPartialMethodGenerator, SourceGenerator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project directory
pub const CONFIG_FILE: &str = "scribe.toml";

/// Project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where generated files go
    pub output: OutputConfig,

    /// Which generators run
    pub generators: GeneratorsConfig,
}

/// `[output]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory, relative to the project directory
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Generated"),
        }
    }
}

/// `[generators]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorsConfig {
    /// Run the partial-method generator
    pub partial_method: bool,

    /// Run the attribute generator
    pub attribute: bool,
}

impl Default for GeneratorsConfig {
    fn default() -> Self {
        Self {
            partial_method: true,
            attribute: true,
        }
    }
}

/// A single generator selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorChoice {
    /// The partial-method generator
    PartialMethod,
    /// The attribute generator
    Attribute,
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Configuration of a project directory; defaults when it has no
    /// `scribe.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if `scribe.toml` exists but cannot be loaded
    pub fn find_in_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.is_file() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Generators to run, honouring a command-line `--only`
    #[must_use]
    pub fn generators(&self, only: Option<GeneratorChoice>) -> Vec<Box<dyn SourceGenerator>> {
        let (partial_method, attribute) = match only {
            Some(GeneratorChoice::PartialMethod) => (true, false),
            Some(GeneratorChoice::Attribute) => (false, true),
            None => (self.generators.partial_method, self.generators.attribute),
        };

        let mut generators: Vec<Box<dyn SourceGenerator>> = Vec::new();
        if partial_method {
            generators.push(Box::new(GreetingPartialMethodGenerator));
        }
        if attribute {
            generators.push(Box::new(GreetingAttributeGenerator));
        }
        generators
    }
}
