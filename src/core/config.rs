use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::capability::{Tier, Width};
use crate::error::PruneError;

/// Pruning algorithm.
///
/// The variants differ in what happens to blanks: the compacting ones
/// drop them, `Semi` fills interior runs, `Full` moves them behind the
/// non-blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Sequential reference loop.
    Scalar,
    /// Prefix-sum permute over one batch.
    #[default]
    NaiveSingle,
    /// Two batches joined at the first batch's valid length.
    NaiveDouble,
    /// Blank runs replaced by the following non-blank; trailing run dropped.
    Semi,
    /// Stable partition through a sorting network; blanks kept at the end.
    Full,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Scalar,
        Variant::NaiveSingle,
        Variant::NaiveDouble,
        Variant::Semi,
        Variant::Full,
    ];

    /// Batches consumed per call.
    pub fn batches(self) -> usize {
        match self {
            Variant::NaiveDouble => 2,
            _ => 1,
        }
    }

    /// Whether blanks are removed from the valid output.
    pub fn compacts(self) -> bool {
        matches!(
            self,
            Variant::Scalar | Variant::NaiveSingle | Variant::NaiveDouble
        )
    }
}

impl FromStr for Variant {
    type Err = PruneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "scalar" => Ok(Variant::Scalar),
            "naive-single" | "naive" | "single" => Ok(Variant::NaiveSingle),
            "naive-double" | "double" => Ok(Variant::NaiveDouble),
            "semi" => Ok(Variant::Semi),
            "full" | "partition" => Ok(Variant::Full),
            _ => Err(PruneError::UnknownName {
                kind: "variant",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Scalar => write!(f, "scalar"),
            Variant::NaiveSingle => write!(f, "naive-single"),
            Variant::NaiveDouble => write!(f, "naive-double"),
            Variant::Semi => write!(f, "semi"),
            Variant::Full => write!(f, "full"),
        }
    }
}

/// A named input batch loaded from TOML.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SampleConfig {
    /// Batch contents, padded with spaces when run
    pub text: String,
    /// One-line summary shown by `config --samples`
    #[serde(default)]
    pub description: Option<String>,
}

/// Global settings.
///
/// Every field is optional so that an override file can set just one of
/// them; the accessors fill in the defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Algorithm used when `run` gets no `--variant`
    #[serde(default)]
    pub variant: Option<Variant>,
    /// Batch width used when `run` gets no `--width`
    #[serde(default)]
    pub width: Option<Width>,
    /// Pinned tier; unset picks the best detected one
    #[serde(default)]
    pub tier: Option<Tier>,
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn variant(&self) -> Variant {
        self.variant.unwrap_or_default()
    }

    pub fn width(&self) -> Width {
        self.width.unwrap_or(Width::W16)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    /// Take every field `other` sets.
    pub fn merge(&mut self, other: Settings) {
        self.variant = other.variant.or(self.variant);
        self.width = other.width.or(self.width);
        self.tier = other.tier.or(self.tier);
        self.log_level = other.log_level.or(self.log_level.take());
    }
}

/// Settings and sample batches loaded from TOML files.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PruneConfig {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
    /// Map of sample names to their batches
    #[serde(default)]
    pub samples: HashMap<String, SampleConfig>,
}

impl PruneConfig {
    /// Parses a configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, PruneError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration bundled with the library.
    pub fn load_default() -> Result<Self, PruneError> {
        let content = include_str!("../../prune.toml");
        Self::from_toml(content)
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, PruneError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PruneError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Bundled `prune.toml`
    /// 2. `~/.config/blank-prune/prune.toml` (user overrides)
    /// 3. `./prune.toml` (project-local overrides)
    ///
    /// An override file that fails to parse is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, PruneError> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("blank-prune").join("prune.toml");
            config.merge_file(&user_config_path);
        }

        config.merge_file(Path::new("prune.toml"));

        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(other) => {
                tracing::debug!(path = %path.display(), "merged config override");
                self.merge(other);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping config override");
            }
        }
    }

    /// Merges another configuration into this one.
    ///
    /// Samples from `other` replace samples with the same name; settings
    /// are merged field by field.
    pub fn merge(&mut self, other: PruneConfig) {
        self.settings.merge(other.settings);
        for (name, sample) in other.samples {
            self.samples.insert(name, sample);
        }
    }

    /// Retrieves a sample by name.
    pub fn get_sample(&self, name: &str) -> Option<&SampleConfig> {
        self.samples.get(name)
    }

    /// Sample names in sorted order.
    pub fn sample_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.samples.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = PruneConfig::load_default().unwrap();
        assert!(config.samples.contains_key("digits"));
        assert_eq!(config.settings.variant(), Variant::NaiveSingle);
        assert_eq!(config.settings.width(), Width::W16);
        assert_eq!(config.settings.tier, None);
        assert_eq!(config.settings.log_level(), "warn");
    }

    #[test]
    fn test_default_samples_fit_a_batch_group() {
        let config = PruneConfig::load_default().unwrap();
        for (name, sample) in &config.samples {
            assert!(sample.text.len() <= 32, "sample {} is too long", name);
        }
        assert_eq!(config.get_sample("digits").unwrap().text, " 1  2  3    45  ");
    }

    #[test]
    fn test_tabs_sample_holds_control_bytes() {
        let config = PruneConfig::load_default().unwrap();
        let tabs = config.get_sample("tabs").unwrap();
        assert!(tabs.text.as_bytes().contains(&0));
        assert!(tabs.text.as_bytes().contains(&b'\t'));
    }

    #[test]
    fn test_load_from_toml_string() {
        let toml_content = r#"
[settings]
variant = "semi"
width = 32
tier = "portable"

[samples.custom]
text = "a b c"
"#;
        let config = PruneConfig::from_toml(toml_content).unwrap();
        assert_eq!(config.settings.variant(), Variant::Semi);
        assert_eq!(config.settings.width(), Width::W32);
        assert_eq!(config.settings.tier, Some(Tier::Portable));
        assert_eq!(config.get_sample("custom").unwrap().text, "a b c");
        assert_eq!(config.get_sample("custom").unwrap().description, None);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for bad in [
            "[settings]\nvariant = \"fastest\"",
            "[settings]\nwidth = 64",
            "[settings]\ntier = \"avx2\"",
            "[samples.x]\ndescription = \"no text\"",
        ] {
            assert!(
                matches!(PruneConfig::from_toml(bad), Err(PruneError::Config(_))),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_merge_configs() {
        let mut config1 = PruneConfig::default();
        config1.settings.variant = Some(Variant::Full);
        config1.settings.log_level = Some("info".to_string());
        config1.samples.insert(
            "test1".to_string(),
            SampleConfig {
                text: "ABC".to_string(),
                description: None,
            },
        );

        let mut config2 = PruneConfig::default();
        config2.settings.width = Some(Width::W32);
        config2.samples.insert(
            "test2".to_string(),
            SampleConfig {
                text: "XYZ".to_string(),
                description: None,
            },
        );
        config2.samples.insert(
            "test1".to_string(),
            SampleConfig {
                text: "DEF".to_string(),
                description: Some("replaced".to_string()),
            },
        );

        config1.merge(config2);

        assert_eq!(config1.samples.len(), 2);
        assert_eq!(config1.get_sample("test1").unwrap().text, "DEF");
        assert_eq!(config1.get_sample("test2").unwrap().text, "XYZ");
        assert_eq!(config1.settings.variant(), Variant::Full);
        assert_eq!(config1.settings.width(), Width::W32);
        assert_eq!(config1.settings.log_level(), "info");
    }

    #[test]
    fn test_sample_names_are_sorted() {
        let config = PruneConfig::load_default().unwrap();
        let names = config.sample_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"runs"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = PruneConfig::load_from_file(Path::new("/nonexistent/prune.toml")).unwrap_err();
        assert!(matches!(err, PruneError::Config(msg) if msg.contains("/nonexistent/prune.toml")));
    }

    #[test]
    fn test_variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!("NAIVE_DOUBLE".parse::<Variant>().unwrap(), Variant::NaiveDouble);
        assert_eq!(Variant::NaiveDouble.batches(), 2);
        assert_eq!(Variant::Semi.batches(), 1);
        assert!(!Variant::Full.compacts());
    }
}
