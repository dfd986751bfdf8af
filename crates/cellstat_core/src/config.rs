//! Configuration for the analysis tools.
//!
//! Every section and field is optional in the file; anything left out takes
//! the value from the `Default` impl.
//!
//! ## Example `cellstat.toml`
//!
//! ```toml
//! [apoptosis]
//! codes = [1, 2]
//! output = "title=apoptosis.csv"
//!
//! [resource]
//! negate_propagule_child_not = false
//!
//! [plot]
//! width = 1200
//! height = 700
//!
//! [plot.treatment_labels]
//! "resource-wave__channelsense-yes__nlev-two" = "standard"
//! ```

use crate::apoptosis::DEFAULT_APOPTOSIS_CODES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "cellstat.toml";

/// Output file of the apoptosis report when neither the CLI nor the config names one.
pub const DEFAULT_APOPTOSIS_OUTPUT: &str =
    "script_hash=TODO~source_hash=TODO~emp_hash=TODO~title=apoptosis.csv";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApoptosisConfig {
    /// Apoptosis type codes counted as apoptotic.
    pub codes: Vec<u64>,
    pub output: String,
}

impl Default for ApoptosisConfig {
    fn default() -> Self {
        Self {
            codes: DEFAULT_APOPTOSIS_CODES.to_vec(),
            output: DEFAULT_APOPTOSIS_OUTPUT.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ResourceConfig {
    /// Evaluate `means_propagule_childNot` with a not-equal comparison instead
    /// of repeating the `means_propagule_child` comparison.
    pub negate_propagule_child_not: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    /// Display label of each treatment code.
    pub treatment_labels: BTreeMap<String, String>,
    pub width: u32,
    pub height: u32,
    pub surrounded_output: String,
    pub duration_output: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let treatment_labels = [
            ("resource-even__channelsense-no__nlev-two", "even+blind"),
            ("resource-wave__channelsense-no__nlev-two", "blind"),
            ("resource-wave__channelsense-yes__nlev-onesmall", "small wave"),
            ("resource-even__channelsense-yes__nlev-two", "even"),
            ("resource-wave__channelsense-yes__nlev-onebig", "large wave"),
            ("resource-wave__channelsense-yes__nlev-two", "standard"),
        ]
        .into_iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect();

        Self {
            treatment_labels,
            width: 1200,
            height: 700,
            surrounded_output: "title=reproductive_labor_surrounded.svg".to_string(),
            duration_output: "level-1-channel-dur-channel-weighted-frequency.svg".to_string(),
        }
    }
}

impl PlotConfig {
    /// Display label of `treatment`, ignoring a leading `treat=`.
    pub fn treatment_label(&self, treatment: &str) -> Option<&str> {
        let code = treatment.strip_prefix("treat=").unwrap_or(treatment);
        self.treatment_labels.get(code).map(String::as_str)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub apoptosis: ApoptosisConfig,
    pub resource: ResourceConfig,
    pub plot: PlotConfig,
}

impl AnalysisConfig {
    /// Reads the configuration at `path`. A missing file yields the defaults;
    /// an unreadable or malformed one is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration parameters.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.apoptosis.codes.is_empty(),
            "At least one apoptosis code must be counted"
        );
        anyhow::ensure!(
            !self.apoptosis.output.is_empty(),
            "Apoptosis output path must not be empty"
        );
        anyhow::ensure!(self.plot.width > 0, "Plot width must be positive");
        anyhow::ensure!(self.plot.height > 0, "Plot height must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            [resource]
            negate_propagule_child_not = true
            "#,
        )
        .unwrap();
        assert!(config.resource.negate_propagule_child_not);
        assert_eq!(config.apoptosis.codes, vec![1, 2]);
        assert_eq!(config.plot.treatment_labels.len(), 6);
    }

    #[test]
    fn test_empty_codes_rejected() {
        let config = AnalysisConfig {
            apoptosis: ApoptosisConfig {
                codes: Vec::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_plot_size_rejected() {
        let config = AnalysisConfig {
            plot: PlotConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_treatment_label_strips_prefix() {
        let plot = PlotConfig::default();
        assert_eq!(
            plot.treatment_label("treat=resource-wave__channelsense-yes__nlev-two"),
            Some("standard")
        );
        assert_eq!(
            plot.treatment_label("resource-even__channelsense-no__nlev-two"),
            Some("even+blind")
        );
        assert_eq!(plot.treatment_label("treat=unknown"), None);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AnalysisConfig::load("definitely/not/here/cellstat.toml").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }
}
