//! Pipeline policy

use picomon_core::{Error, Result};
use picomon_plot::PlotSettings;
use picomon_source::PhaseFileWriter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the reduced phase series is written, if anywhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistTarget {
    pub folder: PathBuf,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "picomon.dat".to_string()
}

impl PersistTarget {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            filename: default_filename(),
        }
    }

    pub fn writer(&self) -> PhaseFileWriter {
        PhaseFileWriter::new(&self.folder, &self.filename)
    }
}

/// Settings fixed for a whole invocation
///
/// Every field has a default, so a JSON policy only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Most samples kept when the averaging factor is automatic
    pub downsample_cap: usize,
    pub show_frequency: bool,
    pub show_stability: bool,
    /// Rise, in residual deviations, that moves the legend down
    pub legend_flip_multiple: f64,
    /// Frequency plots shorter than this are drawn as steps
    pub squared_below: usize,
    pub persist: Option<PersistTarget>,
    pub width: u32,
    pub height: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            downsample_cap: 5000,
            show_frequency: true,
            show_stability: true,
            legend_flip_multiple: 3.0,
            squared_below: 1000,
            persist: None,
            width: 1024,
            height: 768,
        }
    }
}

impl PipelineConfig {
    /// Small plots for an embedded page
    pub fn thumbnail() -> Self {
        Self {
            downsample_cap: 600,
            width: 600,
            height: 400,
            ..Self::default()
        }
    }

    /// Default policy that also writes the reduced phase file
    pub fn archiving(folder: impl Into<PathBuf>) -> Self {
        Self {
            persist: Some(PersistTarget::new(folder)),
            ..Self::default()
        }
    }

    /// Parse a JSON policy and validate it
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::InvalidParameter(format!("pipeline config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.downsample_cap == 0 {
            return Err(Error::InvalidParameter(
                "Downsampling cap must be at least 1".to_string(),
            ));
        }
        if !(self.legend_flip_multiple.is_finite() && self.legend_flip_multiple > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Legend flip multiple {} must be positive",
                self.legend_flip_multiple
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidParameter(
                "Plot dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn plot_settings(&self) -> PlotSettings {
        PlotSettings {
            show_frequency: self.show_frequency,
            show_stability: self.show_stability,
            legend_flip_multiple: self.legend_flip_multiple,
            squared_below: self.squared_below,
        }
    }
}
