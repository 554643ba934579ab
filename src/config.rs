use crate::currency::Currency;
use crate::filter::FilterSelection;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub dataset_path: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub selection: FilterSelection,
    /// Print the report as JSON instead of text.
    #[serde(default)]
    pub output_json: bool,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
