use serde::{Deserialize, Serialize};
use crate::error::TooltipError;

/// Attribute a container may carry to override the defaults below
pub const CONFIG_ATTRIBUTE: &str = "data-tooltip-config";

/// Settings for one tooltip controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Class marking an element as a booking item
    pub item_class: String,
    /// Class given to the created tooltip element
    pub tooltip_class: String,
    /// Attribute holding the structured JSON payload
    pub payload_attribute: String,
    /// Distance between pointer and tooltip corner, in CSS px
    pub offset: f64,
    /// Shown in place of any missing field
    pub placeholder: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            item_class: "booking-item".to_string(),
            tooltip_class: "booking-tooltip".to_string(),
            payload_attribute: "data-booking".to_string(),
            offset: 10.0,
            placeholder: "N/A".to_string(),
        }
    }
}

impl TooltipConfig {
    /// Parse a config from JSON; keys that are absent keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a value is out of range
    pub fn from_json(json: &str) -> Result<Self, TooltipError> {
        Self::default().with_overrides(json)
    }

    /// Apply the keys of a JSON object on top of this config
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an object, a value has the wrong type,
    /// or the offset is negative / not finite
    pub fn with_overrides(&self, json: &str) -> Result<Self, TooltipError> {
        let invalid = |e: serde_json::Error| TooltipError::InvalidConfig(e.to_string());

        let mut merged = serde_json::to_value(self).map_err(invalid)?;
        let overrides: serde_json::Value = serde_json::from_str(json).map_err(invalid)?;
        let (Some(base), Some(overrides)) = (merged.as_object_mut(), overrides.as_object()) else {
            return Err(TooltipError::InvalidConfig("overrides must be a JSON object".to_string()));
        };
        base.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        let config: Self = serde_json::from_value(merged).map_err(invalid)?;
        if !config.offset.is_finite() || config.offset < 0.0 {
            return Err(TooltipError::InvalidConfig(format!(
                "offset must be a non-negative number, got {}",
                config.offset
            )));
        }

        Ok(config)
    }

    /// CSS selector matching booking items
    #[must_use]
    pub fn item_selector(&self) -> String {
        format!(".{}", self.item_class)
    }
}
