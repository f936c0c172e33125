//! Filter processor configuration.
//!
//! This module defines the YAML configuration format for the filter
//! pipeline: the blur kill-switch, default watermark fit bounds, and the
//! per-request directive controls.
//!
//! Default values are sourced from `crate::constants`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_FILTER_OPS, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

fn default_disable_blur() -> bool {
    false
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

fn default_disabled_filters() -> HashSet<String> {
    HashSet::new()
}

fn default_max_filter_ops() -> usize {
    DEFAULT_MAX_FILTER_OPS
}

/// Filter processor configuration (YAML format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Force fill to flat-color mode even when "blur" is requested
    #[serde(default = "default_disable_blur")]
    pub disable_blur: bool,
    /// Default watermark fit width when no ratio args are given
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Default watermark fit height when no ratio args are given
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Directive names to skip (treated exactly like unknown names)
    #[serde(default = "default_disabled_filters")]
    pub disabled_filters: HashSet<String>,
    /// Reject requests carrying more directives than this (0 = unlimited)
    #[serde(default = "default_max_filter_ops")]
    pub max_filter_ops: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            disable_blur: default_disable_blur(),
            max_width: default_max_width(),
            max_height: default_max_height(),
            disabled_filters: default_disabled_filters(),
            max_filter_ops: default_max_filter_ops(),
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration document from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// True when the named filter is administratively disabled
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_filters.contains(name)
    }
}
