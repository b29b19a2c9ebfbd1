//! Settings resolution for the command-line adapter.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use robot_table_core::{Mode, TableSize};
use serde::Deserialize;

/// Effective settings after defaults, the config file and flags are merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Dimensions of the table.
    pub(crate) size: TableSize,
    /// Whether PLACE adds robots or relocates the active one.
    pub(crate) mode: Mode,
    /// Whether outcome messages are printed.
    pub(crate) logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: TableSize::default(),
            mode: Mode::Single,
            logging: true,
        }
    }
}

/// Values supplied on the command line. `None` leaves the lower layers
/// untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) mode: Option<Mode>,
    pub(crate) logging: Option<bool>,
}

/// Shape of the optional TOML settings file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    table: TableSection,
    options: OptionsSection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TableSection {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OptionsSection {
    multiple: Option<bool>,
    logging: Option<bool>,
}

impl FileConfig {
    /// Reads and parses a settings file.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }
}

impl Settings {
    /// Layers the config file and the command-line flags over the defaults.
    pub(crate) fn resolve(file: Option<&FileConfig>, overrides: Overrides) -> Result<Self> {
        let defaults = Self::default();
        let mut width = defaults.size.width();
        let mut height = defaults.size.height();
        let mut mode = defaults.mode;
        let mut logging = defaults.logging;

        if let Some(file) = file {
            width = file.table.width.unwrap_or(width);
            height = file.table.height.unwrap_or(height);
            if let Some(multiple) = file.options.multiple {
                mode = if multiple { Mode::Multiple } else { Mode::Single };
            }
            logging = file.options.logging.unwrap_or(logging);
        }

        width = overrides.width.unwrap_or(width);
        height = overrides.height.unwrap_or(height);
        mode = overrides.mode.unwrap_or(mode);
        logging = overrides.logging.unwrap_or(logging);

        let Some(size) = TableSize::new(width, height) else {
            bail!("table dimensions must be non-zero, got {width}x{height}");
        };

        Ok(Self {
            size,
            mode,
            logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_five_by_five_single_robot_table() {
        let settings = Settings::resolve(None, Overrides::default()).expect("defaults are valid");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.size.width(), 5);
        assert_eq!(settings.size.height(), 5);
        assert_eq!(settings.mode, Mode::Single);
        assert!(settings.logging);
    }

    #[test]
    fn flags_take_precedence_over_file() {
        let file = FileConfig::parse(
            r#"
            [table]
            width = 8
            height = 3

            [options]
            multiple = true
            logging = true
            "#,
        )
        .expect("valid config");

        let settings = Settings::resolve(
            Some(&file),
            Overrides {
                width: Some(4),
                logging: Some(false),
                ..Overrides::default()
            },
        )
        .expect("valid settings");

        assert_eq!(settings.size.width(), 4);
        assert_eq!(settings.size.height(), 3);
        assert_eq!(settings.mode, Mode::Multiple);
        assert!(!settings.logging);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = FileConfig::parse("[options]\nmultiple = true\n").expect("valid config");
        let settings = Settings::resolve(Some(&file), Overrides::default()).expect("valid");

        assert_eq!(settings.size, TableSize::default());
        assert_eq!(settings.mode, Mode::Multiple);
    }

    #[test]
    fn flags_can_switch_file_options_back_off() {
        let file = FileConfig::parse("[options]\nmultiple = true\nlogging = false\n")
            .expect("valid config");

        let settings = Settings::resolve(
            Some(&file),
            Overrides {
                mode: Some(Mode::Single),
                logging: Some(true),
                ..Overrides::default()
            },
        )
        .expect("valid settings");

        assert_eq!(settings.mode, Mode::Single);
        assert!(settings.logging);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[table]\ndepth = 3\n").is_err());
        assert!(FileConfig::parse("[colours]\nrobot = \"red\"\n").is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let error = Settings::resolve(
            None,
            Overrides {
                height: Some(0),
                ..Overrides::default()
            },
        )
        .expect_err("zero height must fail");
        assert!(error.to_string().contains("non-zero"), "{error}");
    }
}
