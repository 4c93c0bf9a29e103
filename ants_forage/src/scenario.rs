//! Plain text scenario files.
//!
//! A scenario lists one entry per line, a key followed by its values:
//!
//! ```text
//! rows 100
//! cols 150
//! cell_size 4
//! colony 300 200 100   # nest x, nest y and (optionally) the number of ants
//! food 400 300         # one 5x5 block of food, repeat for more
//! seed 42
//! ```
//!
//! `rows` and `cols` are required, everything else falls back to [`SimulationConfig::default`].
//! Food placements are only taken from the scenario, the defaults are not added to them.

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z_]+)((?:\s+\S+)*)$").expect("entry pattern is valid"));

/// Parses a scenario into a configuration.
///
/// The configuration is not validated, see [`SimulationConfig::validate`].
pub fn parse(contents: &str) -> Result<SimulationConfig, ConfigError> {
    let mut config = SimulationConfig {
        food_placements: Vec::new(),
        ..SimulationConfig::default()
    };
    let mut rows = None;
    let mut cols = None;

    for line in contents.lines() {
        // Everything after a `#` is a comment
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let captures = ENTRY
            .captures(line)
            .ok_or_else(|| ConfigError::UnknownKey(line.to_string()))?;
        let key = &captures[1];
        let values: Vec<&str> = captures[2].split_whitespace().collect();

        match key {
            "rows" => rows = Some(value("rows", &values, 0)?),
            "cols" => cols = Some(value("cols", &values, 0)?),
            "cell_size" => config.cell_size = value("cell_size", &values, 0)?,
            "decay" => config.decay_factor = value("decay", &values, 0)?,
            "seed" => config.seed = Some(value("seed", &values, 0)?),
            "colony" => {
                config.nest = (value("colony", &values, 0)?, value("colony", &values, 1)?);
                if values.len() > 2 {
                    config.ant_count = value("colony", &values, 2)?;
                }
            }
            "food" => config
                .food_placements
                .push((value("food", &values, 0)?, value("food", &values, 1)?)),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    config.grid_height = rows.ok_or(ConfigError::MissingKey("rows"))?;
    config.grid_width = cols.ok_or(ConfigError::MissingKey("cols"))?;

    Ok(config)
}

fn value<T: FromStr>(
    key: &'static str,
    values: &[&str],
    position: usize,
) -> Result<T, ConfigError> {
    let raw = values.get(position).ok_or_else(|| ConfigError::InvalidValue {
        key,
        value: values.join(" "),
    })?;

    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
