use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Pattern, Rule, patterns, presets};
use crate::error::{Error, Result};
use crate::rendering::{CellStyle, Rgb, parse_colour};

/// User-facing session settings. Colours and rules are kept as text until
/// [`SessionConfig::validate`] resolves them against a concrete surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Edge of one cell in pixels
    pub cell_size: usize,
    /// Top-left corner on the surface; `None` centres that axis.
    pub x: Option<i64>,
    pub y: Option<i64>,
    /// Initial live percentage when (re)seeding
    pub percent: u32,
    /// Generations before a forced reseed
    pub max_cycles: u32,
    /// Time between generations
    pub interval: Duration,
    pub colour: String,
    pub border_colour: String,
    pub birth: String,
    pub survival: String,
    /// Clear the whole surface before the first frame
    pub erase: bool,
    /// Fixed random seed for reproducible runs
    pub rng_seed: Option<u64>,
    /// Named pattern placed in the centre instead of random seeding
    pub pattern: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            cell_size: 20,
            x: None,
            y: None,
            percent: 30,
            max_cycles: 60,
            interval: Duration::from_millis(1000),
            colour: "green".to_owned(),
            border_colour: "cyan".to_owned(),
            birth: "3".to_owned(),
            survival: "23".to_owned(),
            erase: false,
            rng_seed: None,
            pattern: None,
        }
    }
}

/// A [`SessionConfig`] checked against a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub rule: Rule,
    pub style: CellStyle,
    pub region_width: usize,
    pub region_height: usize,
    pub x: i64,
    pub y: i64,
    pub pattern: Option<Pattern>,
}

impl SessionConfig {
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_position(mut self, x: i64, y: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_rule(mut self, rule: &Rule) -> Self {
        rule.birth().clone_into(&mut self.birth);
        rule.survival().clone_into(&mut self.survival);
        self
    }

    pub fn with_colours(mut self, colour: &str, border_colour: &str) -> Self {
        colour.clone_into(&mut self.colour);
        border_colour.clone_into(&mut self.border_colour);
        self
    }

    pub fn with_percent(mut self, percent: u32) -> Self {
        self.percent = percent;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u32) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_erase(mut self, erase: bool) -> Self {
        self.erase = erase;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_pattern(mut self, name: &str) -> Self {
        self.pattern = Some(name.to_owned());
        self
    }

    /// Override fields from `FBLIFE_*` variables looked up through `lookup`.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `FBLIFE_WIDTH`, `FBLIFE_HEIGHT` | grid size in cells |
    /// | `FBLIFE_CELL_SIZE` | cell edge in pixels |
    /// | `FBLIFE_X`, `FBLIFE_Y` | region position (default: centred) |
    /// | `FBLIFE_PERCENT` | initial live percentage |
    /// | `FBLIFE_MAX_CYCLES` | generations before a reseed |
    /// | `FBLIFE_INTERVAL` | milliseconds between generations |
    /// | `FBLIFE_COLOUR`, `FBLIFE_BORDER_COLOUR` | name or `#RRGGBB` |
    /// | `FBLIFE_B_RULE`, `FBLIFE_S_RULE` | birth / survival digits |
    /// | `FBLIFE_RULE` | `B3/S23` notation or a preset name |
    /// | `FBLIFE_ERASE` | `1`/`true` clears the surface first |
    /// | `FBLIFE_SEED` | fixed random seed |
    /// | `FBLIFE_PATTERN` | `block`, `blinker` or `glider` |
    ///
    /// `FBLIFE_RULE` is applied after the separate digit variables.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| non_empty(&lookup, name);

        if let Some(width) = setting(&lookup, "FBLIFE_WIDTH")? {
            self.width = width;
        }
        if let Some(height) = setting(&lookup, "FBLIFE_HEIGHT")? {
            self.height = height;
        }
        if let Some(cell_size) = setting(&lookup, "FBLIFE_CELL_SIZE")? {
            self.cell_size = cell_size;
        }
        if let Some(x) = setting(&lookup, "FBLIFE_X")? {
            self.x = Some(x);
        }
        if let Some(y) = setting(&lookup, "FBLIFE_Y")? {
            self.y = Some(y);
        }
        if let Some(percent) = setting(&lookup, "FBLIFE_PERCENT")? {
            self.percent = percent;
        }
        if let Some(max_cycles) = setting(&lookup, "FBLIFE_MAX_CYCLES")? {
            self.max_cycles = max_cycles;
        }
        if let Some(millis) = setting(&lookup, "FBLIFE_INTERVAL")? {
            self.interval = Duration::from_millis(millis);
        }
        if let Some(colour) = get("FBLIFE_COLOUR") {
            self.colour = colour;
        }
        if let Some(border_colour) = get("FBLIFE_BORDER_COLOUR") {
            self.border_colour = border_colour;
        }
        if let Some(birth) = lookup("FBLIFE_B_RULE") {
            self.birth = birth;
        }
        if let Some(survival) = lookup("FBLIFE_S_RULE") {
            self.survival = survival;
        }
        if let Some(rule) = get("FBLIFE_RULE") {
            let rule = match presets::by_name(rule.trim()) {
                Some(rule) => rule,
                None => rule.parse()?,
            };
            self = self.with_rule(&rule);
        }
        if let Some(erase) = get("FBLIFE_ERASE") {
            self.erase = match erase.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid_setting("FBLIFE_ERASE", &erase)),
            };
        }
        if let Some(seed) = setting(&lookup, "FBLIFE_SEED")? {
            self.rng_seed = Some(seed);
        }
        if let Some(pattern) = get("FBLIFE_PATTERN") {
            self.pattern = Some(pattern.trim().to_owned());
        }
        Ok(self)
    }

    /// Resolve colours and rule, and place the display region on a
    /// `surface_width` x `surface_height` surface.
    pub fn validate(&self, surface_width: usize, surface_height: usize) -> Result<ResolvedConfig> {
        let style = CellStyle {
            fill: parse_colour(&self.colour)?,
            border: parse_colour(&self.border_colour)?,
            background: Rgb::BLACK,
        };
        let rule = Rule::new(&self.birth, &self.survival)?;
        let pattern = self
            .pattern
            .as_deref()
            .map(|name| {
                patterns::by_name(name).ok_or_else(|| Error::UnknownPattern(name.to_owned()))
            })
            .transpose()?;

        let invalid = || Error::InvalidDimension { width: self.width, height: self.height };
        if self.width == 0 || self.height == 0 || self.cell_size == 0 {
            return Err(invalid());
        }
        let region_width = self.width.checked_mul(self.cell_size).ok_or_else(invalid)?;
        let region_height = self.height.checked_mul(self.cell_size).ok_or_else(invalid)?;

        if region_width > surface_width || region_height > surface_height {
            return Err(Error::RegionTooLarge {
                region_width,
                region_height,
                surface_width,
                surface_height,
            });
        }

        let centre = |surface: usize, region: usize| ((surface - region) / 2) as i64;
        let x = self.x.unwrap_or_else(|| centre(surface_width, region_width));
        let y = self.y.unwrap_or_else(|| centre(surface_height, region_height));
        let fits = |offset: i64, region: usize, surface: usize| {
            offset >= 0 && offset.saturating_add(region as i64) <= surface as i64
        };
        if !fits(x, region_width, surface_width) || !fits(y, region_height, surface_height) {
            return Err(Error::RegionOffscreen { x, y });
        }

        debug!("Display region is {region_width} x {region_height}");
        debug!("TL corner is {x} x {y}");
        Ok(ResolvedConfig { rule, style, region_width, region_height, x, y, pattern })
    }
}

fn invalid_setting(name: &str, value: &str) -> Error {
    Error::InvalidSetting { name: name.to_owned(), value: value.to_owned() }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>> {
    non_empty(lookup, name)
        .map(|value| value.trim().parse().map_err(|_| invalid_setting(name, &value)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_centre_on_surface() {
        let resolved = SessionConfig::default().validate(800, 600).unwrap();
        assert_eq!((resolved.region_width, resolved.region_height), (400, 400));
        assert_eq!((resolved.x, resolved.y), (200, 100));
        assert_eq!(resolved.rule, presets::conway());
        assert_eq!(resolved.style.fill, Rgb::new(0, 128, 0));
        assert_eq!(resolved.style.border, Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_explicit_position_kept() {
        let resolved = SessionConfig::default()
            .with_grid(4, 4)
            .with_cell_size(10)
            .with_position(0, 60)
            .validate(100, 100)
            .unwrap();
        assert_eq!((resolved.x, resolved.y), (0, 60));
    }

    #[test]
    fn test_region_larger_than_surface() {
        let err = SessionConfig::default().validate(300, 600).unwrap_err();
        assert!(matches!(err, Error::RegionTooLarge { region_width: 400, .. }));
    }

    #[test]
    fn test_region_partly_offscreen() {
        let config = SessionConfig::default().with_grid(4, 4).with_cell_size(10);
        assert_eq!(
            config.clone().with_position(70, 0).validate(100, 100),
            Err(Error::RegionOffscreen { x: 70, y: 0 })
        );
        assert!(config.with_position(-1, 0).validate(100, 100).is_err());
    }

    #[test]
    fn test_bad_colour_reported() {
        let config = SessionConfig::default().with_colours("mauve", "cyan");
        assert_eq!(config.validate(800, 800), Err(Error::UnknownColour("mauve".to_owned())));
    }

    #[test]
    fn test_bad_rule_reported() {
        let mut config = SessionConfig::default();
        config.survival = "29".to_owned();
        assert!(matches!(config.validate(800, 800), Err(Error::InvalidRule(_))));
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let config = SessionConfig::default().with_cell_size(0);
        assert!(matches!(config.validate(800, 800), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn test_with_rule_copies_digits() {
        let config = SessionConfig::default().with_rule(&presets::high_life());
        assert_eq!((config.birth.as_str(), config.survival.as_str()), ("36", "23"));
    }

    #[test]
    fn test_env_overrides_every_setting() {
        let config = SessionConfig::default()
            .apply_env(env(&[
                ("FBLIFE_WIDTH", "30"),
                ("FBLIFE_HEIGHT", "10"),
                ("FBLIFE_CELL_SIZE", "8"),
                ("FBLIFE_X", "4"),
                ("FBLIFE_Y", "12"),
                ("FBLIFE_PERCENT", "55"),
                ("FBLIFE_MAX_CYCLES", "200"),
                ("FBLIFE_INTERVAL", "250"),
                ("FBLIFE_COLOUR", "#ff8000"),
                ("FBLIFE_BORDER_COLOUR", "navy"),
                ("FBLIFE_B_RULE", "36"),
                ("FBLIFE_S_RULE", "23"),
                ("FBLIFE_ERASE", "true"),
                ("FBLIFE_SEED", "42"),
                ("FBLIFE_PATTERN", "glider"),
            ]))
            .unwrap();

        let expected = SessionConfig {
            width: 30,
            height: 10,
            cell_size: 8,
            x: Some(4),
            y: Some(12),
            percent: 55,
            max_cycles: 200,
            interval: Duration::from_millis(250),
            colour: "#ff8000".to_owned(),
            border_colour: "navy".to_owned(),
            birth: "36".to_owned(),
            survival: "23".to_owned(),
            erase: true,
            rng_seed: Some(42),
            pattern: Some("glider".to_owned()),
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_env_absent_keeps_defaults() {
        let config = SessionConfig::default().apply_env(env(&[("FBLIFE_WIDTH", "")])).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_env_rule_notation_and_preset_names() {
        let notation = SessionConfig::default()
            .apply_env(env(&[("FBLIFE_B_RULE", "1"), ("FBLIFE_RULE", "B2/S")]))
            .unwrap();
        assert_eq!((notation.birth.as_str(), notation.survival.as_str()), ("2", ""));

        let named = SessionConfig::default()
            .apply_env(env(&[("FBLIFE_RULE", "HighLife")]))
            .unwrap();
        assert_eq!(named.validate(800, 800).unwrap().rule, presets::high_life());

        let empty_survival = SessionConfig::default().apply_env(env(&[("FBLIFE_S_RULE", "")]));
        assert_eq!(empty_survival.unwrap().survival, "");
    }

    #[test]
    fn test_env_bad_values_reported() {
        let err = SessionConfig::default().apply_env(env(&[("FBLIFE_PERCENT", "lots")]));
        assert_eq!(
            err,
            Err(Error::InvalidSetting {
                name: "FBLIFE_PERCENT".to_owned(),
                value: "lots".to_owned(),
            })
        );
        let err = SessionConfig::default().apply_env(env(&[("FBLIFE_X", "-")]));
        assert!(matches!(err, Err(Error::InvalidSetting { .. })));
        let err = SessionConfig::default().apply_env(env(&[("FBLIFE_ERASE", "maybe")]));
        assert!(matches!(err, Err(Error::InvalidSetting { .. })));
        let err = SessionConfig::default().apply_env(env(&[("FBLIFE_RULE", "fast")]));
        assert!(matches!(err, Err(Error::InvalidRule(_))));
    }

    #[test]
    fn test_pattern_resolved_by_name() {
        let resolved = SessionConfig::default().with_pattern("Blinker").validate(800, 800).unwrap();
        assert_eq!(resolved.pattern, Some(patterns::blinker()));

        let unknown = SessionConfig::default().with_pattern("puffer").validate(800, 800);
        assert_eq!(unknown, Err(Error::UnknownPattern("puffer".to_owned())));
    }
}
