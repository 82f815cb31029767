use std::fmt;
use std::str::FromStr;

use super::CellState;
use crate::error::{Error, Result};

/// Set of neighbour counts 0..=8, one bit per count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighbourSet(u16);

impl NeighbourSet {
    /// Parse a string of decimal digits `0`-`8`. Order and repeats don't matter.
    pub fn parse(digits: &str) -> Result<Self> {
        digits.chars().try_fold(Self(0), |set, c| match c.to_digit(10) {
            Some(n) if n <= 8 => Ok(Self(set.0 | 1 << n)),
            _ => Err(Error::InvalidRule(format!(
                "'{c}' in \"{digits}\" is not a neighbour count 0-8"
            ))),
        })
    }

    #[inline]
    pub const fn contains(self, neighbours: u8) -> bool {
        neighbours <= 8 && self.0 & (1 << neighbours) != 0
    }
}

impl fmt::Display for NeighbourSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (0..=8u8)
            .filter(|&n| self.contains(n))
            .try_for_each(|n| write!(f, "{n}"))
    }
}

/// Life-like birth/survival rule.
///
/// A dead cell with `n` live neighbours is born iff `n` is in the birth set;
/// a live cell survives iff `n` is in the survival set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    birth_digits: String,
    survival_digits: String,
    birth: NeighbourSet,
    survival: NeighbourSet,
}

impl Rule {
    /// Build a rule from the two digit strings, e.g. `Rule::new("3", "23")`.
    pub fn new(birth: &str, survival: &str) -> Result<Self> {
        Ok(Self {
            birth: NeighbourSet::parse(birth)?,
            survival: NeighbourSet::parse(survival)?,
            birth_digits: birth.to_owned(),
            survival_digits: survival.to_owned(),
        })
    }

    /// Birth rule as it was supplied
    pub fn birth(&self) -> &str {
        &self.birth_digits
    }

    /// Survival rule as it was supplied
    pub fn survival(&self) -> &str {
        &self.survival_digits
    }

    #[inline]
    pub const fn is_born(&self, neighbours: u8) -> bool {
        self.birth.contains(neighbours)
    }

    #[inline]
    pub const fn survives(&self, neighbours: u8) -> bool {
        self.survival.contains(neighbours)
    }

    /// Apply rule to compute next cell state
    #[inline]
    pub fn evolve(&self, current: CellState, neighbours: u8) -> CellState {
        let alive = if current.is_alive() {
            self.survives(neighbours)
        } else {
            self.is_born(neighbours)
        };
        if alive {
            CellState::live_with(neighbours)
        } else {
            CellState::DEAD
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        presets::conway()
    }
}

/// Parses `B3/S23` notation. Case-insensitive prefixes; either half may be empty.
impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRule(format!("\"{s}\" is not in B<digits>/S<digits> form"));
        let (b, rest) = s.trim().split_once('/').ok_or_else(invalid)?;
        let birth = b.strip_prefix(['B', 'b']).ok_or_else(invalid)?;
        let survival = rest.strip_prefix(['S', 's']).ok_or_else(invalid)?;
        Self::new(birth, survival)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survival)
    }
}

/// Well-known life-like rules
pub mod presets {
    use super::{NeighbourSet, Rule};

    fn known(birth: &str, survival: &str) -> Rule {
        // Digits here are literals in 0..=8, parsing cannot fail.
        let parse = |d: &str| NeighbourSet::parse(d).unwrap_or_default();
        Rule {
            birth: parse(birth),
            survival: parse(survival),
            birth_digits: birth.to_owned(),
            survival_digits: survival.to_owned(),
        }
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Rule {
        known("3", "23")
    }

    /// HighLife (B36/S23), has a replicator
    pub fn high_life() -> Rule {
        known("36", "23")
    }

    /// Seeds (B2/S), every live cell dies each generation
    pub fn seeds() -> Rule {
        known("2", "")
    }

    /// Day & Night (B3678/S34678), symmetric under inversion
    pub fn day_and_night() -> Rule {
        known("3678", "34678")
    }

    /// Look a rule up by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Rule> {
        let rule = match name.to_ascii_lowercase().as_str() {
            "conway" | "life" => conway(),
            "highlife" => high_life(),
            "seeds" => seeds(),
            "daynight" | "day&night" => day_and_night(),
            _ => return None,
        };
        Some(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_rules() {
        let rule = presets::conway();

        // Underpopulation
        assert_eq!(rule.evolve(CellState::SEEDED, 0), CellState::DEAD);
        assert_eq!(rule.evolve(CellState::SEEDED, 1), CellState::DEAD);

        // Survival
        assert!(rule.evolve(CellState::SEEDED, 2).is_alive());
        assert!(rule.evolve(CellState::SEEDED, 3).is_alive());

        // Overpopulation
        assert_eq!(rule.evolve(CellState::SEEDED, 4), CellState::DEAD);

        // Reproduction records the neighbour count
        assert_eq!(rule.evolve(CellState::DEAD, 3), CellState(3));
        assert_eq!(rule.evolve(CellState::DEAD, 2), CellState::DEAD);
    }

    #[test]
    fn test_every_count_against_digit_sets() {
        let rule = Rule::new("1357", "02468").unwrap();
        for n in 0..=8u8 {
            let odd = n % 2 == 1;
            assert_eq!(rule.is_born(n), odd, "birth with {n}");
            assert_eq!(rule.survives(n), !odd, "survival with {n}");
            assert_eq!(rule.evolve(CellState::DEAD, n).is_alive(), odd);
            assert_eq!(rule.evolve(CellState::SET, n).is_alive(), !odd);
        }
    }

    #[test]
    fn test_empty_birth_never_births() {
        let rule = Rule::new("", "012345678").unwrap();
        for n in 0..=8 {
            assert!(!rule.evolve(CellState::DEAD, n).is_alive());
            assert!(rule.evolve(CellState::SET, n).is_alive());
        }
    }

    #[test]
    fn test_empty_survival_never_survives() {
        let rule = Rule::new("012345678", "").unwrap();
        for n in 0..=8 {
            assert!(rule.evolve(CellState::DEAD, n).is_alive());
            assert!(!rule.evolve(CellState::SET, n).is_alive());
        }
    }

    #[test]
    fn test_rejects_nine_and_letters() {
        assert!(matches!(Rule::new("39", "23"), Err(Error::InvalidRule(_))));
        assert!(matches!(Rule::new("3", "2x"), Err(Error::InvalidRule(_))));
    }

    #[test]
    fn test_notation_round_trip() {
        let rule: Rule = "B36/S23".parse().unwrap();
        assert_eq!(rule, presets::high_life());
        assert_eq!(rule.to_string(), "B36/S23");

        let seeds: Rule = "b2/s".parse().unwrap();
        assert_eq!(seeds.survival(), "");
        assert!("3/23".parse::<Rule>().is_err());
    }

    #[test]
    fn test_presets_by_name() {
        assert_eq!(presets::by_name("HighLife"), Some(presets::high_life()));
        assert_eq!(presets::by_name("day&night"), Some(presets::day_and_night()));
        assert_eq!(presets::by_name("Life"), Some(Rule::default()));
        assert_eq!(presets::by_name("B3/S23"), None);
    }

    #[test]
    fn test_rule_strings_retained() {
        let rule = Rule::new("33", "32").unwrap();
        assert_eq!(rule.birth(), "33");
        assert_eq!(rule.survival(), "32");
        assert_eq!(rule.to_string(), "B3/S23");
    }
}
