//! Leverage Post-Processing
//!
//! Best-effort extraction of a leverage figure from generated text. The
//! generator is not bound to any output format, so every path has a fallback.

use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

/// Used whenever no usable leverage can be read from the text
pub const DEFAULT_LEVERAGE: u32 = 50;

pub const MIN_LEVERAGE: u32 = 1;
pub const MAX_LEVERAGE: u32 = 100;

/// Inclusive range for [`LeveragePolicy::Random`]
pub const RANDOM_LEVERAGE_MIN: u32 = 10;
pub const RANDOM_LEVERAGE_MAX: u32 = 100;

static LEVERAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)x").expect("leverage pattern is valid"));

/// How the suggestion endpoint decides its leverage figure
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeveragePolicy {
    /// Read `<n>x` from the generated text, falling back to [`DEFAULT_LEVERAGE`]
    #[default]
    Extract,
    /// Ignore the text and draw uniformly from
    /// `RANDOM_LEVERAGE_MIN..=RANDOM_LEVERAGE_MAX`
    Random,
}

impl LeveragePolicy {
    pub fn resolve<R: Rng + ?Sized>(self, text: &str, rng: &mut R) -> u32 {
        match self {
            Self::Extract => extract_leverage(text).unwrap_or(DEFAULT_LEVERAGE),
            Self::Random => rng.gen_range(RANDOM_LEVERAGE_MIN..=RANDOM_LEVERAGE_MAX),
        }
    }
}

impl FromStr for LeveragePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extract" | "text" => Ok(Self::Extract),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown leverage policy '{other}' (expected extract|random)")),
        }
    }
}

/// First `<integer>x` in `text`, if it lies in `MIN_LEVERAGE..=MAX_LEVERAGE`
pub fn extract_leverage(text: &str) -> Option<u32> {
    let digits = LEVERAGE_PATTERN.captures(text)?.get(1)?.as_str();
    digits
        .parse::<u32>()
        .ok()
        .filter(|lev| (MIN_LEVERAGE..=MAX_LEVERAGE).contains(lev))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_extracts_in_range_leverage() {
        assert_eq!(extract_leverage("go long with 35x leverage"), Some(35));
        assert_eq!(extract_leverage("SHORT IT AT 20X"), Some(20));
        assert_eq!(extract_leverage("100x or nothing"), Some(100));
        assert_eq!(extract_leverage("1x like a coward"), Some(1));
    }

    #[test]
    fn test_out_of_range_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(extract_leverage("go long with 250x leverage"), None);
        assert_eq!(
            LeveragePolicy::Extract.resolve("go long with 250x leverage", &mut rng),
            DEFAULT_LEVERAGE
        );
        assert_eq!(extract_leverage("0x leverage"), None);
        assert_eq!(extract_leverage("99999999999999999999x"), None);
    }

    #[test]
    fn test_no_pattern_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            LeveragePolicy::Extract.resolve("just hodl, fren", &mut rng),
            DEFAULT_LEVERAGE
        );
    }

    #[test]
    fn test_only_first_match_counts() {
        // first figure is out of range, later ones are ignored
        assert_eq!(extract_leverage("not 500x, maybe 20x"), None);
        assert_eq!(extract_leverage("try 20x, never 500x"), Some(20));
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(extract_leverage("\u{663}\u{665}x or rather 35x"), Some(35));
        assert_eq!(extract_leverage("\u{663}\u{665}x"), None);
    }

    #[test]
    fn test_random_policy_ignores_text() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let lev = LeveragePolicy::Random.resolve("go long with 35x leverage", &mut rng);
            assert!((RANDOM_LEVERAGE_MIN..=RANDOM_LEVERAGE_MAX).contains(&lev));
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("extract".parse::<LeveragePolicy>(), Ok(LeveragePolicy::Extract));
        assert_eq!(" RANDOM ".parse::<LeveragePolicy>(), Ok(LeveragePolicy::Random));
        assert!("yolo".parse::<LeveragePolicy>().is_err());
    }
}
