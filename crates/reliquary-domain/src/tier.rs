//! Tier module - numbered levels an item record belongs to

use std::fmt;

/// Tier of an item record
///
/// Tiers are numbered from 1 upwards. The same item name usually exists in
/// several tiers, each with its own attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u32);

impl Tier {
    /// The lowest tier, also used when a source cell cannot be read
    pub const FIRST: Tier = Tier(1);

    /// Create a tier, rejecting zero
    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    /// Get the raw tier number
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Parse a tier from a source cell
    ///
    /// Accepts integers and integral decimals (`"2"`, `" 3 "`, `"4.0"`).
    /// Returns `None` for anything else, including zero and negatives.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u32>() {
            return Self::new(value);
        }

        let value = trimmed.parse::<f64>().ok()?;
        if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= u32::MAX as f64 {
            Self::new(value as u32)
        } else {
            None
        }
    }

    /// Parse a tier, falling back to [`Tier::FIRST`]
    pub fn parse_or_first(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::FIRST)
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

impl TryFrom<u32> for Tier {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "Tier must be at least 1".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_rejects_zero() {
        assert!(Tier::new(0).is_none());
        assert_eq!(Tier::new(3).map(|t| t.get()), Some(3));
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(Tier::parse("2"), Tier::new(2));
        assert_eq!(Tier::parse(" 3 "), Tier::new(3));
        assert_eq!(Tier::parse("4.0"), Tier::new(4));
        assert_eq!(Tier::parse("2.5"), None);
        assert_eq!(Tier::parse("-1"), None);
        assert_eq!(Tier::parse(""), None);
        assert_eq!(Tier::parse("abc"), None);
    }

    #[test]
    fn test_parse_or_first_falls_back() {
        assert_eq!(Tier::parse_or_first("x"), Tier::FIRST);
        assert_eq!(Tier::parse_or_first("0"), Tier::FIRST);
        assert_eq!(Tier::parse_or_first("5").get(), 5);
    }
}
