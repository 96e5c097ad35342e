//! Tier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordinal capability rank of a backend (Value Object).
///
/// Always within `1..=Tier::MAX`. Higher tiers are nominally stronger and
/// more expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u8);

impl Tier {
    /// Lowest tier.
    pub const MIN: u8 = 1;
    /// Highest tier; also the number of tiers in a [`TierMap`](crate::TierMap).
    pub const MAX: u8 = 10;

    /// Create a tier, rejecting values outside `1..=MAX`.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        Self::from_i64(value as i64).ok_or(DomainError::InvalidTier(value as i64))
    }

    /// Create a tier when `value` is in range, `None` otherwise.
    pub fn from_i64(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Map any caller-supplied integer onto a valid tier.
    ///
    /// Negative values fold to their absolute value, zero becomes the lowest
    /// tier and anything above [`Tier::MAX`] saturates.
    pub fn clamp(value: i64) -> Self {
        let magnitude = value.unsigned_abs();
        let folded = if magnitude == 0 { Self::MIN as u64 } else { magnitude };
        Self(folded.min(Self::MAX as u64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn lowest() -> Self {
        Self(Self::MIN)
    }

    pub fn highest() -> Self {
        Self(Self::MAX)
    }

    pub fn is_highest(self) -> bool {
        self.0 == Self::MAX
    }

    /// The tier directly above, if any.
    pub fn up(self) -> Option<Self> {
        Self::from_i64(self.0 as i64 + 1)
    }

    /// The tier directly below, if any.
    pub fn down(self) -> Option<Self> {
        Self::from_i64(self.0 as i64 - 1)
    }

    /// Every tier in ascending order.
    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::MIN..=Self::MAX).map(Tier)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Tier {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_i64(value).ok_or(DomainError::InvalidTier(value))
    }
}

impl std::str::FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidTier(i64::MIN))?;
        Tier::try_from(value)
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Tier::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_zero_is_lowest() {
        assert_eq!(Tier::clamp(0).get(), 1);
    }

    #[test]
    fn test_clamp_negative_folds_to_absolute() {
        for k in 1..=Tier::MAX as i64 {
            assert_eq!(Tier::clamp(-k), Tier::clamp(k));
        }
        assert_eq!(Tier::clamp(-3).get(), 3);
    }

    #[test]
    fn test_clamp_saturates_at_max() {
        assert_eq!(Tier::clamp(15).get(), 10);
        assert_eq!(Tier::clamp(10), Tier::clamp(11));
        assert_eq!(Tier::clamp(i64::MAX), Tier::highest());
        assert_eq!(Tier::clamp(i64::MIN), Tier::highest());
    }

    #[test]
    fn test_clamp_always_in_range() {
        for x in -50..=50 {
            let tier = Tier::clamp(x).get();
            assert!((Tier::MIN..=Tier::MAX).contains(&tier), "x = {x}");
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Tier::new(0).is_err());
        assert!(Tier::new(11).is_err());
        assert_eq!(Tier::new(7).unwrap().get(), 7);
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(Tier::lowest().down(), None);
        assert_eq!(Tier::highest().up(), None);
        assert_eq!(Tier::new(4).unwrap().up(), Some(Tier::new(5).unwrap()));
        assert_eq!(Tier::new(4).unwrap().down(), Some(Tier::new(3).unwrap()));
    }

    #[test]
    fn test_all_is_ordered_and_complete() {
        let tiers: Vec<u8> = Tier::all().map(Tier::get).collect();
        assert_eq!(tiers, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("3".parse::<Tier>().unwrap().get(), 3);
        assert!("twelve".parse::<Tier>().is_err());

        let json = serde_json::to_string(&Tier::new(6).unwrap()).unwrap();
        assert_eq!(json, "6");
        assert!(serde_json::from_str::<Tier>("0").is_err());
    }
}
