use std::fmt::Display;
use std::str::FromStr;

use crate::EnrichmentError;

/// The direction of the statistical test
///
/// # Examples
///
/// ```
/// use setenrich::Alternative;
///
/// let alternative: Alternative = "greater".parse().unwrap();
/// assert_eq!(alternative, Alternative::Greater);
/// assert_eq!(alternative.to_string(), "greater");
///
/// assert_eq!(Alternative::default(), Alternative::TwoSided);
/// assert!("both".parse::<Alternative>().is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alternative {
    /// Overlap is more extreme than expected in either direction
    #[default]
    TwoSided,
    /// Overlap is larger than expected (enrichment)
    Greater,
    /// Overlap is smaller than expected (depletion)
    Less,
}

impl Alternative {
    /// Returns the canonical name of the alternative hypothesis
    pub fn as_str(&self) -> &'static str {
        match self {
            Alternative::TwoSided => "two-sided",
            Alternative::Greater => "greater",
            Alternative::Less => "less",
        }
    }
}

impl FromStr for Alternative {
    type Err = EnrichmentError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two-sided" => Ok(Alternative::TwoSided),
            "greater" => Ok(Alternative::Greater),
            "less" => Ok(Alternative::Less),
            other => Err(EnrichmentError::InvalidAlternative(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Alternative {
    type Error = EnrichmentError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
