use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NmfParamsError;

/// Which update rule the factorization iterates with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateRules {
    /// Multiplicative distance update rule
    #[default]
    MultDist,
    /// Multiplicative divergence update rule
    MultDiv,
    /// Alternating least squares
    Als,
}

impl UpdateRules {
    pub const ALL: [UpdateRules; 3] = [UpdateRules::MultDist, UpdateRules::MultDiv, UpdateRules::Als];

    pub fn name(&self) -> &'static str {
        match self {
            UpdateRules::MultDist => "multdist",
            UpdateRules::MultDiv => "multdiv",
            UpdateRules::Als => "als",
        }
    }
}

impl fmt::Display for UpdateRules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for UpdateRules {
    type Err = NmfParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UpdateRules::ALL
            .iter()
            .find(|rule| rule.name() == s)
            .copied()
            .ok_or_else(|| NmfParamsError::InvalidUpdateRule(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_rule() {
        assert_eq!("multdist".parse::<UpdateRules>(), Ok(UpdateRules::MultDist));
        assert_eq!("multdiv".parse::<UpdateRules>(), Ok(UpdateRules::MultDiv));
        assert_eq!("als".parse::<UpdateRules>(), Ok(UpdateRules::Als));
    }

    #[test]
    fn rejects_unknown_rules() {
        assert_eq!(
            "invalid_rule".parse::<UpdateRules>(),
            Err(NmfParamsError::InvalidUpdateRule(String::from("invalid_rule")))
        );
        // names are case sensitive
        assert!("ALS".parse::<UpdateRules>().is_err());
        assert!("".parse::<UpdateRules>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for rule in UpdateRules::ALL {
            assert_eq!(rule.to_string().parse::<UpdateRules>(), Ok(rule));
        }
    }

    #[test]
    fn default_is_multdist() {
        assert_eq!(UpdateRules::default(), UpdateRules::MultDist);
    }

    #[test]
    fn serde_uses_the_lowercase_names() {
        assert_eq!(serde_json::to_string(&UpdateRules::MultDiv).unwrap(), "\"multdiv\"");
        let rule: UpdateRules = serde_json::from_str("\"als\"").unwrap();
        assert_eq!(rule, UpdateRules::Als);
    }
}
