//! Severity, timing and environment tags
//!
//! All three are closed sets. Parsing any other string yields a
//! configuration error listing the accepted values.

use polish_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Policy classification of a sniff's importance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Critical, Self::Major, Self::Minor, Self::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Info => "info",
        }
    }
}

/// Cost classification of a sniff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timing {
    Slow,
    #[default]
    Fast,
}

impl Timing {
    pub const ALL: [Timing; 2] = [Self::Slow, Self::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Fast => "fast",
        }
    }
}

/// Execution policy selector for a polish run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Fast sniffs of critical or major severity
    #[default]
    Dev,
    /// Every eligible sniff
    Ci,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Self::Dev, Self::Ci];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Ci => "ci",
        }
    }

    /// Whether a sniff with this classification runs in this environment
    pub fn selects(&self, severity: Severity, timing: Timing) -> bool {
        match self {
            Self::Ci => true,
            Self::Dev => {
                timing == Timing::Fast && matches!(severity, Severity::Critical | Severity::Major)
            }
        }
    }
}

fn parse_closed<T: Copy>(what: &str, value: &str, all: &[T], name: fn(&T) -> &'static str) -> Result<T> {
    all.iter()
        .find(|candidate| name(candidate) == value)
        .copied()
        .ok_or_else(|| {
            let options: Vec<&str> = all.iter().map(name).collect();
            Error::invalid_value(what, value, &options)
        })
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("severity", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for Timing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("timing", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("env", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Severity::default(), Severity::Critical);
        assert_eq!(Timing::default(), Timing::Fast);
        assert_eq!(Environment::default(), Environment::Dev);
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!("minor".parse::<Severity>().unwrap(), Severity::Minor);
        assert_eq!("slow".parse::<Timing>().unwrap(), Timing::Slow);
        assert_eq!("ci".parse::<Environment>().unwrap(), Environment::Ci);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Critical".parse::<Severity>().is_err());
        assert!("FAST".parse::<Timing>().is_err());
        assert!("CI".parse::<Environment>().is_err());
    }

    #[test]
    fn test_parse_error_lists_options() {
        let err = "prod".parse::<Environment>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.message.contains("\"dev\""));
        assert!(err.message.contains("\"ci\""));
    }

    #[test]
    fn test_dev_selection() {
        let dev = Environment::Dev;
        assert!(dev.selects(Severity::Critical, Timing::Fast));
        assert!(dev.selects(Severity::Major, Timing::Fast));
        assert!(!dev.selects(Severity::Minor, Timing::Fast));
        assert!(!dev.selects(Severity::Info, Timing::Fast));
        assert!(!dev.selects(Severity::Critical, Timing::Slow));
    }

    #[test]
    fn test_ci_selects_everything() {
        for severity in Severity::ALL {
            for timing in Timing::ALL {
                assert!(Environment::Ci.selects(severity, timing));
            }
        }
    }

    proptest! {
        #[test]
        fn unknown_severity_is_configuration_error(s in "\\PC*") {
            prop_assume!(!Severity::ALL.iter().any(|v| v.as_str() == s));
            let err = s.parse::<Severity>().unwrap_err();
            prop_assert!(err.is_configuration());
        }

        #[test]
        fn unknown_timing_is_configuration_error(s in "[a-z]{0,8}") {
            prop_assume!(s != "slow" && s != "fast");
            prop_assert!(s.parse::<Timing>().unwrap_err().is_configuration());
        }

        #[test]
        fn display_parses_back(idx in 0usize..4) {
            let severity = Severity::ALL[idx];
            prop_assert_eq!(severity.to_string().parse::<Severity>().unwrap(), severity);
        }
    }
}
