use std::fmt::Display;

use serde::Serialize;

use crate::error::AssemblyError;

/// A TCP/UDP port in 1-65535
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// `name` is the option path reported back when `value` is out of range
    pub fn new(name: &str, value: i64) -> Result<Self, AssemblyError> {
        u16::try_from(value)
            .ok()
            .filter(|p| *p != 0)
            .map(Port)
            .ok_or_else(|| AssemblyError::InvalidPort {
                name: name.to_string(),
                value,
            })
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(1883)]
    #[case(65535)]
    fn in_range(#[case] value: i64) {
        assert_eq!(i64::from(Port::new("p", value).unwrap().get()), value);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(65536)]
    #[case(70000)]
    #[case(i64::MAX)]
    fn out_of_range(#[case] value: i64) {
        assert!(matches!(
            Port::new("p", value),
            Err(AssemblyError::InvalidPort { value: v, .. }) if v == value
        ));
    }
}
