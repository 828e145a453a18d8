//! Experimental feature toggles, read once at startup

/// Environment variable that turns experimental commands on
pub const EXPERIMENTAL_ENV: &str = "CFN_CLI_HOOKS_EXPERIMENTAL";

/// The only value of [`EXPERIMENTAL_ENV`] that enables experimental commands
const ENABLED: &str = "enabled";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// `enable-lambda-function-invoker`
    pub lambda_invoker: bool,
}

impl Features {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(EXPERIMENTAL_ENV).ok().as_deref())
    }

    /// Case sensitive: `Enabled` or `true` leave features off
    pub fn from_value(value: Option<&str>) -> Self {
        Self {
            lambda_invoker: value == Some(ENABLED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_only_exact_value_enables() {
        assert!(Features::from_value(Some("enabled")).lambda_invoker);
        assert!(!Features::from_value(Some("Enabled")).lambda_invoker);
        assert!(!Features::from_value(Some("true")).lambda_invoker);
        assert!(!Features::from_value(None).lambda_invoker);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(EXPERIMENTAL_ENV, "enabled");
        assert!(Features::from_env().lambda_invoker);
        std::env::remove_var(EXPERIMENTAL_ENV);
        assert!(!Features::from_env().lambda_invoker);
    }
}
