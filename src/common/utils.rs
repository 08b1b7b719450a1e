use std::borrow::Cow;

/// Values that can be read from an environment variable
///
/// Lookups trim surrounding whitespace; an unset, empty or unparsable variable
/// falls back to the default.
pub trait ParseFromEnv: Sized + 'static {
    type Result: Sized + From<Self> + 'static;
    fn parse_from_env(key: &str) -> Option<Self::Result>;
    #[inline]
    fn parse_from_env_or(key: &str, default: Self) -> Self::Result {
        Self::parse_from_env(key).unwrap_or(default.into())
    }
}

impl ParseFromEnv for bool {
    type Result = bool;
    #[inline]
    fn parse_from_env(key: &str) -> Option<bool> {
        ::std::env::var(key).ok().and_then(|val| parse_bool(&val))
    }
}

impl ParseFromEnv for &'static str {
    type Result = Cow<'static, str>;
    #[inline]
    fn parse_from_env(key: &str) -> Option<Cow<'static, str>> {
        let value = ::std::env::var(key).ok()?;
        let trimmed = value.trim();

        if trimmed.is_empty() {
            None
        } else if trimmed.len() == value.len() {
            Some(Cow::Owned(value))
        } else {
            Some(Cow::Owned(trimmed.to_owned()))
        }
    }
}

#[inline]
pub fn parse_from_env<T: ParseFromEnv>(key: &str, default: T) -> T::Result {
    T::parse_from_env_or(key, default)
}

#[inline]
fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_unset_falls_back() {
        let key = "TFR_TEST_SURELY_UNSET_VARIABLE";
        assert!(!parse_from_env(key, false));
        assert_eq!(parse_from_env(key, "warn"), "warn");
    }
}
