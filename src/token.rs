use std::fmt;

/// Marker which introduces a named parameter on the command line.
pub const OPTION_MARKER: &str = "--";

/// A single command line argument split into a key and a value.
///
/// The key is lowercased. Bare arguments (not starting with `--`) have an
/// empty key and the whole argument as the value. A marked argument may have
/// an empty key as well (`--=value`, `--`), so bareness is kept apart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedToken {
    pub key: String,
    pub value: String,
    pub bare: bool,
}

impl ParsedToken {
    /// A `--key=value` argument.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            bare: false,
        }
    }

    /// An argument given without the `--` marker.
    pub fn bare_value(value: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            value: value.into(),
            bare: true,
        }
    }

    /// Whether this argument was given without the `--` marker.
    pub fn is_bare(&self) -> bool {
        self.bare
    }
}

/// Formats the token the way it could have been typed.
impl fmt::Display for ParsedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str(&self.value);
        }
        write!(f, "{OPTION_MARKER}{}", self.key)?;
        if !self.value.trim().is_empty() {
            write!(f, "={}", self.value)?;
        }
        Ok(())
    }
}

/// Splits a single argument.
///
/// Accepted forms:
/// --name=value
/// --name        (the value is empty)
/// value         (the key is empty)
///
/// Never fails. Unknown or malformed keys are reported by the validator.
pub fn parse_token(arg: &str) -> ParsedToken {
    match arg.strip_prefix(OPTION_MARKER) {
        Some(rest) => {
            let (key, value) = rest.split_once('=').unwrap_or((rest, ""));
            ParsedToken::new(key.to_lowercase(), value)
        }
        None => ParsedToken::bare_value(arg),
    }
}

/// Splits every argument, preserving their order.
pub fn parse_tokens<I, S>(args: I) -> Vec<ParsedToken>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| {
            let token = parse_token(arg.as_ref());
            tracing::trace!(
                arg = arg.as_ref(),
                key = %token.key,
                value = %token.value,
                "parsed token"
            );
            token
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_token, parse_tokens, ParsedToken};

    #[test]
    fn named_value_test() {
        let token = parse_token("--name=value");
        assert_eq!(token.key, "name");
        assert_eq!(token.value, "value");
    }

    #[test]
    fn switch_test() {
        let token = parse_token("--flag");
        assert_eq!(token.key, "flag");
        assert_eq!(token.value, "");
    }

    #[test]
    fn bare_value_test() {
        let token = parse_token("positional");
        assert_eq!(token.key, "");
        assert_eq!(token.value, "positional");
        assert!(token.is_bare());

        // A single dash is not a marker
        assert_eq!(parse_token("-x"), ParsedToken::bare_value("-x"));
    }

    #[test]
    fn key_is_lowercased_but_value_is_not_test() {
        assert_eq!(
            parse_token("--Command=Build"),
            ParsedToken::new("command", "Build")
        );
    }

    #[test]
    fn split_on_first_equality_sign_test() {
        assert_eq!(
            parse_token("--filter=a=b"),
            ParsedToken::new("filter", "a=b")
        );
        assert_eq!(parse_token("--name="), ParsedToken::new("name", ""));
        assert_eq!(parse_token("--=value"), ParsedToken::new("", "value"));
        assert_eq!(parse_token("--"), ParsedToken::new("", ""));
        assert!(!parse_token("--=value").is_bare());
        assert!(!parse_token("--").is_bare());
    }

    #[test]
    fn order_is_preserved_test() {
        let tokens = parse_tokens(["--b=2", "x", "--a"]);
        assert_eq!(
            tokens,
            vec![
                ParsedToken::new("b", "2"),
                ParsedToken::bare_value("x"),
                ParsedToken::new("a", ""),
            ]
        );
    }

    #[test]
    fn display_test() {
        assert_eq!(parse_token("--name=value").to_string(), "--name=value");
        assert_eq!(parse_token("--flag").to_string(), "--flag");
        assert_eq!(parse_token("--flag=  ").to_string(), "--flag");
        assert_eq!(parse_token("bare").to_string(), "bare");

        // Marked arguments with an empty key keep their marker
        assert_eq!(parse_token("--=x").to_string(), "--=x");
        assert_eq!(parse_token("--").to_string(), "--");
    }
}
