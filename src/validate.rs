use crate::parameter::Parameter;
use crate::token::ParsedToken;

/// Keys which request the help text. They are compared exactly,
/// never by distinctive prefix.
pub const HELP_KEYS: [&str; 2] = ["?", "help"];

/// Outcome of checking parsed tokens against the declared parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Some token had the exact key `?` or `help`.
    pub help_requested: bool,
    /// Names of required parameters which were not provided, in declaration order.
    pub missing: Vec<String>,
    /// Keys that matched no parameter, in input order.
    /// Bare arguments are listed by their value.
    pub illegal: Vec<String>,
}

impl Analysis {
    pub fn is_valid(&self) -> bool {
        !self.help_requested && self.missing.is_empty() && self.illegal.is_empty()
    }

    /// Lines describing why the command line was rejected:
    /// a banner followed by the missing and the illegal options.
    /// Empty lists produce no line. Returns nothing for valid input
    /// or when help was requested.
    pub fn diagnostics(&self, application_name: &str) -> Vec<String> {
        if self.help_requested || self.is_valid() {
            return Vec::new();
        }

        let mut lines = vec![format!(
            "{application_name} was started with invalid command line options:"
        )];
        lines.extend(labelize("Missing options: ", &self.missing));
        lines.extend(labelize("Illegal options: ", &self.illegal));
        lines
    }
}

fn labelize(label: &str, items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(format!("{label}{}", items.join(", ")))
}

/// Bare arguments are named by their value, options by their key.
/// An option without a key is shown as it was typed.
fn illegal_label(token: &ParsedToken) -> String {
    if token.is_bare() {
        token.value.clone()
    } else if token.key.is_empty() {
        token.to_string()
    } else {
        token.key.clone()
    }
}

fn is_help_key(key: &str) -> bool {
    HELP_KEYS.contains(&key)
}

/// Classifies `tokens` against `parameters`.
///
/// Relies on the distinctive names of `parameters` being up to date.
pub fn analyze(tokens: &[ParsedToken], parameters: &[Parameter]) -> Analysis {
    let help_requested = tokens.iter().any(|token| is_help_key(&token.key));

    let missing = parameters
        .iter()
        .filter(|p| !p.optional())
        .filter(|p| !tokens.iter().any(|token| p.matches_key(&token.key)))
        .map(|p| p.name().to_owned())
        .collect();

    let illegal = tokens
        .iter()
        .filter(|token| !is_help_key(&token.key))
        .filter(|token| !parameters.iter().any(|p| p.matches_key(&token.key)))
        .map(illegal_label)
        .collect();

    Analysis {
        help_requested,
        missing,
        illegal,
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze, Analysis};
    use crate::parameter::{Handler, Parameter};
    use crate::prefix::resolve;
    use crate::token::parse_tokens;

    fn params(decl: &[(&str, bool)]) -> Vec<Parameter> {
        let mut params: Vec<Parameter> = decl
            .iter()
            .map(|&(name, optional)| {
                let handler = Handler::Value(Box::new(|_| Ok(())));
                Parameter::new(name, "", None, optional, handler)
            })
            .collect();
        resolve(&mut params);
        params
    }

    fn check(decl: &[(&str, bool)], args: &[&str]) -> Analysis {
        analyze(&parse_tokens(args), &params(decl))
    }

    const COMMAND_VERBOSE: &[(&str, bool)] = &[("command", false), ("verbose", true)];

    #[test]
    fn missing_required_test() {
        let analysis = check(COMMAND_VERBOSE, &["--verbose"]);
        assert_eq!(analysis.missing, vec!["command"]);
        assert!(analysis.illegal.is_empty());
        assert!(!analysis.help_requested);
        assert!(!analysis.is_valid());
    }

    #[test]
    fn valid_test() {
        let analysis = check(COMMAND_VERBOSE, &["--command=build", "--verbose"]);
        assert!(analysis.is_valid());
        assert_eq!(analysis, Analysis::default());

        // Abbreviations down to the distinctive name are accepted
        assert!(check(COMMAND_VERBOSE, &["--c=build", "--v"]).is_valid());
        assert!(check(COMMAND_VERBOSE, &["--COMM=build"]).is_valid());
    }

    #[test]
    fn illegal_test() {
        let analysis = check(COMMAND_VERBOSE, &["--command=x", "--quiet", "--x=1", "bare"]);
        assert!(analysis.missing.is_empty());
        assert_eq!(analysis.illegal, vec!["quiet", "x", "bare"]);
        assert!(!analysis.is_valid());
    }

    #[test]
    fn options_without_key_test() {
        // "--=x" and "--" are options, not bare values
        let analysis = check(COMMAND_VERBOSE, &["--command", "--=x", "--", "pos"]);
        assert_eq!(analysis.illegal, vec!["--=x", "--", "pos"]);
        assert!(!analysis.is_valid());
    }

    #[test]
    fn illegal_options_do_not_legalize_each_other_test() {
        // "comm" is not declared, so "commx" can't borrow legality from it
        let analysis = check(&[("verbose", true)], &["--comm", "--commx"]);
        assert_eq!(analysis.illegal, vec!["comm", "commx"]);
    }

    #[test]
    fn help_short_circuit_test() {
        for help in ["--help", "--?", "--HELP"] {
            let analysis = check(COMMAND_VERBOSE, &[help]);
            assert!(analysis.help_requested, "{help}");
            assert!(!analysis.is_valid());
            assert!(analysis.illegal.is_empty());
            assert!(!analysis.missing.iter().any(|m| m == "help" || m == "?"));
        }

        // Only exact keys request help, prefixes don't
        let analysis = check(&[("helpful", true)], &["--help"]);
        assert!(analysis.help_requested);
        let analysis = check(&[("helpful", true)], &["--hel"]);
        assert!(!analysis.help_requested);
        let analysis = check(COMMAND_VERBOSE, &["--command", "--helpme"]);
        assert!(!analysis.help_requested);
        assert_eq!(analysis.illegal, vec!["helpme"]);
    }

    #[test]
    fn diagnostics_test() {
        let analysis = check(COMMAND_VERBOSE, &["--quiet"]);
        assert_eq!(
            analysis.diagnostics("app"),
            vec![
                "app was started with invalid command line options:",
                "Missing options: command",
                "Illegal options: quiet",
            ]
        );

        let analysis = check(&[("a", false), ("b", false)], &[]);
        assert_eq!(
            analysis.diagnostics("app"),
            vec![
                "app was started with invalid command line options:",
                "Missing options: a, b",
            ]
        );

        assert!(check(COMMAND_VERBOSE, &["--help"]).diagnostics("app").is_empty());
        assert!(check(COMMAND_VERBOSE, &["--command"]).diagnostics("app").is_empty());
    }
}
