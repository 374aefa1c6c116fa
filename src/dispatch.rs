use crate::parameter::Parameter;
use crate::token::ParsedToken;

/// A parameter together with the value it was given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'a> {
    /// Position of the parameter in declaration order.
    pub index: usize,
    pub value: &'a str,
}

/// Pairs every parameter with the token addressing it.
///
/// Parameters come out in declaration order, each at most once;
/// parameters absent from the command line are skipped.
/// If several tokens address the same parameter, a token spelling out
/// the full name wins, otherwise the first one in input order.
pub fn matches<'a>(parameters: &[Parameter], tokens: &'a [ParsedToken]) -> Vec<Match<'a>> {
    parameters
        .iter()
        .enumerate()
        .filter_map(|(index, parameter)| {
            let mut candidates = tokens
                .iter()
                .filter(|token| parameter.matches_key(&token.key));
            let first = candidates.clone().next()?;
            let token = candidates
                .find(|token| token.key == parameter.name())
                .unwrap_or(first);
            Some(Match {
                index,
                value: token.value.as_str(),
            })
        })
        .collect()
}
