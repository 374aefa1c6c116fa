//! Computes distinctive names: the shortest prefix of a parameter name
//! that no other declared parameter name starts with.
//!
//! Users may abbreviate any option down to its distinctive name,
//! e.g. with `command` and `count` declared, `--com=build` selects `command`.

use crate::parameter::Parameter;

/// Returns the shortest prefix of `name` which is not a prefix of any name
/// in `others`. Falls back to the full name if there is no such prefix,
/// which is always the case for single-character names and for names
/// which are themselves a prefix of another name.
///
/// `others` must not contain `name` itself.
pub fn distinctive_name<'a, 'b, I>(name: &'a str, others: I) -> &'a str
where
    I: IntoIterator<Item = &'b str>,
    I::IntoIter: Clone,
{
    let others = others.into_iter();

    // Prefixes of 1..len-1 characters, cut on char boundaries
    name.char_indices()
        .skip(1)
        .map(|(end, _)| &name[..end])
        .find(|prefix| others.clone().all(|other| !other.starts_with(prefix)))
        .unwrap_or(name)
}

/// Computes the distinctive name of every parameter, in order.
///
/// Distinctiveness is relative to the whole set, so this has to be
/// recomputed whenever the set of parameters changes.
pub fn distinctive_names(parameters: &[Parameter]) -> Vec<String> {
    parameters
        .iter()
        .enumerate()
        .map(|(i, parameter)| {
            let others = parameters
                .iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .map(|(_, other)| other.name());
            distinctive_name(parameter.name(), others).to_owned()
        })
        .collect()
}

/// Refreshes the distinctive name stored in every parameter.
pub fn resolve(parameters: &mut [Parameter]) {
    let names = distinctive_names(parameters);
    for (parameter, name) in parameters.iter_mut().zip(names) {
        tracing::trace!(
            name = parameter.name(),
            distinctive = %name,
            "resolved distinctive name"
        );
        parameter.set_distinctive_name(name);
    }
}
