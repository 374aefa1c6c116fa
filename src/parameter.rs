use std::fmt;

use anyhow::Result;

/// Callback invoked with the raw value of a matched parameter.
pub type ValueCallback = Box<dyn FnMut(&str) -> Result<()>>;

/// Callback invoked when a switch is present on the command line.
pub type SwitchCallback = Box<dyn FnMut()>;

/// What happens when a parameter is matched on the command line.
///
/// A parameter carries exactly one handler, so at most one kind of callback
/// can fire for it.
pub enum Handler {
    /// Receives the value given after `=` (empty when there is none).
    Value(ValueCallback),
    /// Takes no value.
    Switch(SwitchCallback),
    /// Writes the parser's help text to the help writer.
    Help,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Value(_) => f.write_str("Value"),
            Handler::Switch(_) => f.write_str("Switch"),
            Handler::Help => f.write_str("Help"),
        }
    }
}

/// A single declared command line parameter.
///
/// Names are case insensitive: they are lowercased on construction.
/// The distinctive name is derived from the whole set of declared
/// parameters and is refreshed by the parser before every parse.
#[derive(Debug)]
pub struct Parameter {
    name: String,
    help: String,
    example: Option<String>,
    optional: bool,
    pub(crate) handler: Handler,
    distinctive_name: String,
}

impl Parameter {
    /// Creates a parameter.
    ///
    /// Panics if the name is empty, starts with a dash or contains
    /// an equality sign, since such a parameter could never be matched.
    pub fn new(
        name: &str,
        help: &str,
        example: Option<&str>,
        optional: bool,
        handler: Handler,
    ) -> Self {
        if name.is_empty() {
            panic!("Parameter name must not be empty");
        }
        if name.starts_with('-') {
            panic!("Parameter name must not start with a dash: {name}");
        }
        if name.contains('=') {
            panic!("Parameter name must not contain an equality sign: {name}");
        }

        let name = name.to_lowercase();
        Self {
            distinctive_name: name.clone(),
            name,
            help: help.to_owned(),
            example: example.map(str::to_owned),
            optional,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn optional(&self) -> bool {
        self.optional
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The shortest prefix of the name which identifies this parameter
    /// among all parameters of the owning parser.
    pub fn distinctive_name(&self) -> &str {
        &self.distinctive_name
    }

    pub(crate) fn set_distinctive_name(&mut self, distinctive_name: String) {
        debug_assert!(self.name.starts_with(&distinctive_name));
        self.distinctive_name = distinctive_name;
    }

    /// Tells whether a parsed key addresses this parameter.
    pub fn matches_key(&self, key: &str) -> bool {
        key.starts_with(&self.distinctive_name)
    }
}
