use std::iter;

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};

use crate::dispatch;
use crate::help::{self, DEFAULT_DISPLAY_WIDTH};
use crate::parameter::{Handler, Parameter};
use crate::prefix;
use crate::token::{self, ParsedToken};
use crate::types::{self, ValueType};
use crate::validate::{self, Analysis};

/// Receives whole strings of help or diagnostic text.
pub type Writer = Box<dyn FnMut(&str)>;

pub const HELP_SWITCH_NAME: &str = "help";
pub const HELP_SWITCH_TEXT: &str = "Get help on parameters";

/// Result of parsing a command line: the tokens in input order
/// and their classification against the declared parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    tokens: Vec<ParsedToken>,
    analysis: Analysis,
}

impl Parsed {
    pub fn tokens(&self) -> &[ParsedToken] {
        &self.tokens
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn is_valid(&self) -> bool {
        self.analysis.is_valid()
    }

    pub fn help_requested(&self) -> bool {
        self.analysis.help_requested
    }
}

/// Parser lets the user declare the parameters of an application
/// together with the callbacks to invoke when they are present.
///
/// Parameters are matched by distinctive prefix, so `--num=3` selects
/// `number` as long as no other parameter starts with `num`.
///
/// ```
/// use cmdline_parm::Parser;
///
/// let mut parser = Parser::new("build-tool", "Builds things")
///     .add_help_switch()
///     .add_string_parameter("command", "The command to be executed", None, |command| {
///         println!("executing {command}");
///     })
///     .add_switch("verbose", "Print every step", None, || println!("verbose"));
///
/// let parsed = parser.run(["--command=build", "--verb"]).unwrap();
/// assert!(parsed.is_valid());
/// ```
pub struct Parser {
    application_name: String,
    application_description: String,
    display_width: usize,
    params: Vec<Parameter>,
    help_writer: Option<Writer>,
    error_writer: Option<Writer>,
}

impl Parser {
    pub fn new(
        application_name: impl Into<String>,
        application_description: impl Into<String>,
    ) -> Self {
        Self {
            application_name: application_name.into(),
            application_description: application_description.into(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            params: Vec::new(),
            help_writer: None,
            error_writer: None,
        }
    }

    /// Sets the total width of the help text.
    pub fn with_display_width(mut self, display_width: usize) -> Self {
        self.display_width = display_width;
        self
    }

    /// Sets the writer receiving the help text, e.g. `|s| println!("{s}")`.
    ///
    /// Without a help writer the parser doesn't report anything and
    /// dispatches callbacks regardless of the validity of the command line.
    pub fn with_help_writer(mut self, writer: impl FnMut(&str) + 'static) -> Self {
        self.help_writer = Some(Box::new(writer));
        self
    }

    /// Sets the writer receiving diagnostics about invalid command lines,
    /// e.g. `|s| eprintln!("{s}")`.
    pub fn with_error_writer(mut self, writer: impl FnMut(&str) + 'static) -> Self {
        self.error_writer = Some(Box::new(writer));
        self
    }

    /// Registers a parameter.
    ///
    /// Panics if a parameter with the same (case insensitive) name
    /// has already been registered.
    pub fn add_parameter(mut self, parameter: Parameter) -> Self {
        if self.params.iter().any(|p| p.name() == parameter.name()) {
            panic!("Parameter {} was defined more than once", parameter.name());
        }
        self.params.push(parameter);
        self
    }

    /// Registers all the parameters, in order.
    pub fn add_range(self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        parameters.into_iter().fold(self, Self::add_parameter)
    }

    /// Defines a required string parameter.
    pub fn add_string_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(String) + 'static,
    ) -> Self {
        self.add_typed::<types::Text>(name, help, example, false, callback)
    }

    /// Defines an optional string parameter.
    pub fn add_optional_string_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(String) + 'static,
    ) -> Self {
        self.add_typed::<types::Text>(name, help, example, true, callback)
    }

    /// Defines a required integer parameter.
    pub fn add_integer_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(i64) + 'static,
    ) -> Self {
        self.add_typed::<types::Integer>(name, help, example, false, callback)
    }

    /// Defines an optional integer parameter.
    pub fn add_optional_integer_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(i64) + 'static,
    ) -> Self {
        self.add_typed::<types::Integer>(name, help, example, true, callback)
    }

    /// Defines a required decimal number parameter (with a decimal dot).
    pub fn add_decimal_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(BigDecimal) + 'static,
    ) -> Self {
        self.add_typed::<types::Decimal>(name, help, example, false, callback)
    }

    /// Defines an optional decimal number parameter (with a decimal dot).
    pub fn add_optional_decimal_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(BigDecimal) + 'static,
    ) -> Self {
        self.add_typed::<types::Decimal>(name, help, example, true, callback)
    }

    /// Defines a required date parameter (`yyyy-MM-dd`).
    pub fn add_date_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(NaiveDate) + 'static,
    ) -> Self {
        self.add_typed::<types::Date>(name, help, example, false, callback)
    }

    /// Defines an optional date parameter (`yyyy-MM-dd`).
    pub fn add_optional_date_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(NaiveDate) + 'static,
    ) -> Self {
        self.add_typed::<types::Date>(name, help, example, true, callback)
    }

    /// Defines a required date-time parameter (`yyyy-MM-dd HH:mm:ss.fffff`,
    /// seconds and fraction being optional).
    pub fn add_date_time_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(NaiveDateTime) + 'static,
    ) -> Self {
        self.add_typed::<types::DateTime>(name, help, example, false, callback)
    }

    /// Defines an optional date-time parameter (`yyyy-MM-dd HH:mm:ss.fffff`,
    /// seconds and fraction being optional).
    pub fn add_optional_date_time_parameter(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut(NaiveDateTime) + 'static,
    ) -> Self {
        self.add_typed::<types::DateTime>(name, help, example, true, callback)
    }

    /// Defines a switch. Switches are always optional.
    pub fn add_switch(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        callback: impl FnMut() + 'static,
    ) -> Self {
        let handler = Handler::Switch(Box::new(callback));
        self.add_parameter(Parameter::new(name, help, example, true, handler))
    }

    /// Defines the `--help` switch, which writes the help text
    /// to the help writer.
    pub fn add_help_switch(self) -> Self {
        let parameter = Parameter::new(
            HELP_SWITCH_NAME,
            HELP_SWITCH_TEXT,
            None,
            true,
            Handler::Help,
        );
        self.add_parameter(parameter)
    }

    fn add_typed<T: ValueType + 'static>(
        self,
        name: &str,
        help: &str,
        example: Option<&str>,
        optional: bool,
        mut callback: impl FnMut(T::Value) + 'static,
    ) -> Self {
        let param_name = name.to_owned();
        let handler = Handler::Value(Box::new(move |raw| {
            let value = types::convert::<T>(&param_name, raw)?;
            callback(value);
            Ok(())
        }));
        self.add_parameter(Parameter::new(name, help, example, optional, handler))
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn application_description(&self) -> &str {
        &self.application_description
    }

    pub fn display_width(&self) -> usize {
        self.display_width
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Validation is reported only when there is a help writer.
    fn validates(&self) -> bool {
        self.help_writer.is_some()
    }

    /// Returns the help text as a printable string.
    pub fn help(&self) -> String {
        help::render_all(
            &self.application_name,
            &self.application_description,
            &self.params,
            self.display_width,
        )
    }

    fn write_help(&mut self) {
        let help = self.help();
        if let Some(writer) = self.help_writer.as_mut() {
            writer(help.as_str());
        }
    }

    /// Parses and validates the command line, without invoking any callback.
    ///
    /// Each argument is expected in one of the following forms:
    /// --name=value
    /// --name        (switches)
    /// value         (bare value, matches no parameter)
    ///
    /// If a help writer is set, the help text is written to it when help
    /// was requested with `--help` or `--?`. Otherwise, if the command line
    /// is invalid, diagnostics followed by the help text go to the error writer.
    pub fn parse_parameters<I, S>(&mut self, args: I) -> Parsed
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = token::parse_tokens(args);
        prefix::resolve(&mut self.params);
        let analysis = validate::analyze(&tokens, &self.params);

        tracing::debug!(
            tokens = tokens.len(),
            valid = analysis.is_valid(),
            help_requested = analysis.help_requested,
            missing = ?analysis.missing,
            illegal = ?analysis.illegal,
            "Analyzed command line"
        );

        if self.validates() {
            self.report(&analysis);
        }

        Parsed { tokens, analysis }
    }

    fn report(&mut self, analysis: &Analysis) {
        if analysis.is_valid() {
            return;
        }
        if analysis.help_requested {
            self.write_help();
            return;
        }

        let diagnostics = analysis.diagnostics(&self.application_name);
        let help = self.help();
        let Some(writer) = self.error_writer.as_mut() else {
            return;
        };
        for line in diagnostics.iter().chain(iter::once(&help)) {
            if !line.trim().is_empty() {
                writer(line.as_str());
            }
        }
    }

    /// Invokes the callback of every parameter present in `parsed`,
    /// once each, in declaration order.
    ///
    /// Stops at the first value which fails to convert to the type
    /// of its parameter and returns the error.
    pub fn dispatch(&mut self, parsed: &Parsed) -> Result<()> {
        for m in dispatch::matches(&self.params, parsed.tokens()) {
            let parameter = &mut self.params[m.index];
            tracing::debug!(parameter = parameter.name(), value = m.value, "Dispatching");

            match &mut parameter.handler {
                Handler::Value(callback) => callback(m.value)?,
                Handler::Switch(callback) => callback(),
                Handler::Help => self.write_help(),
            }
        }
        Ok(())
    }

    /// Parses the command line and, if it is valid, invokes the callbacks.
    ///
    /// Without a help writer, callbacks are invoked whatever the outcome
    /// of the validation.
    pub fn run<I, S>(&mut self, args: I) -> Result<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = self.parse_parameters(args);
        if parsed.is_valid() || !self.validates() {
            self.dispatch(&parsed)?;
        }
        Ok(parsed)
    }

    /// Writes the parsed command line to the help writer.
    pub fn echo_parameters(&mut self, parsed: &Parsed) {
        let args = parsed
            .tokens()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let line = format!("{} running with parameters: {args}", self.application_name);
        if let Some(writer) = self.help_writer.as_mut() {
            writer(line.as_str());
        }
    }
}
