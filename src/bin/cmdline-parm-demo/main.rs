use std::env;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cmdline_parm::help::DEFAULT_DISPLAY_WIDTH;
use cmdline_parm::Parser;

const APPLICATION_NAME: &str = "cmdline-parm-demo";

// Terminals usually export their width in COLUMNS.
fn display_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|&width| width > 0)
        .unwrap_or(DEFAULT_DISPLAY_WIDTH)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut parser = Parser::new(APPLICATION_NAME, "Usage example of the cmdline-parm parser")
        .with_display_width(display_width())
        .with_help_writer(|s| println!("{s}"))
        .with_error_writer(|s| eprintln!("{s}"))
        .add_help_switch()
        .add_switch("mySwitch", "command line switch", None, || {
            println!("Got a switch called mySwitch")
        })
        .add_string_parameter(
            "Command",
            "The command to be executed",
            Some("--command=build"),
            |command| println!("Command parameter: {command}"),
        )
        .add_optional_string_parameter(
            "OptionalString",
            "An optional String argument",
            None,
            |s| println!("OptionalStringArgument: {s}"),
        )
        .add_integer_parameter("Number", "An integer argument", None, |n| {
            println!("Got a Number argument: {n}")
        })
        .add_optional_integer_parameter(
            "OptionalNumber",
            "An optional integer argument",
            None,
            |n| println!("Got an optional Number argument: {n}"),
        )
        .add_decimal_parameter("Decimal", "A Decimal argument", Some("--decimal=3.14"), |d| {
            println!("Got a Decimal argument: {d}")
        })
        .add_optional_decimal_parameter(
            "OptionalDecimal",
            "An optional Decimal argument",
            None,
            |d| println!("Got an optional Decimal argument: {d}"),
        )
        .add_date_parameter("Date", "A date argument", Some("--date=2020-02-29"), |d| {
            println!("Got a Date argument: {}", d.format("%A %-d %B %Y"))
        })
        .add_optional_date_parameter(
            "OptionalDate",
            "An optional date argument",
            None,
            |d| println!("Got an optional Date argument: {d}"),
        )
        .add_date_time_parameter(
            "DateTime",
            "A DateTime argument. Seconds and their fraction may be omitted.",
            Some("\"--datetime=2020-02-29 13:45:00.12345\""),
            |dt| println!("Got a DateTime argument: {}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        )
        .add_optional_date_time_parameter(
            "OptionalDateTime",
            "An optional DateTime argument",
            None,
            |dt| println!("Got an optional DateTime argument: {dt}"),
        );

    let parsed = parser.run(env::args().skip(1))?;
    if !parsed.is_valid() {
        // Help or diagnostics have been written already
        return Ok(());
    }

    parser.echo_parameters(&parsed);
    Ok(())
}
