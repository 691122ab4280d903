pub mod logging;

use crate::config::DEFAULT_API_BASE_URL;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        PossibleValuesParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_DIR: &str = "session-dir";
pub const ARG_TIMEOUT: &str = "timeout";

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help("Account password")
        .env("EDULINK_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email, used as the login key")
        .env("EDULINK_EMAIL")
        .required(true)
}

fn signup_command() -> Command {
    Command::new("signup")
        .about("Create a student or tutor account")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Display name")
                .required(true),
        )
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new("role")
                .short('r')
                .long("role")
                .help("Account role")
                .default_value("student")
                .value_parser(PossibleValuesParser::new(["student", "tutor"])),
        )
        .arg(
            Arg::new("login")
                .long("login")
                .help("Sign in right after the account is created")
                .action(ArgAction::SetTrue),
        )
}

fn endpoints_command() -> Command {
    Command::new("endpoints")
        .about("Show the REST endpoints the signed-in role uses")
        .arg(
            Arg::new("year")
                .long("year")
                .help("Calendar year")
                .requires("month")
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .help("Calendar month (1-12)")
                .requires("year")
                .value_parser(clap::value_parser!(u32).range(1..=12)),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Start of the upcoming window, e.g. 2025-03-01T00:00:00"),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("edulink")
        .about("Edulink session and access client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .short('a')
                .long(ARG_API_URL)
                .help("Backend REST base URL")
                .env("EDULINK_API_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_DIR)
                .long(ARG_SESSION_DIR)
                .help("Directory holding persisted sessions (default: $HOME/.edulink)")
                .env("EDULINK_SESSION_DIR")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("EDULINK_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .subcommand(signup_command())
        .subcommand(
            Command::new("login")
                .about("Sign in and persist the session")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Clear the persisted session"))
        .subcommand(Command::new("whoami").about("Show the persisted identity"))
        .subcommand(
            Command::new("open")
                .about("Render what the dashboard shows for a route")
                .arg(
                    Arg::new("path")
                        .help("Route to open, e.g. /tasks")
                        .default_value("/"),
                ),
        )
        .subcommand(endpoints_command());

    logging::with_args(command)
}
