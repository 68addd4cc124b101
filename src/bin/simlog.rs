//! simlog CLI
//!
//! Command-line interface for keeping a simple dated log.

use std::io::Read;
use std::process::Command;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use regex::Regex;
use simlog::format::{format_entry, format_short_date, parse_date, FormatOptions};
use simlog::{Config, DateWindow, Engine, Entry, LogError, Result};
use tracing_subscriber::{fmt, EnvFilter};

const INVALID_CONFIG: &str = "Invalid configuration detected, terminating.";

const INVALID_DATE: &str =
    "Invalid date format. Please see 'simlog -h' for a list of valid date formats.";

/// simlog
#[derive(Parser, Debug)]
#[command(name = "simlog")]
#[command(about = "A simple log of dated, optionally marked entries")]
#[command(version)]
struct Args {
    /// Operate only on entries with given mark
    #[arg(short, long, default_value = "", global = true)]
    mark: String,

    /// Operate on entries with given date. Date can be in any of the following
    /// formats: 'YYYY-MM-DD', 'YYYY MM DD', 'YYYY-Mon-DD', 'YYYY Mon DD'
    #[arg(short, long, global = true)]
    date: Option<String>,

    /// Operate on entries made before given date
    #[arg(short, long, global = true)]
    before: Option<String>,

    /// Operate on entries made after given date
    #[arg(short, long, global = true)]
    after: Option<String>,

    /// Print out entries in reverse order, from oldest to newest
    #[arg(short, long, global = true)]
    reverse: bool,

    /// Print just entries' contents without headers and end markers
    #[arg(short, long, global = true)]
    silent: bool,

    /// Don't print date headers
    #[arg(long, global = true)]
    no_dates: bool,

    /// Don't print marks
    #[arg(long, global = true)]
    no_marks: bool,

    /// Don't print end markers
    #[arg(long, global = true)]
    no_end_markers: bool,

    /// Don't run EDITOR, receive entry's contents from stdin
    #[arg(long, global = true)]
    from_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add an entry to the log
    Add,

    /// View the entry with given date and mark
    View,

    /// View all entries with given mark. '--mark' option is ignored
    ViewMarked {
        /// The mark to look for
        #[arg(value_name = "MARK")]
        name: String,
    },

    /// View all entries
    ViewAll,

    /// Remove an entry with given date and mark
    Remove,

    /// Remove all the entries with given mark. '--mark' option is ignored
    RemoveMarked {
        /// The mark to remove
        #[arg(value_name = "MARK")]
        name: String,
    },

    /// View all entries matching given regular expression
    Grep {
        /// The regular expression
        regex: String,
    },

    /// View all entries with given mark that match given regex. '--mark' option is ignored
    GrepMarked {
        /// The regular expression
        regex: String,

        /// The mark to look for
        #[arg(value_name = "MARK")]
        name: String,
    },
}

fn main() {
    // Log to stderr so entries printed on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,simlog=info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        match user_message(&e) {
            Some(msg) => println!("{}", msg),
            None => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Text shown on stdout for errors caused by the user's input or setup
///
/// `None` means the error is an internal failure and goes to the log instead.
fn user_message(e: &LogError) -> Option<String> {
    match e {
        LogError::NoEntry => Some(e.to_string()),
        LogError::Config(msg) | LogError::Editor(msg) => {
            Some(format!("{}\n{}", msg, INVALID_CONFIG))
        }
        LogError::Regex(err) => Some(format!(
            "Error when parsing regex: {}\n{}",
            err, INVALID_CONFIG
        )),
        _ => None,
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_env()?;
    tracing::debug!("simlog v{}, log at {}", simlog::VERSION, config.log_path().display());

    let date = parse_date_arg(args.date.as_deref())?.unwrap_or_else(|| Local::now().date_naive());
    let window = DateWindow::new(
        parse_date_arg(args.before.as_deref())?,
        parse_date_arg(args.after.as_deref())?,
    );
    let printer = Printer {
        opts: if args.silent {
            FormatOptions::silent()
        } else {
            FormatOptions {
                no_date: args.no_dates,
                no_mark: args.no_marks,
                no_end: args.no_end_markers,
            }
        },
        reverse: args.reverse,
    };

    let engine = Engine::open(config)?;

    match args.command {
        Commands::Add => {
            if args.from_stdin {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                engine.add_text(text, date, &args.mark)?;
            } else {
                run_editor(&engine)?;
                engine.add_from_entry_file(date, &args.mark)?;
            }
        }
        Commands::View => match engine.view(date, &args.mark)? {
            Some(entry) => printer.print(vec![entry]),
            None if args.mark.is_empty() => {
                println!("There are no entries with no mark made on {}.", date)
            }
            None => println!(
                "There are no entries with mark '{}' made on {}.",
                args.mark, date
            ),
        },
        Commands::ViewMarked { name: mark } => {
            let entries = engine.view_marked(&mark, window)?;
            if entries.is_empty() {
                let mut res = if mark.is_empty() {
                    "There are no unmarked entries".to_string()
                } else {
                    format!("There are no entries with mark {}", mark)
                };
                if let Some(w) = describe_window(window) {
                    res.push(' ');
                    res.push_str(&w);
                }
                println!("{} in the log.", res);
            }
            printer.print(entries);
        }
        Commands::ViewAll => {
            let entries = engine.view_all(window)?;
            if entries.is_empty() {
                match describe_window(window) {
                    None => println!("The log is empty"),
                    Some(w) => println!("There are no entries {}.", w),
                }
            }
            printer.print(entries);
        }
        Commands::Remove => {
            engine.remove(date, &args.mark)?;
        }
        Commands::RemoveMarked { name: mark } => {
            engine.remove_marked(&mark, window)?;
        }
        Commands::Grep { regex } => {
            let regex = Regex::new(&regex)?;
            let entries = engine.grep(&regex, window)?;
            if entries.is_empty() {
                match describe_window(window) {
                    None => println!("There are no entries matching this regular expression."),
                    Some(w) => println!("No entry {} matches this regex.", w),
                }
            }
            printer.print(entries);
        }
        Commands::GrepMarked { regex, name: mark } => {
            let regex = Regex::new(&regex)?;
            let entries = engine.grep_marked(&regex, &mark, window)?;
            if entries.is_empty() {
                match describe_window(window) {
                    None => println!(
                        "No entry with mark {} matches this regular expression.",
                        mark
                    ),
                    Some(w) => println!("No entry with mark {} {} matches this regex.", mark, w),
                }
            }
            printer.print(entries);
        }
    }

    Ok(())
}

/// Output settings shared by every listing command
struct Printer {
    opts: FormatOptions,
    reverse: bool,
}

impl Printer {
    fn print(&self, mut entries: Vec<Entry>) {
        if self.reverse {
            entries.reverse();
        }
        for entry in &entries {
            println!("{}", format_entry(entry, self.opts));
        }
    }
}

/// Open the editor on the scratch file and wait for it to exit
fn run_editor(engine: &Engine) -> Result<()> {
    let editor = engine
        .config()
        .editor
        .clone()
        .ok_or_else(|| LogError::Config(
            "The logger requires EDITOR environment variable to be set.".to_string(),
        ))?;

    Command::new(&editor)
        .arg(engine.entry_path())
        .status()
        .map_err(|_| {
            LogError::Editor(format!(
                "EDITOR is set to '{}', which doesn't appear to be a valid command.",
                editor
            ))
        })?;

    Ok(())
}

fn parse_date_arg(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input {
        None => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| LogError::Config(INVALID_DATE.to_string())),
    }
}

/// "made before X", "made after Y" or "made before X and after Y"
fn describe_window(window: DateWindow) -> Option<String> {
    match (window.before, window.after) {
        (None, None) => None,
        (Some(b), None) => Some(format!("made before {}", format_short_date(b))),
        (None, Some(a)) => Some(format!("made after {}", format_short_date(a))),
        (Some(b), Some(a)) => Some(format!(
            "made before {} and after {}",
            format_short_date(b),
            format_short_date(a)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_regex_is_reported_as_configuration_error() {
        let err = LogError::from(Regex::new("(unclosed").unwrap_err());

        let msg = user_message(&err).unwrap();

        assert!(msg.starts_with("Error when parsing regex: "));
        assert!(msg.ends_with("\nInvalid configuration detected, terminating."));
    }

    #[test]
    fn test_config_and_missing_entry_messages() {
        let msg = user_message(&LogError::Config(INVALID_DATE.to_string())).unwrap();
        assert_eq!(msg, format!("{}\n{}", INVALID_DATE, INVALID_CONFIG));

        assert_eq!(user_message(&LogError::NoEntry), Some(LogError::NoEntry.to_string()));
    }

    #[test]
    fn test_io_failure_has_no_user_message() {
        let err = LogError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));

        assert!(user_message(&err).is_none());
    }
}
