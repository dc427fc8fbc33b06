//! Interactive commands.

use findash::{
    Dashboard, Granularity, RenderPort,
    catalog::{TABLE_SECTIONS, definition},
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub(crate) const HELP: &str = "\
Commands:
  yearly                 show annual reports
  quarterly              show quarterly reports
  toggle <key>           add or remove a metric from the chart
  select <key>           add a metric to the chart
  deselect <key>         remove a metric from the chart
  range <min> <max>      show reports min..=max (indices, oldest is 0)
  metrics                list metric keys
  show                   redraw the dashboard
  help                   show this help
  quit                   exit";

/// One line of interactive input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Yearly,
    Quarterly,
    Toggle(String),
    Select(String),
    Deselect(String),
    Range(i64, i64),
    Metrics,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for a list of commands.")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("Invalid index `{0}`")]
    InvalidIndex(String),
    #[error("Unknown metric `{0}`. Type `metrics` to list them.")]
    UnknownMetric(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Show);
        };

        let metric = |command: &'static str, word: Option<&str>| {
            let key = word.ok_or(CommandError::MissingArgument {
                command,
                argument: "a metric key",
            })?;
            definition(key)
                .map(|d| d.key.to_string())
                .ok_or_else(|| CommandError::UnknownMetric(key.to_string()))
        };
        let index = |word: Option<&str>| {
            let word = word.ok_or(CommandError::MissingArgument {
                command: "range",
                argument: "two indices",
            })?;
            word.parse::<i64>()
                .map_err(|_| CommandError::InvalidIndex(word.to_string()))
        };

        match name.to_ascii_lowercase().as_str() {
            "yearly" | "y" => Ok(Self::Yearly),
            "quarterly" | "q" => Ok(Self::Quarterly),
            "toggle" | "t" => Ok(Self::Toggle(metric("toggle", words.next())?)),
            "select" => Ok(Self::Select(metric("select", words.next())?)),
            "deselect" => Ok(Self::Deselect(metric("deselect", words.next())?)),
            "range" | "r" => {
                let min = index(words.next())?;
                let max = index(words.next())?;
                Ok(Self::Range(min, max))
            }
            "metrics" | "m" => Ok(Self::Metrics),
            "show" | "s" => Ok(Self::Show),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// Apply a command. Returns false when the session should end.
pub(crate) fn execute<R, W>(
    dashboard: &mut Dashboard<R>,
    command: Command,
    out: &mut W,
) -> io::Result<bool>
where
    R: RenderPort,
    W: Write,
{
    debug!(?command, "Executing command");
    match command {
        Command::Yearly => dashboard.set_granularity(Granularity::Yearly),
        Command::Quarterly => dashboard.set_granularity(Granularity::Quarterly),
        Command::Toggle(key) => {
            dashboard.toggle_metric(&key);
        }
        Command::Select(key) => dashboard.set_metric(&key, true),
        Command::Deselect(key) => dashboard.set_metric(&key, false),
        Command::Range(min, max) => {
            if dashboard.set_selection(min, max).is_none() {
                writeln!(out, "No reports to select")?;
            }
        }
        Command::Metrics => write_metrics(dashboard, out)?,
        Command::Show => dashboard.render(),
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn write_metrics<R: RenderPort, W: Write>(dashboard: &Dashboard<R>, out: &mut W) -> io::Result<()> {
    let selected = dashboard.state().map(|s| s.selected_metrics());
    for (kind, metrics) in TABLE_SECTIONS {
        writeln!(out, "{}", kind.title())?;
        for metric in *metrics {
            let mark = if selected.is_some_and(|s| s.contains(metric.key)) {
                '*'
            } else {
                ' '
            };
            writeln!(out, " {mark} {:<40} {}", metric.key, metric.label)?;
        }
    }
    Ok(())
}

/// Read commands line by line until `quit` or end of input.
pub(crate) fn run<R, I, W>(dashboard: &mut Dashboard<R>, input: I, out: &mut W) -> io::Result<()>
where
    R: RenderPort,
    I: BufRead,
    W: Write,
{
    writeln!(out, "Type `help` for a list of commands.")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match line.parse::<Command>() {
            Ok(command) => {
                if !execute(dashboard, command, out)? {
                    return Ok(());
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalRenderer;
    use chrono::NaiveDate;
    use findash::DashboardLoader;

    #[test]
    fn test_parse_commands() {
        assert_eq!("yearly".parse::<Command>(), Ok(Command::Yearly));
        assert_eq!(" Q ".parse::<Command>(), Ok(Command::Quarterly));
        assert_eq!(
            "toggle netIncome".parse::<Command>(),
            Ok(Command::Toggle("netIncome".to_string()))
        );
        assert_eq!(
            "deselect totalRevenue".parse::<Command>(),
            Ok(Command::Deselect("totalRevenue".to_string()))
        );
        assert_eq!("range 4 -1".parse::<Command>(), Ok(Command::Range(4, -1)));
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "frobnicate".parse::<Command>(),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            "toggle".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "toggle",
                argument: "a metric key",
            })
        );
        assert_eq!(
            "select bogus".parse::<Command>(),
            Err(CommandError::UnknownMetric("bogus".to_string()))
        );
        assert_eq!(
            "range 1 x".parse::<Command>(),
            Err(CommandError::InvalidIndex("x".to_string()))
        );
        assert!(matches!(
            "range 1".parse::<Command>(),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    async fn dashboard() -> Dashboard<TerminalRenderer<Vec<u8>>> {
        let loader = DashboardLoader::new()
            .with_history_years(1)
            .with_mock_fallback(Some(5));
        let mut dashboard = Dashboard::new(TerminalRenderer::new(Vec::new()));
        dashboard
            .open(
                "ticker=AAPL",
                &loader,
                NaiveDate::from_ymd_opt(2025, 5, 14).unwrap(),
            )
            .await
            .unwrap();
        dashboard
    }

    #[tokio::test]
    async fn test_session_applies_commands() {
        let mut dashboard = dashboard().await;
        let input = "quarterly\ntoggle netIncome\nbogus\nrange 0 1\nquit\nyearly\n";
        let mut out = Vec::new();
        run(&mut dashboard, input.as_bytes(), &mut out).unwrap();

        let state = dashboard.state().unwrap();
        assert_eq!(state.granularity(), Granularity::Quarterly);
        assert!(state.selected_metrics().contains("netIncome"));
        let selection = state.selection().unwrap();
        assert_eq!((selection.start(), selection.end()), (0, 1));

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Unknown command `bogus`"));
    }

    #[tokio::test]
    async fn test_metrics_listing_marks_selection() {
        let mut dashboard = dashboard().await;
        let mut out = Vec::new();
        execute(&mut dashboard, Command::Metrics, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Income Statement"));
        assert!(out.contains(" * totalRevenue"));
        assert!(out.contains("   netIncome"));
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let mut dashboard = dashboard().await;
        let mut out = Vec::new();
        assert!(!execute(&mut dashboard, Command::Quit, &mut out).unwrap());
        assert!(execute(&mut dashboard, Command::Help, &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().contains("range <min> <max>"));
    }
}
