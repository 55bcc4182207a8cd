use clap::{Args, Parser, Subcommand};
use time::{macros::format_description, Date};

#[derive(Debug, Parser)]
#[command(name = "timeclock")]
#[command(about = "Time in, time out, and file the worked time as a timesheet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start tracking a work session
    In,
    /// Stop the running session and submit it as a timesheet
    Out(OutArgs),
    /// Show the current session
    Status,
    /// Follow the running session live until Ctrl-C
    Watch,
    /// List task categories
    Categories,
    /// List shifts
    Shifts,
    /// List users that `out --user` accepts (admins only)
    Users,
    /// List submitted timesheets
    Timesheets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Clone, Args)]
pub struct OutArgs {
    /// What was worked on
    #[arg(long)]
    pub details: String,
    /// Task category id (see `timeclock categories`)
    #[arg(long)]
    pub category: i64,
    /// Shift id (see `timeclock shifts`)
    #[arg(long)]
    pub shift: i64,
    /// File for another user's profile (admins only)
    #[arg(long)]
    pub user: Option<i64>,
    /// Work date as YYYY-MM-DD, defaults to the day the session stopped
    #[arg(long, value_parser = parse_work_date)]
    pub date: Option<Date>,
}

fn parse_work_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use time::macros::date;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_out_with_all_fields() {
        let cli = Cli::try_parse_from([
            "timeclock",
            "out",
            "--details",
            "wrote spec",
            "--category",
            "2",
            "--shift",
            "1",
            "--user",
            "7",
            "--date",
            "2024-03-01",
        ])
        .unwrap();

        let Commands::Out(args) = cli.command else {
            panic!("expected out command");
        };
        assert_eq!(args.details, "wrote spec");
        assert_eq!(args.category, 2);
        assert_eq!(args.shift, 1);
        assert_eq!(args.user, Some(7));
        assert_eq!(args.date, Some(date!(2024 - 03 - 01)));
    }

    #[test]
    fn out_requires_category_and_shift() {
        assert!(Cli::try_parse_from(["timeclock", "out", "--details", "x"]).is_err());
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from([
            "timeclock",
            "out",
            "--details",
            "x",
            "--category",
            "1",
            "--shift",
            "1",
            "--date",
            "01/03/2024",
        ])
        .is_err());
    }

    #[test]
    fn parses_users_command() {
        let cli = Cli::try_parse_from(["timeclock", "users"]).unwrap();
        assert!(matches!(cli.command, Commands::Users));
    }
}
