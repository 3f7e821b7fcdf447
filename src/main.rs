use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use worktime::config::Config;
use worktime::console::{ConsoleMarkdownList, ConsolePresenter};
use worktime::datetime;
use worktime::drop_rate_command::{drop_rate_command, DropRateArgs};
use worktime::ledger_command::{DeleteArgs, LedgerCommand};
use worktime::ledger_store::FileLedgerStore;
use worktime::logger::setup_logger;
use worktime::parse_and_compute;
use worktime::probability::BILLIONTHS;
use worktime::record_command::{RecordArgs, RecordCommand};
use worktime::user::{select_user, Session, UserKey};
use worktime::week_command::{WeekArgs, WeekCommand};

const USER_ENV: &str = "WORKTIME_USER";

/// 勤務時間を計算し、週ごとに保存するためのCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- calc 09:00 18:00
/// $ cargo run -- --user alice record --mon 09:00-18:00
/// $ cargo run -- --user alice week
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(long = "data-dir", global = true, help = "Directory to keep ledgers in")]
    data_dir: Option<PathBuf>,

    #[clap(
        short = 'u',
        long = "user",
        global = true,
        help = "User whose ledger is used (defaults to WORKTIME_USER)"
    )]
    user: Option<String>,

    #[clap(short = 'v', long = "verbose", global = true, help = "Show debug logs")]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    #[clap(about = "Calculate worked time between two HH:MM times")]
    Calc(CalcArgs),
    #[clap(about = "Show the totals of a saved week")]
    Week(WeekArgs),
    #[clap(about = "Enter times for a week and save it")]
    Record(RecordArgs),
    #[clap(about = "List saved weeks")]
    List,
    #[clap(about = "Delete a saved week")]
    Delete(DeleteArgs),
    #[clap(about = "Generate a new user identifier")]
    NewUser,
    #[clap(about = "Scale item drop rates within a group to billionths")]
    DropRate(DropRateArgs),
}

/// `calc`サブコマンドの引数。
#[derive(Debug, clap::Args)]
struct CalcArgs {
    #[clap(help = "Start time such as 09:30")]
    start: String,

    #[clap(help = "End time such as 18:30")]
    end: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.verbose)?;

    let mut stdout = io::stdout();
    let mut presenter = ConsoleMarkdownList::new(&mut stdout);

    match args.subcommand {
        SubCommands::Calc(calc) => {
            presenter.show_worked_time(parse_and_compute(&calc.start, &calc.end))?
        }
        SubCommands::Week(week) => {
            let (session, store) = open_ledger(args.data_dir, args.user)?;
            let report = WeekCommand::new(&store).run(&session, week);
            presenter.show_weekly_summary(&report.label, &report.summary)?;
        }
        SubCommands::Record(record) => {
            let (session, store) = open_ledger(args.data_dir, args.user)?;
            let report = RecordCommand::new(&store).run(&session, record)?;
            presenter.show_weekly_summary(&report.label, &report.summary)?;
        }
        SubCommands::List => {
            let (session, store) = open_ledger(args.data_dir, args.user)?;
            let list = LedgerCommand::new(&store).list(&session);
            presenter.show_labels(&list.labels, list.latest.as_deref())?;
        }
        SubCommands::Delete(delete) => {
            let (session, store) = open_ledger(args.data_dir, args.user)?;
            let label = delete.label.clone();
            if !LedgerCommand::new(&store).delete(&session, delete)? {
                warn!("'{}' was not saved", label);
            }
        }
        SubCommands::NewUser => {
            let user = UserKey::generate();
            info!("Generated a new user; pass it with --user or {}", USER_ENV);
            println!("{}", user);
        }
        SubCommands::DropRate(drop_rate) => {
            let report = drop_rate_command(BILLIONTHS, drop_rate)?;
            presenter.show_drop_rates(&report)?;
        }
    }

    Ok(())
}

/// 設定を読み込み、利用者のセッションと台帳を準備する。
fn open_ledger(data_dir: Option<PathBuf>, user: Option<String>) -> Result<(Session, FileLedgerStore)> {
    let config = Config::load(data_dir).context("Failed to load config")?;
    let name = user
        .or_else(|| env::var(USER_ENV).ok())
        .with_context(|| format!("No user given; pass --user or set {}", USER_ENV))?;
    let user = select_user(&config.roster, &name)?;
    info!("Using ledger of {} in {}", user, config.data_dir.display());

    Ok((
        Session::new(user, datetime::today()),
        FileLedgerStore::new(config.data_dir),
    ))
}
