use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::process::ExitCode;
use taxkit_core::calendar::{DEFAULT_UPCOMING_COUNT, NO_REMAINING_MESSAGE};
use taxkit_core::time::local_now;
use taxkit_core::{
    CalendarFilter, GuideType, SmeRelief, TaxEventType, VatInput, calculate_corporate_tax,
    calculate_insurance, calculate_vat, calculate_withholding, calendar_2026, deadlines_to_ics,
    filing_guide, upcoming,
};
use taxkit_ecount::{EcountClient, fetch_slip_totals};
use taxkit_ingest::{NotificationView, ParseFailure};
use tracing::{debug, info};

mod config;
mod ecount_cmd;
mod logging;
mod output;
mod state;

use ecount_cmd::{DateRange, EcountCommand, RegisterArgs};
use output::{eprint_json, error_body, print_json};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TAXKIT_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "taxkit", version = VERSION, about = "Korean small-business tax toolkit")]
struct Cli {
    /// Log at debug level to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Corporate income tax for a year's taxable income
    CorporateTax {
        /// 과세표준 in won
        #[arg(long)]
        income: i64,

        /// Apply the 50% SME reduction
        #[arg(long)]
        sme: bool,

        /// Youth startup: 100% reduction (with --sme)
        #[arg(long)]
        youth: bool,
    },

    /// Monthly income tax withheld from a salary
    Withholding {
        /// Monthly salary in won
        #[arg(long)]
        salary: i64,

        /// Dependents including the employee (1-5)
        #[arg(long, default_value_t = 1)]
        dependents: u32,
    },

    /// Quarterly VAT payable
    Vat(VatArgs),

    /// Employee and employer social insurance premiums
    Insurance {
        /// Monthly salary in won
        #[arg(long)]
        salary: i64,
    },

    /// Parse a card approval SMS / push notification
    ParseCard {
        /// Notification text
        #[arg(long)]
        text: Option<String>,

        /// Notification text given as bare words
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Step-by-step HomeTax filing guide
    HometaxGuide {
        /// vat | withholding | corporate
        #[arg(long = "type")]
        kind: GuideType,
    },

    /// 2026 tax deadlines
    TaxCalendar {
        /// Upcoming deadlines, nearest first
        #[arg(long)]
        next: bool,

        /// How many deadlines --next shows
        #[arg(
            long,
            default_value_t = DEFAULT_UPCOMING_COUNT,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        count: usize,

        /// YYYY-MM
        #[arg(long)]
        month: Option<String>,

        /// vat | withholding | corporate | insurance | reporting
        #[arg(long = "type")]
        kind: Option<TaxEventType>,

        /// Print an iCalendar document instead of JSON
        #[arg(long)]
        ics: bool,
    },

    /// Ecount accounting API
    Ecount {
        #[command(subcommand)]
        command: EcountCommand,
    },

    /// Register a card expense as an Ecount purchase slip
    RegisterExpense(RegisterArgs),

    /// Manage ~/.taxkit/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct VatArgs {
    /// Quarter sales (supply value) in won
    #[arg(long, default_value_t = 0)]
    sales_amount: i64,

    /// Quarter purchases (supply value) in won
    #[arg(long, default_value_t = 0)]
    purchase_amount: i64,

    /// Fetch totals from Ecount starting at this date (YYYY-MM-DD)
    #[arg(long, requires = "end_date")]
    start_date: Option<NaiveDate>,

    /// Fetch totals from Ecount up to this date (YYYY-MM-DD)
    #[arg(long, requires = "start_date")]
    end_date: Option<NaiveDate>,

    /// 영세율: sales taxed at 0%
    #[arg(long)]
    zero_rate: bool,

    /// 면세: no VAT on either side
    #[arg(long)]
    exempt: bool,

    /// Claim the credit-card sales credit
    #[arg(long)]
    card_sales: bool,

    /// Annual sales for the card-sales credit limit
    #[arg(long)]
    annual_sales: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
}

const VAT_USAGE: &str = "usage: taxkit vat --sales-amount <won> --purchase-amount <won> \
                         OR taxkit vat --start-date YYYY-MM-DD --end-date YYYY-MM-DD";
const CALENDAR_USAGE: &str = "usage: taxkit tax-calendar --next [--count N] | --month YYYY-MM | \
                              --type <vat|withholding|corporate|insurance|reporting>";
const PARSE_CARD_USAGE: &str = "usage: taxkit parse-card --text <카드 승인 문자>";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_tracing(cli.verbose);

    match run(cli.command).await {
        Ok(code) => code,
        Err(err) => {
            let _ = eprint_json(&error_body(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::CorporateTax { income, sme, youth } => {
            if income <= 0 {
                bail!("--income must be a positive number of won");
            }
            let relief = SmeRelief::from_flags(sme, youth);
            print_json(&calculate_corporate_tax(income, relief))?;
        }

        Command::Withholding { salary, dependents } => {
            if salary <= 0 {
                bail!("--salary must be a positive number of won");
            }
            print_json(&calculate_withholding(salary, dependents))?;
        }

        Command::Vat(args) => vat(args).await?,

        Command::Insurance { salary } => {
            if salary <= 0 {
                bail!("--salary must be a positive number of won");
            }
            print_json(&calculate_insurance(salary))?;
        }

        Command::ParseCard { text, words } => {
            let text = text.unwrap_or_else(|| words.join(" "));
            if text.trim().is_empty() {
                bail!(PARSE_CARD_USAGE);
            }
            let now = local_now(config::load_config()?.timezone()?);
            match taxkit_ingest::parse(&text, now) {
                Some(record) => print_json(&NotificationView::from(&record))?,
                None => {
                    eprint_json(&ParseFailure::new(&text))?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Command::HometaxGuide { kind } => {
            print_json(&filing_guide(kind))?;
        }

        Command::TaxCalendar {
            next,
            count,
            month,
            kind,
            ics,
        } => {
            let filter = CalendarFilter { kind, month };
            if !next && filter.is_empty() {
                bail!(CALENDAR_USAGE);
            }

            let today = local_now(config::load_config()?.timezone()?).date();
            let mut deadlines = filter.apply(calendar_2026(today));
            debug!(?filter, next, matched = deadlines.len(), "calendar filter");

            if next {
                deadlines = upcoming(deadlines, count);
                if deadlines.is_empty() {
                    print_json(&json!({ "message": NO_REMAINING_MESSAGE }))?;
                    return Ok(ExitCode::SUCCESS);
                }
            }

            if ics {
                print!("{}", deadlines_to_ics(&deadlines));
            } else {
                print_json(&deadlines)?;
            }
        }

        Command::Ecount { command } => {
            let cfg = config::load_config()?;
            ecount_cmd::run(command, &cfg).await?;
        }

        Command::RegisterExpense(args) => {
            let cfg = config::load_config()?;
            ecount_cmd::register(args, &cfg).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let (path, created) = config::init_config()?;
                print_json(&json!({
                    "path": path.display().to_string(),
                    "created": created,
                }))?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

async fn vat(args: VatArgs) -> Result<()> {
    let (mut sales_amount, mut purchase_amount) = (args.sales_amount, args.purchase_amount);

    if let (Some(start_date), Some(end_date)) = (args.start_date, args.end_date) {
        let (from, to) = DateRange {
            start_date,
            end_date,
        }
        .checked()?;
        let cfg = config::load_config()?;
        let client = EcountClient::new(cfg.ecount()?);
        let totals = fetch_slip_totals(&client, from, to).await?;
        info!(%from, %to, "vat totals taken from ecount");
        sales_amount = totals.sales_total;
        purchase_amount = totals.purchase_total;
    }

    if sales_amount == 0 && purchase_amount == 0 {
        bail!(VAT_USAGE);
    }

    let input = VatInput {
        sales_amount,
        purchase_amount,
        zero_rate: args.zero_rate,
        exempt: args.exempt,
        card_sales: args.card_sales,
        annual_sales: args.annual_sales,
    };
    print_json(&calculate_vat(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_card_words() {
        let cli = Cli::try_parse_from(["taxkit", "parse-card", "신한카드", "승인", "45,000원"]).unwrap();
        match cli.command {
            Command::ParseCard { text, words } => {
                assert!(text.is_none());
                assert_eq!(words.join(" "), "신한카드 승인 45,000원");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_tax_calendar_flags() {
        let cli = Cli::try_parse_from(["taxkit", "tax-calendar", "--type", "vat", "--month", "2026-07"]).unwrap();
        match cli.command {
            Command::TaxCalendar { next, count, month, kind, .. } => {
                assert!(!next);
                assert_eq!(count, DEFAULT_UPCOMING_COUNT);
                assert_eq!(month.as_deref(), Some("2026-07"));
                assert_eq!(kind, Some(TaxEventType::Vat));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Cli::try_parse_from(["taxkit", "tax-calendar", "--type", "gift"]).is_err());
    }

    #[test]
    fn test_tax_calendar_count_must_be_positive() {
        assert!(Cli::try_parse_from(["taxkit", "tax-calendar", "--next", "--count", "0"]).is_err());

        let cli = Cli::try_parse_from(["taxkit", "tax-calendar", "--next", "--count", "3"]).unwrap();
        match cli.command {
            Command::TaxCalendar { next, count, .. } => {
                assert!(next);
                assert_eq!(count, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_vat_date_range_needs_both_ends() {
        assert!(Cli::try_parse_from(["taxkit", "vat", "--start-date", "2026-01-01"]).is_err());
        assert!(
            Cli::try_parse_from([
                "taxkit",
                "vat",
                "--start-date",
                "2026-01-01",
                "--end-date",
                "2026-03-31"
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_register_expense_vat_flag() {
        let cli = Cli::try_parse_from([
            "taxkit",
            "register-expense",
            "--date",
            "2026-03-12",
            "--amount",
            "100000",
            "--vendor",
            "한우마을",
            "--description",
            "거래처 미팅 식대",
            "--vat-excluded",
        ])
        .unwrap();
        match cli.command {
            Command::RegisterExpense(args) => {
                let expense = taxkit_ecount::ExpenseArgs::from(args);
                assert!(!expense.vat_included);
                assert!(expense.user.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
