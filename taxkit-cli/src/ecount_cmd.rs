use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::json;
use taxkit_ecount::{EcountClient, ExpenseArgs, YearMonth, register_expense};
use tracing::info;

use crate::config::Config;
use crate::output::print_json;

#[derive(Subcommand, Debug)]
pub enum EcountCommand {
    /// Check the credentials with a login round-trip
    Test,

    /// Log in and print the session
    Login,

    /// Sales slips dated within a range
    Sales(DateRange),

    /// Purchase slips dated within a range
    Purchases(DateRange),

    /// Payroll slips for one month
    Payroll {
        /// YYYY-MM
        #[arg(long)]
        month: YearMonth,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct DateRange {
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: NaiveDate,

    /// YYYY-MM-DD
    #[arg(long)]
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn checked(self) -> Result<(NaiveDate, NaiveDate)> {
        if self.start_date > self.end_date {
            bail!(
                "--start-date {} is after --end-date {}",
                self.start_date,
                self.end_date
            );
        }
        Ok((self.start_date, self.end_date))
    }
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Payment date, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    /// Paid amount (VAT included unless --vat-excluded)
    #[arg(long)]
    pub amount: i64,

    /// Merchant name
    #[arg(long)]
    pub vendor: String,

    /// What the expense was for
    #[arg(long)]
    pub description: String,

    /// Card user (대표, 직원명)
    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub card_company: Option<String>,

    #[arg(long)]
    pub card_number: Option<String>,

    #[arg(long)]
    pub approval_number: Option<String>,

    /// Account title (접대비, 복리후생비, 소모품비, ...)
    #[arg(long)]
    pub account_code: Option<String>,

    /// The amount does not include VAT
    #[arg(long)]
    pub vat_excluded: bool,
}

impl From<RegisterArgs> for ExpenseArgs {
    fn from(a: RegisterArgs) -> Self {
        ExpenseArgs {
            date: a.date,
            amount: a.amount,
            vendor: a.vendor,
            description: a.description,
            user: a.user,
            card_company: a.card_company,
            card_number: a.card_number,
            approval_number: a.approval_number,
            account_code: a.account_code,
            vat_included: !a.vat_excluded,
        }
    }
}

/// First eight characters of a session id, for display.
pub fn mask_session_id(session_id: &str) -> String {
    let head: String = session_id.chars().take(8).collect();
    format!("{head}...")
}

pub async fn run(command: EcountCommand, config: &Config) -> Result<()> {
    let client = EcountClient::new(config.ecount()?);

    match command {
        EcountCommand::Test => {
            let session = client.login().await?;
            print_json(&json!({
                "success": true,
                "message": "로그인 성공",
                "sessionId": mask_session_id(&session.session_id),
                "zone": session.zone,
            }))?;
        }

        EcountCommand::Login => {
            let session = client.login().await?;
            print_json(&json!({
                "success": true,
                "sessionId": session.session_id,
                "zone": session.zone,
            }))?;
        }

        EcountCommand::Sales(range) => {
            let (from, to) = range.checked()?;
            let session = client.login().await?;
            print_json(&client.get_sales_slips(&session, from, to).await?)?;
        }

        EcountCommand::Purchases(range) => {
            let (from, to) = range.checked()?;
            let session = client.login().await?;
            print_json(&client.get_purchase_slips(&session, from, to).await?)?;
        }

        EcountCommand::Payroll { month } => {
            let session = client.login().await?;
            print_json(&client.get_payroll(&session, month).await?)?;
        }
    }

    Ok(())
}

pub async fn register(args: RegisterArgs, config: &Config) -> Result<()> {
    if args.amount <= 0 {
        bail!("--amount must be a positive number of won");
    }
    if args.vendor.trim().is_empty() || args.description.trim().is_empty() {
        bail!("--vendor and --description must not be blank");
    }

    let client = EcountClient::new(config.ecount()?);
    let expense = ExpenseArgs::from(args);
    info!(date = %expense.date, amount = expense.amount, "registering expense");

    let result = register_expense(&client, &expense).await?;
    print_json(&result)
}
