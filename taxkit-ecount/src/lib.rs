//! taxkit-ecount: client for the Ecount (이카운트) accounting Open API.
//!
//! Covers session login, sales/purchase/payroll slip queries, purchase slip
//! creation, and the two workflows built on them: VAT slip totals and card
//! expense registration.

pub mod client;
pub mod config;
pub mod error;
pub mod expense;
pub mod totals;
pub mod transport;

pub use client::{EcountClient, PurchaseItem, PurchaseSlipRequest, Session, SlipResponse, YearMonth};
pub use config::{EcountConfig, PartialEcountConfig};
pub use error::EcountError;
pub use expense::{ExpenseArgs, ExpenseResult, register_expense};
pub use totals::{SlipTotals, fetch_slip_totals};
pub use transport::{HttpReply, ReqwestTransport, Transport};
