//! taxkit-ingest: parsing Korean card approval notifications (SMS / push text)
//! into normalized transaction records.

pub mod parsers;
pub mod types;
pub mod view;

pub use parsers::notification::{parse, parse_now};
pub use types::{CardCompany, DateTimeParts, NotificationRecord, TransactionType};
pub use view::{NotificationView, ParseFailure, PARSE_FAILURE_MESSAGE};
