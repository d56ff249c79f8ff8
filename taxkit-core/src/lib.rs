//! taxkit-core: won formatting, clock helpers and the Korean tax calculators.

pub mod calendar;
pub mod corporate_tax;
pub mod guide;
pub mod insurance;
pub mod money;
pub mod time;
pub mod vat;
pub mod withholding;

pub use calendar::{CalendarFilter, TaxDeadline, TaxEventType, calendar_2026, deadlines_to_ics, upcoming};
pub use corporate_tax::{CorporateTaxResult, SmeRelief, calculate_corporate_tax};
pub use guide::{FilingGuide, GuideStep, GuideType, filing_guide};
pub use insurance::{InsuranceResult, calculate_insurance};
pub use money::{VatSplit, format_krw, split_vat};
pub use vat::{VatInput, VatResult, calculate_vat};
pub use withholding::{WithholdingResult, calculate_withholding};
