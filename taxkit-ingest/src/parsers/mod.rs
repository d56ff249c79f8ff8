//! Field detectors and extractors. Each one reads the whole notification text
//! independently; `notification` combines them into a record.

pub mod amount;
pub mod datetime;
pub mod detect;
pub mod fields;
pub mod notification;
pub mod vendor;
