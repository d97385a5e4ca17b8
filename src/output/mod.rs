//! Screening reports and their console / JSON rendering

pub mod formatter;
pub mod report;
