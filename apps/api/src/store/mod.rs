//! Persistence for structured records: the JSON ledger and the resumes table.

pub mod ledger;
pub mod resumes;
