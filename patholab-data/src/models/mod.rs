//! Canonical record types produced by the normalization layer

pub mod opportunity;
pub mod records;

pub use opportunity::{
    OpportunityReport, OpportunitySummary, OpportunityTest, PathologistPerformance, Period,
};
pub use records::{
    AuxiliaryRecord, BillingRecord, EntityRecord, PathologistRecord, ResidentRecord, TestRecord,
};
