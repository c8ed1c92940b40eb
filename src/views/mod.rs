//! Derived views: values computed from fetched records for display only.

pub mod grouping;
pub mod heart_rate;
pub mod mood;
pub mod reminder;
pub mod selection;
pub mod sleep;
