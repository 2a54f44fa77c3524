// Domain layer - Core models
pub mod dashboard;
pub mod unit;
