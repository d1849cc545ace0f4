//! JSON wire format of the production-plan service.

pub mod payload;
pub mod response;
pub mod validation;
