//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **ContactInfo**: email/phone pair embedded in a customer profile
//! - **string_enum!**: declaration helper for the persisted enumerations

mod contact_info;
pub(crate) mod string_enum;

pub use contact_info::ContactInfo;
