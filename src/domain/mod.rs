//! # Domain Layer
//!
//! The domain layer contains the CRM's business records and the data
//! access contracts every storage backend implements.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities and their repository traits
//! - **value_objects**: Immutable value types (ContactInfo, enum helper)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate the few rules the CRM has (notification lifecycle)

pub mod value_objects;
pub mod entities;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::ContactInfo;
