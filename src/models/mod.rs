//! Typed registry payloads. JSON field names follow the registry's camelCase
//! naming through serde renames.

pub mod periods;
pub mod register;
pub mod statements;

pub use periods::{FinancialPeriod, FinancialPeriods};
pub use register::Register;
pub use statements::{Attachment, Document, FinancialStatements, StatementMetadata};
