pub mod engine;
pub mod filter;
pub mod operators;
pub mod session;
pub mod table;

pub use crate::domain::model::{Filter, InputValue, Operator, OperatorId, Product, Property};
pub use crate::domain::ports::DataSource;
pub use crate::utils::error::Result;
