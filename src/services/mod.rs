pub mod categories;
pub mod errors;
pub mod exports;
pub mod favorites;
pub mod products;
pub mod tags;

pub use errors::{ServiceError, ServiceResult};
