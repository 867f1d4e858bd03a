pub mod availability;
pub mod bookings;
pub mod errors;
pub mod pricing;
pub mod properties;

pub use errors::{ServiceError, ServiceResult};

#[cfg(test)]
mod test_support;
