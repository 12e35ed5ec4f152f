pub mod analyze;
pub(crate) mod health;

pub use analyze::analyze;
pub use health::health_check;
