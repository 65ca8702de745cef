pub mod initialize;
pub mod set_greeting;
pub mod transfer_ownership;
pub mod query;

pub use initialize::*;
pub use set_greeting::*;
pub use transfer_ownership::*;
pub use query::*;
