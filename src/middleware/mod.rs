pub mod cors;
pub mod panic;
pub mod timeout;
