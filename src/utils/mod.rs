pub mod shutdown;
pub mod time;
pub mod validation;
