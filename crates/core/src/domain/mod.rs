pub mod climate;
pub mod crop;
pub mod field;
pub mod session;
