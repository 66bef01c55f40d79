pub mod cleaning;
pub mod error;
pub mod profile;
pub mod table;
