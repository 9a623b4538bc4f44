pub mod auth;
pub mod import;
pub mod record;
pub mod table;
