pub mod accounts;
pub mod download;
pub mod session;
pub mod shell;
