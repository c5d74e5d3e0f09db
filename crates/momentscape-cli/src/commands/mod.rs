pub mod add;
pub mod common;
pub mod delete;
pub mod edit;
pub mod list;
pub mod shell;
pub mod status;
