pub mod config_io;
pub mod vault_io;
