//! Inventory dashboard core: load an inventory spreadsheet into a typed
//! [`data::Table`] and narrow it down with [`data::Predicates`].

pub mod config;
pub mod data;

pub use config::Config;
