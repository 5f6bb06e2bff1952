pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{mailchimp::MailchimpClient, mysql::MysqlSource};
pub use config::{settings::SyncSettings, CliConfig};
pub use core::{etl::SyncEngine, pipeline::SyncPipeline};
pub use utils::error::{Result, SyncError};
