pub mod config;
pub mod db;
pub mod error;
pub mod server;

pub use config::Config;
pub use db::ConnectionProvider;
pub use error::FoodpilotError;
pub use server::Application;
