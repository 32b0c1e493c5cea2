pub mod health;
pub mod process;

pub use health::health_handler;
pub use process::{ProcessRequest, ProcessResponse, process_handler};
