mod error;
mod intervu_config;
mod reader;

pub use error::*;
pub use intervu_config::*;
pub use reader::*;
