pub mod projection;
pub mod services;
pub mod time;
pub mod utils;
