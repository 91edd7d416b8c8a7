pub mod dates;
pub mod manager;
pub mod services;
pub mod utils;
