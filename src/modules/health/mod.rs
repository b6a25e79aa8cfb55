pub mod controllers;
pub mod services;

pub use controllers::health_check;
pub use services::KeepAlivePinger;
