pub mod keepalive;

pub use keepalive::KeepAlivePinger;
