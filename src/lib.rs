//! Repayment planner library
//!
//! Simulates how a fixed monthly disposable income pays down a set of debts
//! and fixed-term course fees, and exposes the simulator over HTTP.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::repayments;

/// Register every route and the shared JSON extractor config
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(middleware::json_error_handler))
        .configure(modules::health::controllers::configure)
        .configure(modules::repayments::controllers::configure);
}
