/*
 * Responsibility
 * - /petitioner namespace: public sign-in surface + gated dashboard
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;
pub mod validation;

pub use routes::routes;
