/*
 * Responsibility
 * - Public middleware entry points, each `apply(router, ...)`
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
