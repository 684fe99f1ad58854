/*
 * Responsibility
 * - Token verification/issuance and credential checks (no HTTP types here)
 * - Development seeding of the in-memory store
 */
pub mod auth;
pub mod credentials;
pub mod seed;
