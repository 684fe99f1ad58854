/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the gate's verified identity (AuthCtx) to handlers
 * - axum-specific code stays in core, the type lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use self::types::AuthCtx;
