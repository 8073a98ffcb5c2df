/*!
 * Approov context extractor
 *
 * Responsibility:
 * - Hand the verified (and, where required, bound) Approov claims to handlers
 * - Keep the axum-specific part in core
 *
 * Public API:
 * - ApproovCtx
 */

mod core;

pub use core::ApproovCtx;
