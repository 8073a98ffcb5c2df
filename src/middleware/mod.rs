/*
 * Responsibility
 * - middleware public interface
 */
pub mod approov;
pub mod cors;
pub mod http;
