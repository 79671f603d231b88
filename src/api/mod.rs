/*
 * Responsibility
 * - routes() の re-export と API 層のモジュール構成
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
