/*
 * Responsibility
 * - middleware の公開インターフェース
 * - gate (アクセス制御) と HTTP 横断関心事 (cors / security headers / tracing など)
 */
pub mod cors;
pub mod gate;
pub mod http;
pub mod security_headers;
