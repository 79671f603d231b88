/*!
 * Caller identity extractors
 *
 * Responsibility:
 * - gate middleware が extensions に入れた Identity を handler に提供する
 *
 * Public API:
 * - CurrentIdentity (無ければ 401)
 */

mod core;

pub use self::core::CurrentIdentity;
