//! Route-level access control.
//!
//! Everything in here is synchronous and pure: identity resolution happens in
//! `middleware::gate`, which feeds the result into `GatePolicy::evaluate`.
pub mod assets;
pub mod factory;
pub mod pattern;
pub mod policy;

pub use assets::AssetBypass;
pub use factory::build_gate_policy;
pub use pattern::{PatternError, RouteMatcher, RoutePattern};
pub use policy::{GateAction, GateError, GatePolicy, RouteClass};
