//! Route guard: session resolution, route classification and role gating

mod middleware;
mod model;
mod policy;
mod session;

pub use middleware::{route_guard_middleware, RouteGuard};
pub use model::{AccessContext, Role};
pub use policy::{evaluate, GuardDecision, GuardOutcome, RoleLookup, RouteClass, Surface};
pub use session::{clear_session_cookie, extract_token, session_cookie};
