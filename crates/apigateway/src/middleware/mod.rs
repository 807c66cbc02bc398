pub mod route_guard;
pub mod validate;
