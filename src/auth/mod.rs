pub mod guard;
pub mod middleware;
pub mod session;
