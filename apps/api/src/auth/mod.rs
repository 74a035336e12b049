//! Auth Handler: signup, login, logout and the session gate.

pub mod handlers;
pub mod password;
pub mod session;
