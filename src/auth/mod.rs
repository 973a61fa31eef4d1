//! Cookie-based authentication: the signed token cookie, the helpers that
//! read and write it, and the middleware that guards routes behind it.

pub mod cookie;
mod middleware;
mod token;

pub use middleware::auth_guard;
pub(crate) use token::Token;

#[cfg(test)]
pub use middleware::AuthState;
