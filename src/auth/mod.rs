//! # Authentication Module
//!
//! Credential issuance and validation, the middleware gating every protected
//! route, password hashing, and the ownership checks single-row handlers run
//! before touching a resource.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod ownership;
pub mod password;

pub use jwt::JwtService;
pub use middleware::AuthMiddleware;
pub use models::AuthUser;
