//! Admin authentication
//!
//! JWT bearer tokens gate every `/api/admin/*` mutation. Passwords are
//! argon2-hashed; login issues a token the admin panel presents on each
//! request.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentAdmin, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_superadmin};
pub use password::{hash_password, verify_password};
