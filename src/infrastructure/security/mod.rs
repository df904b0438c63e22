//! Security collaborators: credential hashing/verification, password
//! policy, and token issuing. The core never stores or compares raw
//! credential bytes itself.

mod password;
mod tokens;

pub use password::{Argon2PasswordHasher, BasicPasswordPolicy, PasswordHasher, PasswordPolicy};
pub use tokens::{Claims, JwtTokenIssuer, TokenIssuer, TokenPair};
