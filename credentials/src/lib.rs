//! Credential utilities library
//!
//! Provides reusable credential infrastructure for services:
//! - Password hashing (Argon2id)
//! - Opaque access token generation
//!
//! Each service defines its own authentication traits and adapts these
//! implementations. This avoids coupling services through shared domain logic
//! while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use credentials::TokenGenerator;
//!
//! let generator = TokenGenerator::new();
//! let token = generator.generate();
//! assert_eq!(token.len(), 48);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenGenerator;
