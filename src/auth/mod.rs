pub mod strategy;
pub mod validation;

pub use strategy::{verifier_for, CredentialVerifier, LocalStrategy, Verification};
pub use validation::{validate_signup, FieldError, SignupForm};
