pub mod password;

pub use password::{
    generate_salt, hash_password, hash_password_async, verify_password, verify_password_async,
};
