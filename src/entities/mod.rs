// Entity Models
// Each entity has a stable identity that never changes, plus values that do.

pub mod user;

pub use user::{AccountStore, User};
