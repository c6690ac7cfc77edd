//! ID generation capability

use std::fmt::Debug;

use uuid::Uuid;

use crate::domain::user::UserId;

/// Globally-unique id source consumed by the user service. Collision
/// handling is the generator's responsibility, not the service's.
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> UserId;
}

/// UUIDv4-backed generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> UserId {
        UserId::new(Uuid::new_v4().to_string())
    }
}
