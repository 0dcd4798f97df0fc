//! UUID-backed identifier generator

use uuid::Uuid;

use crate::application::ports::outbound::IdentifierGeneratorPort;
use crate::domain::value_objects::ObjectId;

/// Hands out random v4 UUIDs, unique across any store namespace
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdentifierGenerator;

impl UuidIdentifierGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierGeneratorPort for UuidIdentifierGenerator {
    fn generate(&self) -> ObjectId {
        ObjectId::from_uuid(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_distinct_uuids() {
        let ids = UuidIdentifierGenerator::new();
        let generated: HashSet<ObjectId> = (0..1000).map(|_| ids.generate()).collect();

        assert_eq!(generated.len(), 1000);
        assert!(generated
            .iter()
            .all(|id| Uuid::parse_str(id.as_str()).is_ok()));
    }
}
