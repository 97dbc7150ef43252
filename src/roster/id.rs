//! Record identifier generation.
//!
//! Ids are random UUID v4 strings, so generation needs no shared counter and
//! no coordination between calls.

use crate::model::RecordId;
use uuid::Uuid;

impl RecordId {
    /// Mints a new id, distinct from every other generated id with overwhelming
    /// probability.
    pub fn generate() -> Self {
        RecordId::from(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<RecordId> = (0..1000).map(|_| RecordId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_ids_are_uuid_strings() {
        let id = RecordId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }
}
