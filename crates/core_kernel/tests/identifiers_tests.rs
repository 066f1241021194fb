//! Integration tests for identifiers

use core_kernel::{AttachmentId, ClaimId, CoreError, DeclarationId};
use proptest::prelude::*;
use uuid::Uuid;

mod declaration_id_tests {
    use super::*;

    #[test]
    fn test_ids_are_time_ordered() {
        let first = DeclarationId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = DeclarationId::new();
        assert!(first < second);
        assert_eq!(first.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_parses_prefixed_and_bare_forms() {
        let id = DeclarationId::new();
        assert_eq!(id.to_string().parse::<DeclarationId>().unwrap(), id);
        assert_eq!(id.as_uuid().to_string().parse::<DeclarationId>().unwrap(), id);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            "DCL-not-a-uuid".parse::<DeclarationId>(),
            Err(CoreError::InvalidIdentifier { kind: "DeclarationId", .. })
        ));
    }

    #[test]
    fn test_json_is_a_bare_uuid() {
        let id = DeclarationId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        assert_eq!(serde_json::from_str::<DeclarationId>(&json).unwrap(), id);
    }
}

mod other_id_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(AttachmentId::PREFIX, "ATT");
        assert_eq!(ClaimId::PREFIX, "CLM");
    }

    #[test]
    fn test_default_is_fresh() {
        assert_ne!(AttachmentId::default(), AttachmentId::default());
    }
}

proptest! {
    #[test]
    fn prop_display_parse_roundtrip(bytes in any::<[u8; 16]>()) {
        let id = AttachmentId::from(Uuid::from_bytes(bytes));
        prop_assert_eq!(id.to_string().parse::<AttachmentId>().unwrap(), id);
    }
}
