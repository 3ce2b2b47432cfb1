//! Tests for core types

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_media_kind_serialization() {
        assert_eq!(serde_json::to_string(&MediaKind::Show).unwrap(), "\"SHOW\"");
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"MOVIE\"");
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!("show".parse::<MediaKind>().unwrap(), MediaKind::Show);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Show);
        assert_eq!("Film".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert!("podcast".parse::<MediaKind>().is_err());
        assert_eq!(MediaKind::default(), MediaKind::Show);
        assert_eq!(MediaKind::Movie.to_string(), "MOVIE");
    }

    #[test]
    fn test_match_confidence_serialization() {
        assert_eq!(serde_json::to_string(&MatchConfidence::Exact).unwrap(), "\"EXACT\"");
        assert_eq!(serde_json::to_string(&MatchConfidence::Fuzzy).unwrap(), "\"FUZZY\"");
        assert_eq!(serde_json::to_string(&MatchConfidence::None).unwrap(), "\"NONE\"");
    }

    #[test]
    fn test_outcome_match_none() {
        let m = OutcomeMatch::none("Nobody");
        assert_eq!(m.outcome_name, "Nobody");
        assert!(m.matched_title_id.is_none());
        assert_eq!(m.match_confidence, MatchConfidence::None);
        assert!(m.edit_distance.is_none());
        assert!(!m.is_match());
    }

    #[test]
    fn test_title_record_aliases_default() {
        let record: TitleRecord =
            serde_json::from_str(r#"{"id": "t1", "canonical_name": "Run Away"}"#).unwrap();
        assert_eq!(record.canonical_name, "Run Away");
        assert!(record.aliases.is_empty());
    }

    #[test]
    fn test_title_record_from_canonical_title() {
        let title = CanonicalTitle {
            id: "t1".to_string(),
            canonical_name: "Squid Game".to_string(),
            media_kind: MediaKind::Show,
            aliases: BTreeSet::from([
                "Squid Game: Season 2".to_string(),
                "Squid Game (Limited Series)".to_string(),
            ]),
            title_key: "abc".to_string(),
        };
        let record = TitleRecord::from(&title);
        assert_eq!(record.id, "t1");
        assert_eq!(record.canonical_name, "Squid Game");
        assert_eq!(
            record.aliases,
            vec![
                "Squid Game (Limited Series)".to_string(),
                "Squid Game: Season 2".to_string()
            ]
        );
    }
}
