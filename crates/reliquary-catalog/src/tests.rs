//! Integration tests for the catalog parser

#[cfg(test)]
mod tests {
    use crate::{load_catalog, load_catalog_blocking, parse_catalog, parse_records, ParseError, ParserConfig};
    use reliquary_domain::Tier;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ARTIFACTS: &str = "\
№,Имя,Тир,Сила,Ловкость,Удача
1,Кольцо,1,10,0,1
2,,2,20,abc,2
3,,3,30,5,
4,Амулет,1,0,3,0
5,,2,1,6,0
";

    fn tier(n: u32) -> Tier {
        Tier::new(n).unwrap()
    }

    #[test]
    fn test_forward_fill_and_coercion() {
        let records = parse_records(ARTIFACTS, &ParserConfig::default()).unwrap();
        assert_eq!(records.len(), 5);

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Кольцо", "Кольцо", "Кольцо", "Амулет", "Амулет"]);

        // "abc" and the empty trailing cell coerce to 0
        assert_eq!(records[1].attribute("Ловкость"), Some(0.0));
        assert_eq!(records[2].attribute("Удача"), Some(0.0));
    }

    #[test]
    fn test_identity_and_index_columns_are_not_attributes() {
        let catalog = parse_catalog(ARTIFACTS, &ParserConfig::default()).unwrap();
        let ring = catalog.get("Кольцо", tier(1)).unwrap();

        let keys: Vec<&str> = ring.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Сила", "Ловкость", "Удача"]);
    }

    #[test]
    fn test_tier_defaults_to_one() {
        let text = "name,tier,power\nRing,x,10\nCloak,,2\n";
        let catalog = parse_catalog(text, &ParserConfig::english()).unwrap();
        assert!(catalog.contains("Ring", tier(1)));
        assert!(catalog.contains("Cloak", tier(1)));
    }

    #[test]
    fn test_missing_tier_column_defaults_to_one() {
        let text = "name,power\nRing,10\n";
        let catalog = parse_catalog(text, &ParserConfig::english()).unwrap();
        assert_eq!(catalog.get("Ring", tier(1)).and_then(|r| r.attribute("power")), Some(10.0));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let text = "name,tier,power\nRing,1,10\nRing,1,15\n";
        let catalog = parse_catalog(text, &ParserConfig::english()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Ring", tier(1)).and_then(|r| r.attribute("power")), Some(15.0));
    }

    #[test]
    fn test_short_rows_pad_with_zero() {
        let text = "name,tier,power,luck\nRing,1,10\n";
        let catalog = parse_catalog(text, &ParserConfig::english()).unwrap();
        let ring = catalog.get("Ring", tier(1)).unwrap();
        assert_eq!(ring.attribute("luck"), Some(0.0));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let config = ParserConfig {
            delimiter: ';',
            ..ParserConfig::english()
        };
        let text = "name;tier;power\n\"Ring; gold\";2;7\n";
        let catalog = parse_catalog(text, &config).unwrap();
        assert!(catalog.contains("Ring; gold", tier(2)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ParserConfig {
            name_column: String::new(),
            ..Default::default()
        };
        assert!(matches!(parse_catalog(ARTIFACTS, &config), Err(ParseError::Config(_))));
    }

    #[test]
    fn test_load_blocking_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{feff}name,tier,power\nRing,1,10\n").unwrap();

        let catalog = load_catalog_blocking(file.path(), &ParserConfig::english()).unwrap();
        assert!(catalog.contains("Ring", tier(1)));
    }

    #[tokio::test]
    async fn test_load_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", ARTIFACTS).unwrap();

        let catalog = load_catalog(file.path(), &ParserConfig::default()).await.unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.max_tier(), 4);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_catalog("/definitely/not/here.csv", &ParserConfig::default()).await;
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
