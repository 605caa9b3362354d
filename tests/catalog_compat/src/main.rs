fn main() {
    println!("Run `cargo test -p catalog-compat` to execute catalog compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    use gamehub_catalog::launch::find_by_slug;
    use gamehub_catalog::source::parse_games;
    use gamehub_catalog::{Disposition, compute_filtered_games, compute_page, resolve_launch, slugify};
    use gamehub_protocol::{
        ApiError, CATEGORIES, Game, LaunchMode, SessionInfo, TokenResponse, find_category,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn read_fixture(name: &str) -> Vec<u8> {
        let path = fixtures_dir().join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        serde_json::from_slice(&read_fixture(name))
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
    }

    /// Deserializes a fixture, re-serializes it, and compares the JSON
    /// values (key order does not matter).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  file: {fixture}\n  Rust: {reserialized}"
        );
    }

    fn catalog() -> Vec<Game> {
        parse_games(&read_fixture("games.json")).expect("games.json should parse")
    }

    // --- Record format ---

    #[test]
    fn fixture_games_roundtrip() {
        roundtrip_test::<Vec<Game>>("games.json");
    }

    #[test]
    fn fixture_games_all_valid() {
        let games = catalog();
        assert_eq!(games.len(), 12);
        assert_eq!(games[0].name, "Space Blaster");
        assert_eq!(games[4].launch_mode, LaunchMode::Redirect);
        assert_eq!(games[5].launch_mode, LaunchMode::Emulator);
        assert_eq!(
            games[5].emulator_config.as_ref().map(|c| c.core.as_str()),
            Some("gb")
        );
    }

    #[test]
    fn fixture_categories_are_configured() {
        for game in catalog() {
            let category = game.category().expect("fixture games are categorized");
            assert!(
                find_category(category).is_some(),
                "{} uses unconfigured category {category}",
                game.name
            );
        }
    }

    #[test]
    fn fixture_slugs_are_unique() {
        let games = catalog();
        let slugs: HashSet<String> = games.iter().map(|g| slugify(&g.name)).collect();
        assert_eq!(slugs.len(), games.len());
        assert_eq!(find_by_slug(&games, "escape-the-lab").unwrap().id, 9);
    }

    #[test]
    fn dirty_catalog_keeps_valid_records() {
        let games = parse_games(&read_fixture("games_dirty.json")).unwrap();
        let ids: Vec<u64> = games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 4, 5]);

        // First record with a repeated id wins.
        assert_eq!(games[0].name, "Space Blaster");
        // Unknown launch modes and empty categories are tolerated.
        assert_eq!(games[1].launch_mode, LaunchMode::Unknown("flash".into()));
        assert_eq!(games[1].category(), None);
    }

    #[test]
    fn dirty_catalog_reserializes_unknown_use_verbatim() {
        let games = parse_games(&read_fixture("games_dirty.json")).unwrap();
        let json = serde_json::to_value(&games[1]).unwrap();

        let fixture = load_fixture("games_dirty.json");
        let original = fixture
            .as_array()
            .and_then(|records| records.iter().find(|r| r["id"] == 4))
            .expect("fixture has record 4");
        assert_eq!(json["use"], original["use"]);
        assert_eq!(json["category"], original["category"]);
        assert_eq!(json["name"], original["name"]);
    }

    // --- Browsing behaviour over the fixture ---

    #[test]
    fn category_and_search_over_fixture() {
        let games = catalog();
        let ids = |found: Vec<&Game>| found.iter().map(|g| g.id).collect::<Vec<_>>();

        assert_eq!(ids(compute_filtered_games(&games, "all", "")).len(), 12);
        assert_eq!(ids(compute_filtered_games(&games, "all", "SPACE")), vec![1, 10]);
        assert_eq!(ids(compute_filtered_games(&games, "strategy", "space")), vec![10]);
        assert_eq!(ids(compute_filtered_games(&games, "all", "puz")), vec![3]);
        assert!(compute_filtered_games(&games, "arcade", "").is_empty());
        assert!(compute_filtered_games(&games, "casual", "").is_empty());
    }

    #[test]
    fn every_configured_category_filters_cleanly() {
        let games = catalog();
        let total: usize = CATEGORIES
            .iter()
            .filter(|c| !c.is_all())
            .map(|c| compute_filtered_games(&games, c.id, "").len())
            .sum();
        assert_eq!(total, games.len());
    }

    #[test]
    fn fixture_pages() {
        let games = catalog();
        let five = NonZeroUsize::new(5).unwrap();

        let last = compute_page(&games, five, 3);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.items[0].id, 11);

        let clamped = compute_page(&games, five, 42);
        assert_eq!(clamped.page, 3);
    }

    #[test]
    fn fixture_launches() {
        let games = catalog();

        match resolve_launch(&games, 5, None).unwrap() {
            Disposition::Redirect { url } => assert_eq!(url, "https://play.example.com/neon-runner"),
            other => panic!("expected redirect, got {other:?}"),
        }

        match resolve_launch(&games, 6, None).unwrap() {
            Disposition::Embed {
                game,
                recommendations,
            } => {
                assert_eq!(game.id, 6);
                let ids: Vec<u64> = recommendations.iter().map(|g| g.id).collect();
                assert_eq!(ids, vec![1, 2, 3, 4, 5, 7]);
            }
            other => panic!("expected embed, got {other:?}"),
        }

        assert!(resolve_launch(&games, 404, None).is_err());
    }

    // --- Mock API payloads ---

    #[test]
    fn fixture_token_response() {
        roundtrip_test::<TokenResponse>("token_response.json");
    }

    #[test]
    fn fixture_session_anonymous() {
        roundtrip_test::<SessionInfo>("session_anonymous.json");
        let session: SessionInfo = serde_json::from_value(load_fixture("session_anonymous.json")).unwrap();
        assert_eq!(session, SessionInfo::anonymous());
    }

    #[test]
    fn fixture_api_error() {
        roundtrip_test::<ApiError>("api_error.json");
    }
}
