//! Integration tests for wrpl-core
//!
//! Full decodes of synthetic replays built with the fixture module.

use wrpl_core::fixture::{ReplayBuilder, ScoreRow};
use wrpl_core::{
    ChatScope, DecodeIssue, EntryOutcome, Error, MatchRecord, NationCatalog, NationResolver,
    ReplayDecoder, SectionKind,
};

const CATALOG: &str = "\
==== USSR ====
yak_3
==== Experimental ====
x_plane
";

fn decode(replay: &[u8]) -> MatchRecord {
    let mut resolver = NationResolver::new(NationCatalog::parse(CATALOG));
    ReplayDecoder::default().decode(replay, &mut resolver).unwrap()
}

fn three_player_match() -> ReplayBuilder {
    ReplayBuilder::new()
        .player(
            5001,
            "Alice",
            None,
            ScoreRow {
                air_kills: 4,
                ground_kills: 1,
                assists: 2,
                deaths: 1,
                captures: 1,
                score: 1310,
                squad: 3,
                team: 1,
                ..Default::default()
            },
        )
        .player(
            5002,
            "Bob",
            Some("-BOB-"),
            ScoreRow {
                ai_ground_kills: 7,
                deaths: 3,
                score: 250,
                team: 2,
                ..Default::default()
            },
        )
        .player(5003, "Carol", None, ScoreRow::team(2))
        .chat("Alice", "gl hf", 1)
        .chat("Bob", "push B", 0)
        .chat("Carol", "with you", 2)
        .vehicle(0, "dummy_plane")
        .vehicle(0, "us_p47")
        .vehicle(1, "yak_3")
        .vehicle(2, "germ_bf109")
        .vehicle(0, "us_p51")
        .winner(1)
}

mod decode_tests {
    use super::*;

    #[test]
    fn test_full_match() {
        let record = decode(&three_player_match().build());

        assert_eq!(record.players.len(), 3);
        assert_eq!(record.winning_team, Some(2));
        assert!(record.report.is_clean());

        let alice = &record.players[&5001];
        assert_eq!(alice.table_index, 0);
        assert_eq!(alice.clan_tag, None);
        assert_eq!(alice.stats.air_kills, Some(4));
        assert_eq!(alice.stats.ground_kills, Some(1));
        assert_eq!(alice.stats.assists, Some(2));
        assert_eq!(alice.stats.score, Some(1310));
        assert_eq!(alice.stats.squad, Some(3));
        assert_eq!(alice.vehicles, ["dummy_plane", "us_p47", "us_p51"]);
        assert_eq!(alice.nation.as_deref(), Some("USA"));
        assert!(!alice.win);

        let bob = &record.players[&5002];
        assert_eq!(bob.table_index, 1);
        assert_eq!(bob.clan_tag.as_deref(), Some("-BOB-"));
        assert_eq!(bob.stats.ai_ground_kills, Some(7));
        assert_eq!(bob.stats.score, Some(250));
        assert_eq!(bob.nation.as_deref(), Some("USSR"));
        assert!(bob.win);
        assert_eq!(bob.outcome, EntryOutcome::Complete);

        let carol = &record.players[&5003];
        assert_eq!(carol.nation.as_deref(), Some("Germany"));
        assert!(carol.win);
    }

    #[test]
    fn test_messages_keep_buffer_order_and_scope() {
        let record = decode(&three_player_match().build());

        let messages: Vec<_> = record
            .messages
            .iter()
            .map(|m| (m.speaker.as_str(), m.body.as_str(), m.scope))
            .collect();
        assert_eq!(
            messages,
            [
                ("Alice", "gl hf", ChatScope::All),
                ("Bob", "push B", ChatScope::Team),
                ("Carol", "with you", ChatScope::Squad),
            ]
        );
    }

    #[test]
    fn test_decode_is_idempotent() {
        let replay = three_player_match().build();
        let decoder = ReplayDecoder::default();
        let mut resolver = NationResolver::new(NationCatalog::parse(CATALOG));

        let first = decoder.decode(&replay, &mut resolver).unwrap();
        let second = decoder.decode(&replay, &mut resolver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_player() {
        let replay = ReplayBuilder::new()
            .player(42, "Solo", None, ScoreRow::team(1))
            .vehicle(0, "uk_spitfire_mk1")
            .winner(0)
            .build();
        let record = decode(&replay);

        let solo = &record.players[&42];
        assert_eq!(solo.name, "Solo");
        assert_eq!(solo.nation.as_deref(), Some("Great Britain"));
        assert!(solo.win);
    }

    #[test]
    fn test_missing_score_rows_keep_players() {
        let replay = three_player_match().score_rows(0).build();
        let record = decode(&replay);

        assert_eq!(record.players.len(), 3);
        for player in record.players.values() {
            assert!(player.stats.is_empty());
            assert!(!player.win);
            assert!(matches!(player.outcome, EntryOutcome::Partial { .. }));
        }
        assert_eq!(record.winning_team, None);
        assert!(
            record
                .report
                .issues
                .iter()
                .any(|issue| matches!(issue, DecodeIssue::WinnerUnresolved { .. }))
        );
    }

    #[test]
    fn test_partial_score_rows() {
        let replay = three_player_match().score_rows(2).build();
        let record = decode(&replay);

        assert_eq!(record.players[&5002].stats.score, Some(250));
        assert!(record.players[&5003].stats.is_empty());
        assert_eq!(
            record.players[&5003].outcome,
            EntryOutcome::Partial {
                issues: vec![DecodeIssue::MissingScoreRow { table_index: 2 }]
            }
        );
    }

    #[test]
    fn test_missing_winner_marker() {
        let replay = ReplayBuilder::new()
            .player(1, "Alice", None, ScoreRow::team(1))
            .player(2, "Bob", None, ScoreRow::team(2))
            .build();
        let record = decode(&replay);

        assert_eq!(record.winning_team, None);
        assert!(record.players.values().all(|p| !p.win));
        assert!(matches!(
            record.report.issues.as_slice(),
            [DecodeIssue::WinnerUnresolved { .. }]
        ));
    }

    #[test]
    fn test_missing_results_marker_is_fatal() {
        let replay = three_player_match().without_results_marker().build();
        let mut resolver = NationResolver::new(NationCatalog::new());
        let err = ReplayDecoder::default()
            .decode(&replay, &mut resolver)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::MarkerNotFound {
                section: SectionKind::Header
            }
        ));
    }

    #[test]
    fn test_unknown_speaker_is_counted() {
        let replay = three_player_match().chat("Mallory", "hello", 1).build();
        let record = decode(&replay);

        assert_eq!(record.messages.len(), 3);
        assert_eq!(record.report.unmatched_messages, 1);
    }

    #[test]
    fn test_vehicle_index_base_is_normalized() {
        let replay = three_player_match().vehicle_index_base(0x90).build();
        let record = decode(&replay);

        assert_eq!(record.players[&5002].vehicles, ["yak_3"]);
        assert_eq!(record.players[&5003].vehicles, ["germ_bf109"]);
    }
}

mod rejected_entry_tests {
    use super::*;

    fn scored(score: u16, team: u8) -> ScoreRow {
        ScoreRow {
            score,
            team,
            ..Default::default()
        }
    }

    #[test]
    fn test_rejected_first_entry_keeps_score_rows() {
        let replay = ReplayBuilder::new()
            .player(1, "Broken", None, scored(111, 1))
            .player(2, "Alice", None, scored(222, 2))
            .raw_player_table(b"\xFF\xFE\x001\x00Alice\x002")
            .build();
        let record = decode(&replay);

        assert_eq!(record.players.len(), 1);
        let alice = &record.players[&2];
        assert_eq!(alice.table_index, 1);
        assert_eq!(alice.stats.score, Some(222));
        assert_eq!(alice.stats.team, Some(2));
        assert_eq!(alice.outcome, EntryOutcome::Complete);
        assert_eq!(record.report.rejected_entries().len(), 1);
    }

    #[test]
    fn test_rejected_middle_entry_keeps_score_rows() {
        let replay = ReplayBuilder::new()
            .player(1, "Alice", None, scored(111, 1))
            .player(2, "Broken", None, scored(222, 2))
            .player(3, "Carol", None, scored(333, 2))
            .raw_player_table(b"Alice\x001\x00\xFF\x002\x00Carol\x003")
            .winner(2)
            .build();
        let record = decode(&replay);

        assert_eq!(record.players.len(), 2);
        assert_eq!(record.players[&1].stats.score, Some(111));
        assert_eq!(record.players[&3].stats.score, Some(333));
        assert_eq!(record.players[&3].table_index, 2);
        assert_eq!(record.winning_team, Some(2));
        assert!(record.players[&3].win);
        assert!(!record.players[&1].win);
    }

    #[test]
    fn test_duplicate_id_keeps_score_rows() {
        let replay = ReplayBuilder::new()
            .player(7, "Alice", None, scored(111, 1))
            .player(8, "Bob", None, scored(222, 1))
            .player(7, "Carol", None, scored(333, 2))
            .build();
        let record = decode(&replay);

        assert_eq!(record.players.len(), 2);
        let bob = &record.players[&8];
        assert_eq!(bob.table_index, 1);
        assert_eq!(bob.stats.score, Some(222));
        let carol = &record.players[&7];
        assert_eq!(carol.name, "Carol");
        assert_eq!(carol.stats.score, Some(333));
        assert!(record.report.issues.contains(&DecodeIssue::DuplicatePlayerId {
            id: 7,
            table_index: 0
        }));
    }
}

mod nation_tests {
    use super::*;

    #[test]
    fn test_unresolved_nation_is_reported() {
        let replay = ReplayBuilder::new()
            .player(1, "Alice", None, ScoreRow::team(1))
            .player(2, "Bob", None, ScoreRow::team(2))
            .vehicle(0, "mystery_tank")
            .vehicle(1, "x_plane")
            .winner(0)
            .build();
        let record = decode(&replay);

        assert_eq!(record.players[&1].nation, None);
        assert_eq!(record.players[&2].nation, None);
        assert_eq!(
            record.players[&1].outcome,
            EntryOutcome::Partial {
                issues: vec![DecodeIssue::NationNotFound {
                    table_index: 0,
                    vehicle: "mystery_tank".to_string()
                }]
            }
        );
    }

    #[test]
    fn test_sentinel_only_has_no_nation() {
        let replay = ReplayBuilder::new()
            .player(1, "Spectator", None, ScoreRow::team(1))
            .vehicle(0, "dummy_plane")
            .winner(0)
            .build();
        let record = decode(&replay);

        let spectator = &record.players[&1];
        assert_eq!(spectator.nation, None);
        assert_eq!(spectator.outcome, EntryOutcome::Complete);
    }

    #[test]
    fn test_resolver_cache_spans_decodes() {
        let catalog = NationCatalog::parse(CATALOG);
        let mut resolver = NationResolver::new(&catalog);
        let decoder = ReplayDecoder::default();
        let replay = three_player_match().build();

        decoder.decode(&replay, &mut resolver).unwrap();
        decoder.decode(&replay, &mut resolver).unwrap();

        // Only yak_3 needs the catalog; prefixed names never reach it.
        assert_eq!(resolver.catalog_queries(), 1);
    }
}

mod layout_tests {
    use super::*;
    use wrpl_core::ReplayLayout;

    #[test]
    fn test_layout_override_changes_decode() {
        let layout = ReplayLayout::from_json(r#"{ "chatMarker": "22 01 3D" }"#).unwrap();
        let mut resolver = NationResolver::new(NationCatalog::new());
        let record = ReplayDecoder::new(layout)
            .decode(&three_player_match().build(), &mut resolver)
            .unwrap();

        assert!(record.messages.is_empty());
        assert_eq!(record.players.len(), 3);
    }
}

mod player_table_tests {
    use wrpl_core::fixture::{FixturePlayer, ScoreRow, encode_player_table};
    use wrpl_core::player::decode_player_table;

    fn fixture(id: u64, name: &str, clan_tag: Option<&str>) -> FixturePlayer {
        FixturePlayer {
            id,
            name: name.to_string(),
            clan_tag: clan_tag.map(str::to_string),
            row: ScoreRow::default(),
        }
    }

    #[test]
    fn test_encoded_tables_decode_back() {
        let tables = [
            vec![fixture(12345, "Alice", None)],
            vec![fixture(1, "Alice", Some("=A="))],
            vec![
                fixture(10, "Alice", Some("[X]")),
                fixture(20, "Bob", Some("[X]")),
                fixture(30, "Carol", None),
                fixture(40, "Dave", Some("-D-")),
            ],
            vec![
                fixture(7, "first", None),
                fixture(8, "second", None),
                fixture(9, "third", None),
            ],
        ];

        for players in tables {
            let decode = decode_player_table(&encode_player_table(&players)).unwrap();
            assert!(decode.issues.is_empty());

            let decoded: Vec<_> = decode
                .table
                .iter()
                .map(|p| (p.id, p.name.clone(), p.clan_tag.clone(), p.table_index))
                .collect();
            let expected: Vec<_> = players
                .iter()
                .enumerate()
                .map(|(i, p)| (p.id, p.name.clone(), p.clan_tag.clone(), i))
                .collect();
            assert_eq!(decoded, expected);
        }
    }
}
