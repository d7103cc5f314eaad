//! Tests for tournament repository operations.

use tempfile::NamedTempFile;

use swiss_tournament::{Player, TournamentError, TournamentRepository};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, TournamentRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = TournamentRepository::new(db_path).expect("Failed to create repository");
    repo.initialize().expect("Migrations failed");
    (db_file, repo)
}

fn register(repo: &TournamentRepository, name: &str) -> Player {
    repo.register_player(name.to_string())
        .expect("Register failed")
}

#[test]
fn test_new_rejects_empty_path() {
    let result = TournamentRepository::new("  ".to_string());
    assert!(result.is_err(), "Empty path should fail");
}

#[test]
fn test_initialize_twice_is_harmless() {
    let (_db, repo) = setup_test_db();
    repo.initialize().expect("Second initialize failed");
    assert_eq!(repo.count_players().expect("Count failed"), 0);
}

#[test]
fn test_delete_matches() {
    let (_db, repo) = setup_test_db();
    register(&repo, "Alice");
    register(&repo, "Bob");

    let removed = repo.delete_matches().expect("Delete failed");
    assert_eq!(removed, 2);
    assert_eq!(repo.count_players().expect("Count failed"), 2);
}

#[test]
fn test_delete_players() {
    let (_db, repo) = setup_test_db();
    register(&repo, "Alice");

    repo.delete_matches().expect("Delete matches failed");
    let removed = repo.delete_players().expect("Delete players failed");
    assert_eq!(removed, 1);
}

#[test]
fn test_count_after_delete() {
    let (_db, repo) = setup_test_db();
    register(&repo, "Alice");
    register(&repo, "Bob");

    repo.delete_matches().expect("Delete matches failed");
    repo.delete_players().expect("Delete players failed");

    assert_eq!(repo.count_players().expect("Count failed"), 0);
    assert!(repo.player_standings().expect("Standings failed").is_empty());
}

#[test]
fn test_reset_clears_everything() {
    let (_db, repo) = setup_test_db();
    let alice = register(&repo, "Alice");
    let bob = register(&repo, "Bob");
    repo.report_match(*alice.id(), *bob.id())
        .expect("Report failed");

    repo.reset().expect("Reset failed");

    assert_eq!(repo.count_players().expect("Count failed"), 0);
    assert!(repo.player_standings().expect("Standings failed").is_empty());
    assert!(repo.get_score(*alice.id()).expect("Query failed").is_none());
}

#[test]
fn test_register_counts() {
    let (_db, repo) = setup_test_db();
    assert_eq!(repo.count_players().expect("Count failed"), 0);

    for n in 1..=5 {
        register(&repo, &format!("Player {n}"));
        assert_eq!(repo.count_players().expect("Count failed"), n);
    }
}

#[test]
fn test_register_returns_player() {
    let (_db, repo) = setup_test_db();
    let player = register(&repo, "Chandra Nalaar");
    assert_eq!(player.name(), "Chandra Nalaar");
    assert!(*player.id() > 0);

    let found = repo.get_player(*player.id()).expect("Query failed");
    assert_eq!(found, Some(player));
}

#[test]
fn test_register_creates_zeroed_score() {
    let (_db, repo) = setup_test_db();
    let player = register(&repo, "Melpomene Murray");

    let score = repo
        .get_score(*player.id())
        .expect("Query failed")
        .expect("Score row missing");
    assert_eq!(*score.wins(), 0);
    assert_eq!(*score.losses(), 0);
}

#[test]
fn test_register_duplicate_names_allowed() {
    let (_db, repo) = setup_test_db();
    let first = register(&repo, "Bruno Walton");
    let second = register(&repo, "Bruno Walton");

    assert_ne!(first.id(), second.id());
    assert_eq!(repo.count_players().expect("Count failed"), 2);

    // Each duplicate owns its own score row
    let standings = repo.player_standings().expect("Standings failed");
    assert_eq!(standings.len(), 2);
}

#[test]
fn test_get_player_not_found() {
    let (_db, repo) = setup_test_db();
    let found = repo.get_player(42).expect("Query failed");
    assert!(found.is_none());
}

#[test]
fn test_standings_before_matches() {
    let (_db, repo) = setup_test_db();
    register(&repo, "Melpomene Murray");
    register(&repo, "Randy Schwartz");

    let standings = repo.player_standings().expect("Standings failed");
    assert_eq!(standings.len(), 2);

    let names: Vec<&str> = standings.iter().map(|s| s.name().as_str()).collect();
    assert_eq!(names, ["Melpomene Murray", "Randy Schwartz"]);
    for s in &standings {
        assert_eq!(*s.wins(), 0);
        assert_eq!(*s.matches(), 0);
    }
}

#[test]
fn test_standings_ties_ordered_by_id() {
    let (_db, repo) = setup_test_db();
    let ids: Vec<i32> = ["Dave", "Carol", "Bob", "Alice"]
        .iter()
        .map(|name| *register(&repo, name).id())
        .collect();

    let first = repo.player_standings().expect("Standings failed");
    let second = repo.player_standings().expect("Standings failed");
    assert_eq!(first, second);

    let standing_ids: Vec<i32> = first.iter().map(|s| *s.id()).collect();
    assert_eq!(standing_ids, ids);
}

#[test]
fn test_report_matches() {
    let (_db, repo) = setup_test_db();
    let p1 = *register(&repo, "Bruno Walton").id();
    let p2 = *register(&repo, "Boots O'Neal").id();
    let p3 = *register(&repo, "Cathy Burton").id();
    let p4 = *register(&repo, "Diane Grant").id();

    repo.report_match(p1, p2).expect("Report failed");
    repo.report_match(p3, p4).expect("Report failed");

    let standings = repo.player_standings().expect("Standings failed");
    for s in &standings {
        assert_eq!(*s.matches(), 1, "{} should have one match", s.name());
        if *s.id() == p1 || *s.id() == p3 {
            assert_eq!(*s.wins(), 1, "{} should have one win", s.name());
        } else {
            assert_eq!(*s.wins(), 0, "{} should have no wins", s.name());
        }
    }
}

#[test]
fn test_report_changes_only_the_two_players() {
    let (_db, repo) = setup_test_db();
    let winner = *register(&repo, "Winner").id();
    let loser = *register(&repo, "Loser").id();
    let bystander = *register(&repo, "Bystander").id();

    repo.report_match(winner, loser).expect("Report failed");

    let score = |id| {
        repo.get_score(id)
            .expect("Query failed")
            .expect("Score row missing")
    };
    assert_eq!((*score(winner).wins(), *score(winner).losses()), (1, 0));
    assert_eq!((*score(loser).wins(), *score(loser).losses()), (0, 1));
    assert_eq!((*score(bystander).wins(), *score(bystander).losses()), (0, 0));
}

#[test]
fn test_matches_played_equals_reported_involvement() {
    let (_db, repo) = setup_test_db();
    let a = *register(&repo, "A").id();
    let b = *register(&repo, "B").id();
    let c = *register(&repo, "C").id();

    let results = [(a, b), (b, c), (a, c), (c, a), (a, b)];
    for (winner, loser) in results {
        repo.report_match(winner, loser).expect("Report failed");
    }

    for s in repo.player_standings().expect("Standings failed") {
        let involved = results
            .iter()
            .filter(|(w, l)| w == s.id() || l == s.id())
            .count();
        let wins = results.iter().filter(|(w, _)| w == s.id()).count();
        assert_eq!(*s.matches() as usize, involved);
        assert_eq!(*s.wins() as usize, wins);
    }
}

#[test]
fn test_report_self_match_rejected() {
    let (_db, repo) = setup_test_db();
    let alice = *register(&repo, "Alice").id();

    let result = repo.report_match(alice, alice);
    assert!(matches!(result, Err(TournamentError::SelfMatch(id)) if id == alice));

    let score = repo
        .get_score(alice)
        .expect("Query failed")
        .expect("Score row missing");
    assert_eq!((*score.wins(), *score.losses()), (0, 0));
}

#[test]
fn test_report_unknown_loser_rolls_back_winner() {
    let (_db, repo) = setup_test_db();
    let alice = *register(&repo, "Alice").id();

    let result = repo.report_match(alice, 9999);
    assert!(matches!(result, Err(TournamentError::UnknownPlayer(9999))));

    let score = repo
        .get_score(alice)
        .expect("Query failed")
        .expect("Score row missing");
    assert_eq!(*score.wins(), 0, "Winner update must be rolled back");
}

#[test]
fn test_report_unknown_winner_rejected() {
    let (_db, repo) = setup_test_db();
    let bob = *register(&repo, "Bob").id();

    let result = repo.report_match(9999, bob);
    assert!(matches!(result, Err(TournamentError::UnknownPlayer(9999))));

    let score = repo
        .get_score(bob)
        .expect("Query failed")
        .expect("Score row missing");
    assert_eq!(*score.losses(), 0);
}

#[test]
fn test_report_after_delete_matches_is_unknown() {
    let (_db, repo) = setup_test_db();
    let alice = *register(&repo, "Alice").id();
    let bob = *register(&repo, "Bob").id();
    repo.delete_matches().expect("Delete failed");

    let result = repo.report_match(alice, bob);
    assert!(matches!(result, Err(TournamentError::UnknownPlayer(_))));
}

#[test]
fn test_report_after_delete_players_is_unknown() {
    let (_db, repo) = setup_test_db();
    let alice = *register(&repo, "Alice").id();
    let bob = *register(&repo, "Bob").id();
    repo.delete_players().expect("Delete failed");

    let result = repo.report_match(alice, bob);
    assert!(matches!(result, Err(TournamentError::UnknownPlayer(id)) if id == alice));

    // Leftover score rows stay untouched
    let score = repo
        .get_score(bob)
        .expect("Query failed")
        .expect("Score row missing");
    assert_eq!((*score.wins(), *score.losses()), (0, 0));
}
