//! Integration tests for the match-proposal pipeline.
//!
//! Drives the public API end-to-end: raw profiles and interaction logs in,
//! ranked pending proposals out, including the serde surface collaborators
//! persist.

use chrono::{NaiveDate, Utc};
use meeplematch_core::proposal::generate_proposals;
use meeplematch_core::{
    DayAvailability, GameEntry, InteractionKind, InteractionRecord, MatchSignal, PlayerProfile,
    PlayerRecord, ProposalConfig, ProposalEngine, ProposalStatus, ScoreWeights, TimeInterval,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn player(id: &str, games: &[(&str, &str)], slots: &[(&str, u32, u32)]) -> PlayerRecord {
    let library = games
        .iter()
        .map(|(game_id, name)| GameEntry::new(*game_id, *name))
        .collect();

    let mut availability: Vec<DayAvailability> = Vec::new();
    for (day, start, end) in slots {
        meeplematch_core::availability::add_availability(
            &mut availability,
            date(day),
            TimeInterval::new(*start, *end),
        );
    }

    PlayerRecord::new(
        PlayerProfile::new(id)
            .with_games(library)
            .with_availability(availability),
        Vec::new(),
    )
}

#[test]
fn test_end_to_end_scenario() {
    // The canonical pair: 2 of 4 games shared, 120-minute slots overlapping
    // by 60 minutes, no interaction history.
    let subject = player(
        "alice",
        &[("g1", "Catan"), ("g2", "Wingspan"), ("g3", "Azul")],
        &[("2024-01-01", 600, 720)],
    );
    let candidate = player(
        "bob",
        &[("g2", "Wingspan"), ("g3", "Azul"), ("g4", "Root")],
        &[("2024-01-01", 660, 780)],
    );

    let now = Utc::now();
    let proposals = generate_proposals(&subject, &[candidate], 5, now);

    assert_eq!(proposals.len(), 1);
    let proposal = &proposals[0];

    assert_eq!(proposal.score.preference, 0.5);
    assert_eq!(proposal.score.time_compatibility, 0.5);
    assert_eq!(proposal.score.success_rate, 0.5);
    // 0.5*0.5 + 0.3*0.5 + 0.2*0.5
    assert_eq!(proposal.score.overall, 0.5);

    assert_eq!(proposal.status, ProposalStatus::Pending);
    assert_eq!(proposal.proposed_to, "alice");
    assert_eq!(proposal.participants, vec!["alice", "bob"]);
    assert_eq!(proposal.metadata.common_games, vec!["g2", "g3"]);
    assert_eq!(proposal.game_id, "g2");
    assert_eq!(proposal.game_name, "Wingspan");
    assert_eq!(
        proposal.proposed_at,
        date("2024-01-01").and_hms_opt(11, 0, 0).unwrap().and_utc()
    );
    assert_eq!(proposal.expires_at - proposal.created_at, chrono::Duration::days(7));
    assert_eq!(
        proposal.signals,
        vec![MatchSignal::GoodOverlap, MatchSignal::GoodSchedule]
    );
    assert_eq!(proposal.reason, "Good game overlap, Good availability match");
}

#[test]
fn test_generator_invariants_over_mixed_pool() {
    let subject = player(
        "alice",
        &[("g1", "Catan"), ("g2", "Wingspan"), ("g3", "Azul")],
        &[("2024-01-01", 600, 780), ("2024-01-02", 540, 660)],
    );

    let mut pool = vec![
        // Perfect match on both dimensions.
        player(
            "bob",
            &[("g1", "Catan"), ("g2", "Wingspan"), ("g3", "Azul")],
            &[("2024-01-01", 600, 780), ("2024-01-02", 540, 660)],
        ),
        // Partial match.
        player(
            "carol",
            &[("g2", "Wingspan"), ("g9", "Gloomhaven")],
            &[("2024-01-01", 700, 840)],
        ),
        // No shared games.
        player("dave", &[("g7", "Scythe")], &[("2024-01-01", 600, 780)]),
        // No shared time.
        player("erin", &[("g1", "Catan")], &[("2024-03-01", 600, 780)]),
        // The subject appears in its own pool.
        subject.clone(),
    ];

    // A candidate with an all-declined history and barely-shared everything
    // lands under the overall threshold.
    let mut frank = player(
        "frank",
        &[("g1", "Catan"), ("x1", "A"), ("x2", "B"), ("x3", "C"), ("x4", "D")],
        &[("2024-01-01", 770, 780)],
    );
    frank.interactions = vec![
        InteractionRecord::new("frank", "s1", InteractionKind::Declined, Utc::now()),
        InteractionRecord::new("frank", "s2", InteractionKind::Declined, Utc::now()),
    ];
    pool.push(frank);

    let proposals = generate_proposals(&subject, &pool, 2, Utc::now());

    // Only bob and carol survive the gates; limit already fits both.
    assert_eq!(proposals.len(), 2);
    assert!(proposals
        .windows(2)
        .all(|pair| pair[0].score.overall >= pair[1].score.overall));
    assert_eq!(proposals[0].participants[1], "bob");
    assert_eq!(proposals[1].participants[1], "carol");

    for proposal in &proposals {
        assert_ne!(proposal.participants[1], "alice");
        assert!(proposal.score.overall > 0.3);
        assert!(!proposal.metadata.common_games.is_empty());
        assert!(proposal.metadata.overlapping_slot_count > 0);
        assert_eq!(proposal.status, ProposalStatus::Pending);
    }
}

#[test]
fn test_custom_threshold_config() {
    let subject = player(
        "alice",
        &[("g1", "Catan"), ("g2", "Wingspan"), ("g3", "Azul")],
        &[("2024-01-01", 600, 720)],
    );
    let candidate = player(
        "bob",
        &[("g2", "Wingspan"), ("g3", "Azul"), ("g4", "Root")],
        &[("2024-01-01", 660, 780)],
    );

    // The canonical pair scores exactly 0.5 overall; a threshold at 0.5
    // gates it out (the comparison is strict).
    let strict = ProposalEngine::with_config(ProposalConfig {
        min_overall_score: 0.5,
        weights: ScoreWeights::default(),
    });
    let proposals = strict.generate_proposals(&subject, &[candidate], 5, Utc::now());
    assert!(proposals.is_empty());
}

#[test]
fn test_proposal_serde_round_trip() {
    let subject = player(
        "alice",
        &[("g1", "Catan")],
        &[("2024-01-01", 600, 720)],
    );
    let candidate = player(
        "bob",
        &[("g1", "Catan")],
        &[("2024-01-01", 600, 720)],
    );

    let proposals = generate_proposals(&subject, &[candidate], 5, Utc::now());
    let proposal = &proposals[0];

    let json = serde_json::to_value(proposal).unwrap();
    // The score breakdown is flattened onto the proposal object.
    assert_eq!(json["overall"], 0.9);
    assert_eq!(json["status"], "pending");
    assert_eq!(json["signals"][0], "strong_preference");

    let parsed: meeplematch_core::SessionProposal =
        serde_json::from_value(json).unwrap();
    assert_eq!(&parsed, proposal);
}

#[test]
fn test_player_record_serde_round_trip() {
    let record = player(
        "alice",
        &[("g1", "Catan"), ("g2", "Wingspan")],
        &[("2024-01-01", 600, 720), ("2024-01-02", 540, 660)],
    );

    let json = serde_json::to_string(&record).unwrap();
    let parsed: PlayerRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}
