use growordie_game::{
    Action, ActiveEvent, EventKind, LEVELS, MAX_LEVEL, Notification, Profile, ScriptedRolls,
    Session, SessionState, Stats, Terminal, UpgradeKind, choose_upgrade, take_turn,
};

fn calm() -> ScriptedRolls {
    ScriptedRolls::calm()
}

#[test]
fn five_waters_from_the_start_offer_a_level_up() {
    let mut state = SessionState::new();
    let mut last = None;
    for turn in 1..=5 {
        let outcome = take_turn(&state, Action::Water, &mut calm());
        assert_eq!(outcome.level_up_available(), turn == 5, "turn {turn}");
        state = outcome.state;
        last = Some(outcome.notifications);
    }
    // Water: 62, 74, 86, 92, 92 (clamped at 100 before decay from turn 4).
    // Nutrients drop to 15 on turn 5, which costs 10 health.
    assert_eq!(state.stats, Stats::new(90, 92, 20, 15));
    assert_eq!(state.score, 50);
    assert_eq!(state.turns, 5);
    assert_eq!(state.growth_index, 0);
    assert_eq!(
        last.expect("five turns").as_slice(),
        [Notification::LevelUpAvailable]
    );
}

#[test]
fn rest_on_empty_resources_applies_action_before_decay() {
    let state = SessionState {
        stats: Stats::new(10, 0, 0, 0),
        ..SessionState::new()
    };
    let outcome = take_turn(&state, Action::Rest, &mut calm());
    assert_eq!(outcome.state.stats, Stats::new(15, 0, 0, 0));
    assert_eq!(outcome.state.terminal, Terminal::None);
    assert_eq!(outcome.state.score, 5);
}

#[test]
fn repeated_rest_drains_every_resource() {
    let mut state = SessionState::new();
    for _ in 0..10 {
        state = take_turn(&state, Action::Rest, &mut calm()).state;
    }
    assert_eq!(
        (state.stats.water, state.stats.sunlight, state.stats.nutrients),
        (0, 0, 0)
    );
    assert!(state.stats.health > 0);
}

#[test]
fn cooldown_blocks_special_until_it_reaches_zero() {
    let start = SessionState {
        growth_index: 1,
        ..SessionState::new()
    };
    let fired = take_turn(&start, Action::Special, &mut calm()).state;
    assert_eq!(fired.special_cooldown, 2);

    let blocked = take_turn(&fired, Action::Special, &mut calm());
    assert!(!blocked.applied);
    assert_eq!(blocked.state, fired);

    let mut state = fired;
    for expected in [1, 0] {
        state = take_turn(&state, Action::Rest, &mut calm()).state;
        assert_eq!(state.special_cooldown, expected);
    }
    let again = take_turn(&state, Action::Special, &mut calm());
    assert!(again.applied);
    assert_eq!(again.state.score, state.score + 25);
}

#[test]
fn final_level_wins_after_one_surviving_turn() {
    let mature = SessionState {
        growth_index: MAX_LEVEL - 1,
        turns_in_level: LEVELS[MAX_LEVEL - 1].turns_to_next,
        ..SessionState::new()
    };
    let ancient = choose_upgrade(&mature, UpgradeKind::WideLeaves).expect("level-up pending");
    assert_eq!(ancient.growth_index, MAX_LEVEL);
    assert_eq!(ancient.terminal, Terminal::None);

    let outcome = take_turn(&ancient, Action::Water, &mut calm());
    assert_eq!(outcome.state.terminal, Terminal::Won);
    assert_eq!(outcome.ended(), Some(Terminal::Won));
}

#[test]
fn finished_runs_never_change() {
    let lost = SessionState {
        stats: Stats::new(0, 0, 0, 0),
        score: 70,
        terminal: Terminal::Lost,
        ..SessionState::new()
    };
    for action in Action::ALL {
        let outcome = take_turn(&lost, action, &mut ScriptedRolls::always_event(0));
        assert_eq!(outcome.state, lost);
        assert!(outcome.notifications.is_empty());
    }
    assert!(choose_upgrade(&lost, UpgradeKind::StrongRoots).is_none());
}

#[test]
fn upgrade_gating_bumps_exactly_one_counter() {
    let mut state = SessionState::new();
    for _ in 0..4 {
        state = take_turn(&state, Action::Water, &mut calm()).state;
    }
    assert!(choose_upgrade(&state, UpgradeKind::ThickBark).is_none());
    state = take_turn(&state, Action::Sunlight, &mut calm()).state;

    let next = choose_upgrade(&state, UpgradeKind::ThickBark).expect("pending");
    assert_eq!(next.upgrades.thick_bark, 1);
    assert_eq!(next.upgrades.total(), 1);
    assert_eq!(next.turns_in_level, 0);
    assert!(choose_upgrade(&next, UpgradeKind::ThickBark).is_none());
}

#[test]
fn starvation_and_pest_damage_land_in_the_same_turn() {
    let state = SessionState {
        stats: Stats::new(30, 60, 60, 25),
        ..SessionState::new()
    };
    let outcome = take_turn(&state, Action::Rest, &mut ScriptedRolls::always_event(0));
    // Rest: 45 health, nutrients 20 -> 13 after decay (starving, -10),
    // then the new pest outbreak bites for 15.
    assert_eq!(outcome.state.stats.health, 20);
    assert_eq!(
        outcome.state.active_event,
        Some(ActiveEvent {
            kind: EventKind::Pests,
            remaining_turns: 2
        })
    );
}

#[test]
fn thick_bark_and_strong_roots_soften_hazards() {
    let mut state = SessionState {
        stats: Stats::new(80, 60, 60, 60),
        active_event: Some(ActiveEvent::start(EventKind::Pests)),
        ..SessionState::new()
    };
    state.upgrades.thick_bark = 2;
    state.upgrades.strong_roots = 1;
    let outcome = take_turn(&state, Action::Sunlight, &mut calm());
    assert_eq!(outcome.state.stats.health, 80 + 5 - 9);
    assert_eq!(outcome.state.stats.water, 54);
}

#[test]
fn session_run_end_feeds_the_profile() {
    let doomed = SessionState {
        stats: Stats::new(5, 0, 0, 0),
        score: 80,
        ..SessionState::new()
    };
    let mut session = Session::from_state(doomed, calm(), Profile::default());
    let outcome = session.take_turn(Action::Sunlight);
    assert!(outcome.notifications.contains(&Notification::RunEnded {
        won: false,
        score: 90,
        high_score: 90
    }));
    assert!(
        outcome
            .notifications
            .contains(&Notification::HighScoreUpdated { high_score: 90 })
    );

    session.reset();
    assert_eq!(session.state(), &SessionState::new());
    assert_eq!(session.high_score(), 90);
}

#[test]
fn pests_kill_a_well_fed_plant() {
    let state = SessionState {
        stats: Stats::new(10, 80, 80, 80),
        active_event: Some(ActiveEvent::start(EventKind::Pests)),
        ..SessionState::new()
    };
    let outcome = take_turn(&state, Action::Water, &mut calm());
    assert_eq!(outcome.state.stats, Stats::new(0, 92, 74, 73));
    assert!(!outcome.state.stats.is_starving());
    assert_eq!(outcome.state.terminal, Terminal::Lost);
    assert_eq!(outcome.ended(), Some(Terminal::Lost));
}
