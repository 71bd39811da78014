use chrono::{TimeZone, Utc};

use api_types::catalog::PlayTypeInfo;
use bet_engine::{
    ALL_PLAY_TYPES, Amount, BetSession, EngineError, PlayType, PlayTypeCatalog, available_types,
    build_request,
};

fn catalog() -> PlayTypeCatalog {
    let entries: Vec<_> = ALL_PLAY_TYPES
        .into_iter()
        .enumerate()
        .map(|(n, t)| PlayTypeInfo {
            id: format!("pt-{n}"),
            name: t.as_str().to_string(),
            code: t.as_str().to_uppercase(),
        })
        .collect();
    PlayTypeCatalog::from_entries(&entries)
}

fn type_numbers(session: &mut BetSession, numbers: &str) {
    let draft = session.draft_mut();
    for ch in numbers.chars() {
        if ch == ',' {
            draft.press_delimiter().unwrap();
        } else {
            draft.press_digit(ch);
        }
    }
}

#[test]
fn mixed_fijo_centena_draft_prices_both_types() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "5,12,123");

    let available = available_types(&session.draft().tokens(), &catalog());
    assert!(available.contains(&PlayType::Fijo));
    assert!(available.contains(&PlayType::Centena));

    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Fijo);
    draft.toggle_type(PlayType::Centena);
    draft.set_amount_text(PlayType::Fijo, "10\n20");
    draft.set_amount_text(PlayType::Centena, "5");

    let plays = draft.valid_plays();
    let fijo = plays.iter().find(|p| p.play_type == PlayType::Fijo).unwrap();
    let centena = plays.iter().find(|p| p.play_type == PlayType::Centena).unwrap();
    assert_eq!(fijo.total, Amount::new(30_00));
    assert_eq!(centena.total, Amount::new(5_00));
    assert_eq!(draft.current_amount(), Amount::new(35_00));
}

#[test]
fn parlet_pair_scenario() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "07,15");
    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Parlet);
    draft.set_amount_text(PlayType::Parlet, "10");

    let plays = draft.valid_plays();
    assert_eq!(plays.len(), 1);
    assert_eq!(plays[0].combinations.len(), 1);
    assert_eq!(plays[0].combinations[0].to_string(), "07X15");
    assert_eq!(plays[0].total, Amount::new(10_00));
}

#[test]
fn parlet_combination_count_is_n_choose_two() {
    for n in 2..=6usize {
        let mut session = BetSession::new();
        let numbers: Vec<String> = (0..n).map(|i| format!("{:02}", 10 + i)).collect();
        type_numbers(&mut session, &numbers.join(","));
        let draft = session.draft_mut();
        draft.toggle_type(PlayType::Parlet);
        draft.set_amount_text(PlayType::Parlet, "2");

        let plays = draft.valid_plays();
        let expected = n * (n - 1) / 2;
        assert_eq!(plays[0].combinations.len(), expected);
        assert_eq!(plays[0].total, Amount::new(2_00).times(expected));
    }
}

#[test]
fn distant_range_steps_by_ten() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "23");
    let draft = session.draft_mut();
    draft.begin_range().unwrap();
    type_numbers(&mut session, "45");
    session.draft_mut().press_delimiter().unwrap();

    let run: Vec<String> = session
        .draft()
        .tokens()
        .iter()
        .map(|t| t.as_str().to_string())
        .collect();
    assert_eq!(run, vec!["23", "33", "43", "45"]);
}

#[test]
fn hundreds_range_expands_between_anchors() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "123");
    session.draft_mut().begin_range().unwrap();
    type_numbers(&mut session, "223");
    session.draft_mut().press_delimiter().unwrap();

    let run: Vec<String> = session
        .draft()
        .tokens()
        .iter()
        .map(|t| t.as_str().to_string())
        .collect();
    assert_eq!(run, vec!["123", "223"]);
}

#[test]
fn every_buffer_token_is_one_to_three_digits() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "5,12,123");
    session.draft_mut().press_delimiter().unwrap();
    session.draft_mut().press_backspace();
    for token in session.draft().tokens() {
        assert!((1..=3).contains(&token.len()));
        assert!(token.as_str().chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn duplicate_numbers_need_parlet() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "5,5");
    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Fijo);
    draft.set_amount_text(PlayType::Fijo, "10");

    assert!(matches!(
        session.separate(),
        Err(EngineError::DuplicateNumberNotAllowed(_))
    ));

    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Parlet);
    draft.set_amount_text(PlayType::Parlet, "5");
    assert!(session.separate().unwrap().is_some());
}

#[test]
fn submission_with_nothing_staged_fails() {
    let session = BetSession::new();
    let err = build_request(&session, "agent-1", Some("throw-9"), &catalog(), Utc::now())
        .unwrap_err();
    assert_eq!(err, EngineError::NoPlaysToSubmit);
}

#[test]
fn edit_round_trip_reproduces_the_play() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "5,12");
    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Fijo);
    draft.set_amount_text(PlayType::Fijo, "10\n20");
    let id = session.separate().unwrap().unwrap();
    let original = session.separated()[0].clone();

    assert!(session.edit(id));
    let id_again = session.separate().unwrap().unwrap();
    assert_eq!(id_again, id);
    let replayed = &session.separated()[0];
    assert_eq!(replayed.valid_plays, original.valid_plays);
    assert_eq!(replayed.total, original.total);
    assert_eq!(replayed.numbers, original.numbers);
}

#[test]
fn session_totals_and_validity_track_all_plays() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "5");
    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Fijo);
    draft.set_amount_text(PlayType::Fijo, "10");
    session.separate().unwrap();

    type_numbers(&mut session, "7");
    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Corrido);
    draft.set_amount_text(PlayType::Corrido, "5");

    assert_eq!(session.total_amount(), Amount::new(15_00));
    assert!(session.has_valid_amounts());

    session.reset();
    assert!(!session.has_valid_amounts());
    assert_eq!(session.total_amount(), Amount::ZERO);
}

#[test]
fn wire_payload_matches_backend_field_names() {
    let mut session = BetSession::new();
    type_numbers(&mut session, "07,15");
    let draft = session.draft_mut();
    draft.toggle_type(PlayType::Parlet);
    draft.set_amount_text(PlayType::Parlet, "10");
    session.separate().unwrap();

    let when = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
    let request =
        build_request(&session, "agent-1", Some("throw-9"), &catalog(), when).unwrap();
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["userId"], "agent-1");
    assert_eq!(json["throwId"], "throw-9");
    assert_eq!(json["date"], "2026-03-14T15:09:26Z");
    // A bet play carries nothing beyond its moves.
    let bet_play = json["betPlays"][0].as_object().unwrap();
    assert_eq!(bet_play.keys().collect::<Vec<_>>(), vec!["moves"]);
    let detail = &json["betPlays"][0]["moves"][0]["moveDetails"][0];
    assert_eq!(detail["number"], "07");
    assert_eq!(detail["secondNumber"], "15");
    assert_eq!(detail["amount"], 10.0);
    assert!(json["betPlays"][0]["moves"][0]["playTypeId"].is_string());
}
