//! Game integration tests.

use bjtable::card::{ACE, KING, QUEEN};
use bjtable::snapshot;
use bjtable::table::DEALER_BANKROLL;
use bjtable::{
    Action, ActionError, AlwaysStand, Card, DECK_SIZE, Decider, DeckError, Game, GameOptions,
    HandOutcome, HandStatus, Player, RoundError, RoundPhase, RoundingMode, SNAPSHOT_VERSION,
    Scripted, Seat, SetupError, SnapshotError, StandOnThreshold, Suit, Table, TurnView,
};
use serde_json::{Value, json};

fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank).unwrap()
}

/// One-deck game with the given wallets; seat 0 is the human.
fn table_game(wallets: &[usize], options: GameOptions) -> Game {
    let options = options.with_decks(1).with_seats(wallets.len());
    let mut table = Table::new(options.seats, options.minimum_bet);
    for (seat, &wallet) in wallets.iter().enumerate() {
        let player = Player::new(format!("P{seat}"), wallet, seat == 0);
        table.seat_player(player, seat).unwrap();
    }
    Game::with_table(options, table, 7).unwrap()
}

fn player(game: &Game, seat: usize) -> &Player {
    game.table().seat(seat).and_then(Seat::player).unwrap()
}

fn total_money(game: &Game) -> usize {
    game.table()
        .players()
        .map(|(_, p)| p.wallet() + p.bet())
        .sum::<usize>()
        + game.dealer().bankroll()
        + game.dealer().player().bet()
}

#[test]
fn higher_score_wins_twice_the_bet() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, KING),  // player
            card(Suit::Hearts, 9),     // dealer hole
            card(Suit::Spades, QUEEN), // player
            card(Suit::Hearts, KING),  // dealer up
        ])
        .unwrap();

    let report = game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();

    assert_eq!(report.hands.len(), 1);
    let hand = &report.hands[0];
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert_eq!(hand.player_score, 20);
    assert_eq!(hand.dealer_score, 19);
    assert_eq!(hand.payout, 20);
    assert_eq!(player(&game, 0).wallet(), 1010);
    assert_eq!(player(&game, 0).bet(), 0);
    assert_eq!(game.dealer().bankroll(), DEALER_BANKROLL - 10);
    assert_eq!(game.rounds_played(), 1);
}

/// Records what a seat could see each time it was asked to act.
#[derive(Default)]
struct Watcher {
    dealer_up_cards: Vec<Card>,
    hand_face_up: Vec<bool>,
}

impl Decider for Watcher {
    fn decide(&mut self, view: &TurnView<'_>) -> Action {
        self.dealer_up_cards.extend(view.dealer_up_card.copied());
        self.hand_face_up
            .push(view.hand.cards().iter().all(Card::is_face_up));
        Action::Stand
    }
}

#[test]
fn deal_shows_dealer_second_card_and_player_cards() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, KING),  // player
            card(Suit::Hearts, 9),     // dealer hole
            card(Suit::Spades, QUEEN), // player
            card(Suit::Hearts, KING),  // dealer up
        ])
        .unwrap();

    let mut human = Watcher::default();
    game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert_eq!(human.dealer_up_cards.len(), 1);
    assert!(human.dealer_up_cards[0].is_same_card(&card(Suit::Hearts, KING)));
    assert_eq!(human.hand_face_up, [true]);
}

#[test]
fn player_bust_loses_to_standing_dealer() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 10),   // player
            card(Suit::Hearts, 10),   // dealer hole
            card(Suit::Spades, 6),    // player
            card(Suit::Hearts, 8),    // dealer up
            card(Suit::Clubs, KING),  // player hit
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Hit]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    let hand = &report.hands[0];
    assert_eq!(hand.outcome, HandOutcome::Lose);
    assert_eq!(hand.player_score, 26);
    assert_eq!(hand.dealer_score, 18);
    assert_eq!(player(&game, 0).wallet(), 990);
    assert_eq!(player(&game, 0).hands()[0].status(), HandStatus::Bust);
    assert_eq!(game.dealer().bankroll(), DEALER_BANKROLL + 10);
}

#[test]
fn both_bust_is_a_push() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 10),    // player
            card(Suit::Hearts, 10),    // dealer hole
            card(Suit::Spades, 6),     // player
            card(Suit::Hearts, 6),     // dealer up
            card(Suit::Clubs, KING),   // player hit
            card(Suit::Diamonds, 8),   // dealer draw
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Hit]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert!(report.dealer_bust);
    assert_eq!(report.dealer_score, 24);
    assert_eq!(report.hands[0].outcome, HandOutcome::Push);
    assert_eq!(report.hands[0].payout, 10);
    assert_eq!(player(&game, 0).wallet(), 1000);
    assert_eq!(game.dealer().bankroll(), DEALER_BANKROLL);
}

#[test]
fn dealer_blackjack_skips_player_turns() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 10),   // player
            card(Suit::Hearts, ACE),  // dealer hole
            card(Suit::Spades, 9),    // player
            card(Suit::Hearts, KING), // dealer up
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Hit]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert!(report.dealer_blackjack);
    assert_eq!(
        report.phases,
        [
            RoundPhase::Clear,
            RoundPhase::Shuffle,
            RoundPhase::Bet,
            RoundPhase::Deal,
            RoundPhase::Score,
            RoundPhase::DealerBlackjackCheck,
            RoundPhase::Settle,
        ]
    );
    assert_eq!(player(&game, 0).hands()[0].len(), 2);
    assert_eq!(report.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(report.dealer_score, 21);
    assert!(game.dealer().hand().unwrap().cards().iter().all(Card::is_face_up));
}

#[test]
fn full_round_visits_every_phase() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, KING),
            card(Suit::Hearts, 9),
            card(Suit::Spades, QUEEN),
            card(Suit::Hearts, KING),
        ])
        .unwrap();

    let report = game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();

    assert_eq!(
        report.phases,
        [
            RoundPhase::Clear,
            RoundPhase::Shuffle,
            RoundPhase::Bet,
            RoundPhase::Deal,
            RoundPhase::Score,
            RoundPhase::DealerBlackjackCheck,
            RoundPhase::PlayerTurns,
            RoundPhase::DealerTurn,
            RoundPhase::Settle,
        ]
    );
    assert!(!report.dealer_blackjack);
}

#[test]
fn double_down_doubles_bet_and_takes_one_card() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 5),  // player
            card(Suit::Hearts, 10), // dealer hole
            card(Suit::Spades, 6),  // player
            card(Suit::Hearts, 7),  // dealer up
            card(Suit::Clubs, 10),  // double-down card
        ])
        .unwrap();

    let mut human = Scripted::new([Action::DoubleDown, Action::Hit]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    let hand = &report.hands[0];
    assert_eq!(hand.bet, 20);
    assert_eq!(hand.player_score, 21);
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert_eq!(player(&game, 0).wallet(), 1020);
    assert_eq!(player(&game, 0).hands()[0].len(), 3);
    assert_eq!(player(&game, 0).hands()[0].status(), HandStatus::Stand);
    assert!(human.rejections().is_empty());
}

#[test]
fn double_down_without_funds_is_rejected() {
    let mut game = table_game(&[15], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, KING),
            card(Suit::Hearts, 9),
            card(Suit::Spades, QUEEN),
            card(Suit::Hearts, KING),
        ])
        .unwrap();

    let mut human = Scripted::new([Action::DoubleDown]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert_eq!(
        human.rejections(),
        [(Action::DoubleDown, ActionError::InsufficientFunds)]
    );
    assert_eq!(report.hands[0].bet, 10);
    assert_eq!(report.hands[0].outcome, HandOutcome::Win);
    assert_eq!(player(&game, 0).wallet(), 25);
}

#[test]
fn surrender_refunds_half_and_forfeits() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 10),
            card(Suit::Hearts, 10),
            card(Suit::Spades, 6),
            card(Suit::Hearts, 8),
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Surrender]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    let hand = &report.hands[0];
    assert_eq!(hand.outcome, HandOutcome::Lose);
    assert_eq!(hand.player_score, 0);
    assert_eq!(player(&game, 0).wallet(), 995);
    assert_eq!(player(&game, 0).bet(), 0);
    assert_eq!(player(&game, 0).hands()[0].status(), HandStatus::Surrendered);
    assert_eq!(game.dealer().bankroll(), DEALER_BANKROLL + 5);
}

#[test]
fn surrender_rounding_follows_options() {
    let options = GameOptions::default()
        .with_minimum_bet(15)
        .with_rounding_surrender(RoundingMode::Up);
    let mut game = table_game(&[1000], options);
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 10),
            card(Suit::Hearts, 10),
            card(Suit::Spades, 6),
            card(Suit::Hearts, 8),
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Surrender]);
    game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert_eq!(player(&game, 0).wallet(), 993);
    assert_eq!(game.dealer().bankroll(), DEALER_BANKROLL + 7);
}

#[test]
fn split_is_rejected_and_turn_continues() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 8),
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 8),
            card(Suit::Hearts, 7),
            card(Suit::Diamonds, 3), // hit after the rejected split
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Split, Action::Hit, Action::Stand]);
    let report = game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert_eq!(
        human.rejections(),
        [(Action::Split, ActionError::SplitUnsupported)]
    );
    assert_eq!(player(&game, 0).hands().len(), 1);
    assert_eq!(report.hands[0].player_score, 19);
    assert_eq!(report.hands[0].outcome, HandOutcome::Win);
}

#[test]
fn interactive_seat_is_asked_until_it_acts() {
    let mut game = table_game(&[1000], GameOptions::default());
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 2),
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 3),
            card(Suit::Hearts, 7),
            card(Suit::Diamonds, 4),
        ])
        .unwrap();

    let mut human = Scripted::new([Action::Split; 5].into_iter().chain([Action::Hit]));
    game.play_round(&mut human, &mut AlwaysStand).unwrap();

    assert_eq!(human.rejections().len(), 5);
    assert_eq!(player(&game, 0).hands()[0].len(), 3);
}

#[test]
fn computer_seat_stands_after_repeated_rejections() {
    let options = GameOptions::default().with_decks(1).with_seats(1);
    let mut table = Table::new(1, options.minimum_bet);
    table
        .seat_player(Player::new("Bot", 1000, false), 0)
        .unwrap();
    let mut game = Game::with_table(options, table, 7).unwrap();
    game.deck_mut()
        .stack(&[
            card(Suit::Spades, 2),
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 3),
            card(Suit::Hearts, 7),
        ])
        .unwrap();

    let mut computer = Scripted::new([Action::Split; 10].into_iter().chain([Action::Hit]));
    game.play_round(&mut AlwaysStand, &mut computer).unwrap();

    assert_eq!(computer.rejections().len(), bjtable::game::MAX_REJECTIONS);
    assert_eq!(player(&game, 0).hands()[0].len(), 2);
    assert_eq!(player(&game, 0).hands()[0].status(), HandStatus::Stand);
}

#[test]
fn broke_player_is_vacated_before_the_deal() {
    let mut game = table_game(&[1000, 5], GameOptions::default());

    let report = game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();

    assert_eq!(report.vacated, [(1, String::from("P1"))]);
    assert!(game.table().seat(1).unwrap().is_empty());
    assert_eq!(report.hands.len(), 1);
    assert!(report.for_seat(1).next().is_none());
    assert!(game.cards_accounted_for());
}

#[test]
fn empty_deck_aborts_round_and_returns_bets() {
    let options = GameOptions::default().with_decks(1).with_seats(30);
    let mut game = Game::new(options, 3).unwrap();
    let before: Vec<usize> = game.table().players().map(|(_, p)| p.wallet()).collect();

    let err = game
        .play_round(&mut AlwaysStand, &mut AlwaysStand)
        .unwrap_err();

    assert_eq!(err, RoundError::Deck(DeckError::Empty));
    let after: Vec<usize> = game.table().players().map(|(_, p)| p.wallet()).collect();
    assert_eq!(before, after);
    assert!(game.table().players().all(|(_, p)| p.bet() == 0));
    assert_eq!(game.rounds_played(), 0);
    assert!(game.cards_accounted_for());

    game.clear_table().unwrap();
    assert_eq!(game.deck().len(), game.deck().capacity());
}

#[test]
fn three_seat_round_settles_every_bet() {
    let mut game = table_game(&[1000, 1000, 1000], GameOptions::default());

    let report = game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();

    assert_eq!(report.hands.len(), 3);
    for result in &report.hands {
        let expected = match result.outcome {
            HandOutcome::Win => 1010,
            HandOutcome::Lose => 990,
            HandOutcome::Push => 1000,
        };
        assert_eq!(player(&game, result.seat).wallet(), expected);
        assert_eq!(player(&game, result.seat).bet(), 0);
    }
    assert_eq!(game.dealer().player().bet(), 0);
}

#[test]
fn cards_and_money_are_conserved_across_rounds() {
    let mut game = Game::new(GameOptions::default(), 3).unwrap();
    let money = total_money(&game);
    let mut computer = StandOnThreshold::default();

    for _ in 0..20 {
        let report = game.play_round(&mut AlwaysStand, &mut computer).unwrap();
        assert!(report.vacated.is_empty());
        assert!(game.cards_accounted_for());
        assert_eq!(total_money(&game), money);
    }
    assert_eq!(game.rounds_played(), 20);

    game.clear_table().unwrap();
    assert_eq!(game.deck().len(), game.deck().capacity());
    assert!(game.table().players().all(|(_, p)| p.hands().is_empty()));
}

#[test]
fn new_game_seats_human_and_computers() {
    let options = GameOptions::default().with_seats(4).with_human_seat(2);
    let game = Game::new(options, 11).unwrap();

    assert_eq!(game.table().occupied(), 4);
    let (seat, human) = game.table().interactive_player().unwrap();
    assert_eq!(seat, 2);
    assert_eq!(human.name(), "TheUser");
    assert_eq!(human.wallet(), 1000);
    for (_, computer) in game.table().players().filter(|(_, p)| !p.is_interactive()) {
        assert!((500..10_000).contains(&computer.wallet()));
    }
}

#[test]
fn invalid_options_are_rejected() {
    let cases = [
        (GameOptions::default().with_seats(0), SetupError::NoSeats),
        (GameOptions::default().with_decks(0), SetupError::NoDecks),
        (GameOptions::default().with_minimum_bet(0), SetupError::ZeroMinimumBet),
        (
            GameOptions::default().with_human_seat(3),
            SetupError::SeatOutOfRange { seat: 3, seats: 3 },
        ),
    ];
    for (options, expected) in cases {
        assert_eq!(Game::new(options, 1).unwrap_err(), expected);
    }
}

#[test]
fn reconfigure_keeps_game_on_invalid_options() {
    let mut game = Game::new(GameOptions::default(), 5).unwrap();
    game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();

    let err = game
        .reconfigure(GameOptions::default().with_seats(0))
        .unwrap_err();
    assert_eq!(err, SetupError::NoSeats);
    assert_eq!(game.rounds_played(), 1);

    game.reconfigure(GameOptions::default().with_seats(5).with_decks(2))
        .unwrap();
    assert_eq!(game.table().seat_count(), 5);
    assert_eq!(game.deck().capacity(), 104);
    assert_eq!(game.rounds_played(), 0);
    assert!(game.cards_accounted_for());
}

#[test]
fn restart_reseats_and_collects_cards() {
    let mut game = Game::new(GameOptions::default(), 5).unwrap();
    for _ in 0..3 {
        game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();
    }

    game.restart().unwrap();

    assert_eq!(game.rounds_played(), 0);
    assert_eq!(game.deck().len(), game.deck().capacity());
    assert_eq!(game.dealer().bankroll(), DEALER_BANKROLL);
    let (_, human) = game.table().interactive_player().unwrap();
    assert_eq!(human.wallet(), 1000);
}

#[test]
fn snapshot_resumes_identically() {
    let mut game = Game::new(GameOptions::default(), 21).unwrap();
    for _ in 0..2 {
        game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();
    }

    let mut buf = Vec::new();
    snapshot::save(&game, &mut buf).unwrap();
    let mut restored = snapshot::load(buf.as_slice()).unwrap();

    assert_eq!(restored.rounds_played(), 2);
    assert_eq!(
        serde_json::to_string(&restored.snapshot()).unwrap(),
        serde_json::to_string(&game.snapshot()).unwrap()
    );

    let original = game.play_round(&mut AlwaysStand, &mut AlwaysStand).unwrap();
    let resumed = restored
        .play_round(&mut AlwaysStand, &mut AlwaysStand)
        .unwrap();
    assert_eq!(original, resumed);
}

#[test]
fn snapshot_from_another_version_is_rejected() {
    let game = Game::new(GameOptions::default(), 1).unwrap();
    let mut value = serde_json::to_value(game.snapshot()).unwrap();
    value["version"] = serde_json::json!(SNAPSHOT_VERSION + 1);

    let err = snapshot::load(serde_json::to_vec(&value).unwrap().as_slice()).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::UnsupportedVersion { found, expected }
            if found == SNAPSHOT_VERSION + 1 && expected == SNAPSHOT_VERSION
    ));
}

#[test]
fn snapshot_missing_a_card_is_rejected() {
    let game = Game::new(GameOptions::default(), 1).unwrap();
    let mut value = serde_json::to_value(game.snapshot()).unwrap();
    value["deck"]["cards"].as_array_mut().unwrap().pop();

    let err = snapshot::load(serde_json::to_vec(&value).unwrap().as_slice()).unwrap_err();
    assert!(matches!(err, SnapshotError::Inconsistent(_)));
}

fn load_tampered(edit: impl FnOnce(&mut Value)) -> SnapshotError {
    let game = Game::new(GameOptions::default(), 1).unwrap();
    let mut value = serde_json::to_value(game.snapshot()).unwrap();
    edit(&mut value);
    snapshot::load(serde_json::to_vec(&value).unwrap().as_slice()).unwrap_err()
}

#[test]
fn snapshot_with_out_of_range_card_is_rejected() {
    let err = load_tampered(|value| {
        value["deck"]["cards"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "suit": "Hearts", "rank": 14, "face_up": false }));
    });
    assert!(matches!(err, SnapshotError::Inconsistent(_)));
}

#[test]
fn snapshot_with_extra_card_is_rejected() {
    let err = load_tampered(|value| {
        value["deck"]["cards"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "suit": "Clubs", "rank": 5, "face_up": false }));
    });
    assert!(matches!(err, SnapshotError::Inconsistent(_)));
}

#[test]
fn snapshot_table_must_match_options() {
    let err = load_tampered(|value| value["options"]["minimum_bet"] = json!(25));
    assert!(matches!(err, SnapshotError::Inconsistent(_)));

    let err = load_tampered(|value| {
        value["table"]["seats"][1]["player"]["interactive"] = json!(true);
    });
    assert!(matches!(err, SnapshotError::Inconsistent(_)));

    let err = load_tampered(|value| {
        let empty = json!({ "cards": [], "score": 0, "status": "Active" });
        value["dealer"]["player"]["hands"] = json!([empty.clone(), empty]);
    });
    assert!(matches!(err, SnapshotError::Inconsistent(_)));
}

#[test]
fn garbage_snapshot_is_a_json_error() {
    let err = snapshot::load(&b"not a snapshot"[..]).unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}

/// Seat 0 holds a copy of a card the deck still has, followed by a real one.
fn table_with_stray_card() -> Game {
    let mut game = table_game(&[1000], GameOptions::default());
    let dealt = game.deck_mut().deal(true).unwrap();
    let seated = game
        .table_mut()
        .seat_mut(0)
        .and_then(Seat::player_mut)
        .unwrap();
    seated.receive_card(card(Suit::Hearts, 7), 0);
    seated.receive_card(dealt, 0);
    game
}

#[test]
fn failed_clear_keeps_cards_it_could_not_return() {
    let mut game = table_with_stray_card();

    let err = game.clear_table().unwrap_err();

    assert_eq!(
        err,
        DeckError::DuplicateCard {
            suit: Suit::Hearts,
            rank: 7,
            copies: 1,
        }
    );
    assert_eq!(player(&game, 0).hands()[0].len(), 2);
    assert_eq!(game.deck().len(), DECK_SIZE - 1);
}

#[test]
fn restart_reports_cards_it_cannot_collect() {
    let mut game = table_with_stray_card();

    let err = game.restart().unwrap_err();

    assert!(matches!(
        err,
        SetupError::Deck(DeckError::DuplicateCard { rank: 7, .. })
    ));
    assert_eq!(player(&game, 0).name(), "P0");
    assert_eq!(player(&game, 0).hands()[0].len(), 2);
}
