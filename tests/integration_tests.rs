//! Integration tests for the game loop controller

use blockfall::core::{points_for, try_points_for, Field, Game, TickOutcome};
use blockfall::types::{
    Cell, Key, LockEvent, PieceKind, PlayerInput, TickSpeed, DEFAULT_QUEUE_LEN, FIELD_HEIGHT,
    FIELD_WIDTH,
};

fn press(game: &mut Game, key: Key) -> bool {
    game.handle_input(PlayerInput::Press(key))
}

fn release(game: &mut Game, key: Key) -> bool {
    game.handle_input(PlayerInput::Release(key))
}

fn tap(game: &mut Game, key: Key, times: usize) {
    for _ in 0..times {
        press(game, key);
        release(game, key);
    }
}

fn run_until_lock(game: &mut Game) -> TickOutcome {
    for _ in 0..100 {
        match game.tick() {
            TickOutcome::Dropped | TickOutcome::LockPending | TickOutcome::LockCancelled => {}
            outcome => return outcome,
        }
    }
    panic!("piece never locked");
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(12345);
    assert!(!game.started());
    assert!(!game.playing());

    game.start();
    assert!(game.started());
    assert!(game.playing());
    assert_eq!(game.tick_speed(), Some(TickSpeed::Normal));
    assert_eq!(game.upcoming().len(), DEFAULT_QUEUE_LEN);

    assert!(game.stop());
    assert!(!game.playing());
    assert_eq!(game.tick(), TickOutcome::Idle);
}

#[test]
fn test_i_piece_pending_lock_after_eighteen_drops() {
    let mut game = Game::new(1);
    game.set_upcoming(&[PieceKind::I]);
    game.start();

    for _ in 0..18 {
        assert_eq!(game.tick(), TickOutcome::Dropped);
    }
    assert_eq!(game.tick(), TickOutcome::LockPending);
    assert_eq!(game.tick_speed(), Some(TickSpeed::Sliding));
}

#[test]
fn test_single_row_clear_scores_100_for_varied_fields() {
    // Row 19 is full but for column 9; rows above carry varied debris
    for variant in 0..4i16 {
        let mut field = Field::new();
        for col in 0..9 {
            field.set(19, col, Cell::Filled(PieceKind::L));
        }
        for col in 0..=variant {
            field.set(18, col * 2, Cell::Filled(PieceKind::S));
        }

        let mut game = Game::new(7);
        game.set_upcoming(&[PieceKind::O]);
        assert!(game.start_with_field(field));
        tap(&mut game, Key::Right, 5);
        assert_eq!(game.grid().falling().col, 8);

        // O drops into the gap over rows 18 and 19 at columns 8-9
        match run_until_lock(&mut game) {
            TickOutcome::Locked(event) => {
                assert_eq!(event.lines_cleared, 1);
                assert_eq!(event.points, 100);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(game.score(), 100);
        assert_eq!(game.field().rows().count(), FIELD_HEIGHT);
        assert!(game.field().rows().all(|row| row.len() == FIELD_WIDTH));
    }
}

#[test]
fn test_score_delta_matches_table() {
    for lines in 0..=4usize {
        assert_eq!(try_points_for(lines), Some(points_for(lines)));
    }
    assert_eq!(try_points_for(5), None);
}

#[test]
#[should_panic]
fn test_impossible_line_count_aborts() {
    points_for(7);
}

#[test]
fn test_both_directions_cancel() {
    let mut game = Game::new(3);
    game.start();
    let col = game.grid().falling().col;

    press(&mut game, Key::Left);
    press(&mut game, Key::Right);
    game.repeat_tick();
    game.repeat_tick();
    assert_eq!(game.grid().falling().col, col - 1);
}

#[test]
fn test_spawn_collision_ends_game_and_stops_ticking() {
    // Spawn area is clear, but the well below it is packed to row 2
    let mut field = Field::new();
    for row in 2..FIELD_HEIGHT as i16 {
        for col in 2..8 {
            field.set(row, col, Cell::Filled(PieceKind::J));
        }
    }
    let mut game = Game::new(9);
    game.set_upcoming(&[PieceKind::T, PieceKind::I]);
    assert!(game.start_with_field(field));

    assert_eq!(game.tick(), TickOutcome::LockPending);
    assert_eq!(game.tick(), TickOutcome::GameOver);
    assert!(!game.playing());
    assert_eq!(game.tick_speed(), None);
    assert_eq!(game.score(), 0);
    assert!(game.take_last_event().is_none());

    for _ in 0..10 {
        assert_eq!(game.tick(), TickOutcome::Idle);
    }
    assert!(!game.repeat_tick());
}

#[test]
fn test_upcoming_queue_rolls_on_lock() {
    let mut game = Game::new(2024);
    game.start();
    let before: Vec<_> = game.upcoming().collect();

    let outcome = run_until_lock(&mut game);
    assert!(matches!(outcome, TickOutcome::Locked(_)));

    let after: Vec<_> = game.upcoming().collect();
    assert_eq!(after.len(), before.len());
    assert_eq!(game.grid().falling().kind, before[0]);
    assert_eq!(&after[..before.len() - 1], &before[1..]);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = Game::new(seed);
        game.start();
        let mut events = Vec::new();
        for i in 0..400 {
            if i % 7 == 0 {
                tap(&mut game, Key::Left, 1);
            }
            if i % 11 == 0 {
                press(&mut game, Key::RotateCw);
            }
            if let TickOutcome::Locked(event) = game.tick() {
                events.push(event);
            }
        }
        (events, game.snapshot())
    };

    assert_eq!(play(31337), play(31337));
}

#[test]
fn test_last_event_reports_lock() {
    let mut game = Game::new(5);
    game.set_upcoming(&[PieceKind::Z]);
    game.start();
    run_until_lock(&mut game);

    assert_eq!(
        game.take_last_event(),
        Some(LockEvent {
            kind: PieceKind::Z,
            lines_cleared: 0,
            points: 0,
        })
    );
    assert_eq!(game.pieces_locked(), 1);
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut game = Game::new(11);
    game.start();
    let mut snap = game.snapshot();
    snap.field[19][0] = Cell::Filled(PieceKind::I);
    snap.score = 9999;

    assert!(!game.field().is_filled(19, 0));
    assert_eq!(game.score(), 0);
}

#[test]
fn test_snapshot_reports_next_piece() {
    let mut game = Game::new(11);
    game.set_upcoming(&[PieceKind::S, PieceKind::J]);
    game.start();

    let snap = game.snapshot();
    assert_eq!(snap.next, Some(PieceKind::J));
    assert_eq!(snap.upcoming[0], PieceKind::J);
    assert_eq!(snap.active.map(|p| p.kind), Some(PieceKind::S));
}

#[test]
fn test_lock_returns_held_soft_drop_to_normal() {
    let mut game = Game::new(21);
    game.start();
    press(&mut game, Key::SoftDrop);
    assert_eq!(game.tick_speed(), Some(TickSpeed::Fast));

    assert!(matches!(run_until_lock(&mut game), TickOutcome::Locked(_)));
    assert_eq!(game.tick_speed(), Some(TickSpeed::Normal));

    // Still physically held; releasing changes nothing
    release(&mut game, Key::SoftDrop);
    assert_eq!(game.tick_speed(), Some(TickSpeed::Normal));
}

#[test]
fn test_cancelled_lock_returns_held_soft_drop_to_normal() {
    let mut field = Field::new();
    for col in 0..5 {
        field.set(5, col, Cell::Filled(PieceKind::S));
    }
    let mut game = Game::new(21);
    game.set_upcoming(&[PieceKind::O]);
    assert!(game.start_with_field(field));
    press(&mut game, Key::SoftDrop);

    for _ in 0..3 {
        assert_eq!(game.tick(), TickOutcome::Dropped);
    }
    assert_eq!(game.tick(), TickOutcome::LockPending);
    assert_eq!(game.tick_speed(), Some(TickSpeed::Sliding));

    // Slide off the ledge while soft drop stays held
    tap(&mut game, Key::Right, 2);
    assert_eq!(game.grid().falling().col, 5);

    assert_eq!(game.tick(), TickOutcome::LockCancelled);
    assert_eq!(game.tick_speed(), Some(TickSpeed::Normal));
    assert_eq!(game.tick(), TickOutcome::Dropped);
    assert_eq!(game.pieces_locked(), 0);
}
