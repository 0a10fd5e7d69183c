//! Full-game scenarios driven through the public API only.

use tilechess::check;
use tilechess::prelude::*;
use tilechess::RestoreError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Plays one move through select + commit and asserts it was accepted.
fn play(game: &mut Game, from: (u16, u16), to: (u16, u16)) -> Commit {
    let grid = game.position().board().grid();
    let id = game
        .piece_at(grid.tile(from.0, from.1))
        .unwrap_or_else(|| panic!("no piece on {:?}", from));
    assert_eq!(game.select(id), Selection::Selected, "select {:?}", from);
    let commit = game.commit(grid.tile(to.0, to.1));
    assert_ne!(commit, Commit::Ignored, "commit {:?} -> {:?}", from, to);
    commit
}

#[test]
fn test_fools_mate() {
    let mut game = Game::standard();
    let grid = Grid::STANDARD;

    play(&mut game, (1, 5), (2, 5)); // f3
    play(&mut game, (6, 4), (4, 4)); // e5
    play(&mut game, (1, 6), (3, 6)); // g4
    play(&mut game, (7, 3), (3, 7)); // Qh4

    assert!(game.in_check(Player::White));
    assert!(!game.is_over());

    // The mate is discovered the moment White tries to act.
    let king = game.piece_at(grid.tile(0, 4)).unwrap();
    assert_eq!(game.select(king), Selection::Checkmate);
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            winner: Player::Black,
            reason: WinReason::Checkmate,
        })
    );
    assert_eq!(game.move_count(), 5);
}

#[test]
fn test_scholars_mate() {
    let mut game = Game::standard();
    let grid = Grid::STANDARD;

    play(&mut game, (1, 4), (3, 4)); // e4
    play(&mut game, (6, 4), (4, 4)); // e5
    play(&mut game, (0, 5), (3, 2)); // Bc4
    play(&mut game, (7, 1), (5, 2)); // Nc6
    play(&mut game, (0, 3), (2, 5)); // Qf3
    play(&mut game, (6, 0), (5, 0)); // a6
    assert_eq!(play(&mut game, (2, 5), (6, 5)), Commit::Captured); // Qxf7

    assert!(game.in_check(Player::Black));
    assert!(!game.is_over());

    // The queen is protected by the bishop on c4, so the king cannot take
    // it back and nothing blocks an adjacent check.
    let king = game.piece_at(grid.tile(7, 4)).unwrap();
    assert_eq!(game.select(king), Selection::Checkmate);
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            winner: Player::White,
            reason: WinReason::Checkmate,
        })
    );
}

#[test]
fn test_promotion_and_forged_save() {
    let grid = Grid::STANDARD;
    let mut game = Game::new(
        grid,
        vec![
            Piece::new(PieceKind::King, Player::White, grid.tile(0, 4)),
            Piece::new(PieceKind::Pawn, Player::White, grid.tile(6, 2)),
            Piece::new(PieceKind::King, Player::Black, grid.tile(7, 7)),
            Piece::new(PieceKind::Rook, Player::Black, grid.tile(7, 1)),
        ],
        Player::White,
    )
    .unwrap();

    let pawn = game.piece_at(grid.tile(6, 2)).unwrap();
    assert_eq!(game.select(pawn), Selection::Selected);
    assert_eq!(game.commit(grid.tile(7, 1)), Commit::PromotionPending);

    // The snapshot of a parked promotion is not resumable.
    assert_eq!(
        Game::restore(&game.save()),
        Err(RestoreError::PawnUnpromoted(grid.tile(7, 1)))
    );

    assert!(game.promote(PieceKind::Knight));
    let knight = game.piece_at(grid.tile(7, 1)).unwrap();
    assert_eq!(game.position().piece(knight).kind, PieceKind::Knight);
    assert_eq!(game.turn(), Player::Black);
    assert!(game.position().is_consistent());
}

#[test]
fn test_king_capture_wins_instantly() {
    let grid = Grid::STANDARD;
    // Black king walks into the rook's file by design of the setup: give
    // White the move with the king already en prise.
    let mut game = Game::new(
        grid,
        vec![
            Piece::new(PieceKind::King, Player::White, grid.tile(0, 4)),
            Piece::new(PieceKind::Rook, Player::White, grid.tile(0, 0)),
            Piece::new(PieceKind::King, Player::Black, grid.tile(7, 0)),
        ],
        Player::White,
    )
    .unwrap();

    assert_eq!(play(&mut game, (0, 0), (7, 0)), Commit::KingCaptured);
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            winner: Player::White,
            reason: WinReason::KingCaptured,
        })
    );
    assert_eq!(game.move_count(), 1);
    assert!(game.is_over());
}

#[test]
fn test_save_restore_resumes_play() {
    let mut game = Game::standard();
    play(&mut game, (1, 3), (3, 3)); // d4
    play(&mut game, (6, 3), (4, 3)); // d5
    play(&mut game, (0, 2), (2, 4)); // Be3
    let saved = game.save();

    let mut resumed = Game::restore(&saved).unwrap();
    assert_eq!(resumed.turn(), Player::Black);
    assert_eq!(resumed.move_count(), 4);
    assert_eq!(resumed.position().pieces(), game.position().pieces());

    // The resumed game accepts further play.
    play(&mut resumed, (7, 2), (5, 4)); // Be6
    assert_eq!(resumed.turn(), Player::White);
    assert!(resumed.position().is_consistent());
}

#[test]
fn test_rectangular_board_game() {
    let grid = Grid::new(6, 4).unwrap();
    let mut game = Game::new(
        grid,
        vec![
            Piece::new(PieceKind::King, Player::White, grid.tile(0, 1)),
            Piece::new(PieceKind::Pawn, Player::White, grid.tile(1, 2)),
            Piece::new(PieceKind::King, Player::Black, grid.tile(5, 3)),
        ],
        Player::White,
    )
    .unwrap();

    // The pawn's double step works on any board with room for it.
    let pawn = game.piece_at(grid.tile(1, 2)).unwrap();
    game.select(pawn);
    assert_eq!(game.commit(grid.tile(3, 2)), Commit::Moved);

    // The king sidesteps the pawn's covered diagonals.
    play(&mut game, (5, 3), (5, 2));
    play(&mut game, (3, 2), (4, 2)); // one rank short of promotion

    // Black king captures the pawn before it promotes.
    assert_eq!(play(&mut game, (5, 2), (4, 2)), Commit::Captured);
    assert!(game.position().is_consistent());
}

/// Drives a few hundred plies of random legal play and asserts the global
/// invariants after every one of them.
#[test]
fn test_random_self_play_stays_consistent() {
    let mut rng = StdRng::seed_from_u64(0x7c3a_55aa);

    for _ in 0..10 {
        let mut game = Game::standard();
        for _ in 0..200 {
            if game.is_over() {
                break;
            }
            let mover = game.turn();
            let mut ids: Vec<PieceId> =
                game.position().living(mover).map(|(id, _)| id).collect();
            assert!(!ids.is_empty());

            // Try pieces in random order until one has a destination.
            let mut moved = false;
            let mut mate = false;
            while !ids.is_empty() {
                let pick = rng.gen_range(0..ids.len());
                let id = ids.swap_remove(pick);
                match game.select(id) {
                    Selection::Checkmate => {
                        mate = true;
                        break;
                    }
                    Selection::Selected | Selection::Ignored => {}
                }
                let legal = match game.legal_destinations() {
                    Some(l) if !l.is_empty() => l,
                    _ => continue,
                };
                let all: Vec<Tile> = legal
                    .moves
                    .iter()
                    .chain(legal.attacks.iter())
                    .copied()
                    .collect();
                let target = all[rng.gen_range(0..all.len())];
                match game.commit(target) {
                    Commit::PromotionPending => {
                        let kind =
                            PieceKind::PROMOTABLE[rng.gen_range(0..PieceKind::PROMOTABLE.len())];
                        assert!(game.promote(kind));
                    }
                    Commit::Moved | Commit::Captured => {}
                    Commit::KingCaptured => {
                        panic!("legal play can never capture a king")
                    }
                    Commit::Ignored => panic!("a legal destination was rejected"),
                }
                moved = true;
                break;
            }

            if mate {
                assert!(game.is_over());
                break;
            }
            if !moved {
                // No piece had a legal move while not in check; the engine
                // has no draw rules, so the game simply stops here.
                assert!(!game.in_check(mover));
                break;
            }

            assert!(game.position().is_consistent());
            assert_eq!(
                game.in_check(game.turn()),
                check::is_in_check(game.position(), game.turn())
            );
            // The player who just moved can never have left their king in
            // check.
            assert!(!check::is_in_check(game.position(), mover));

            // Kings survive every legal move.
            for player in [Player::White, Player::Black] {
                let king = game.position().king_of(player).unwrap();
                assert!(game.position().piece(king).alive);
            }

            // Save and restore must agree at every ply.
            let restored = Game::restore(&game.save()).unwrap();
            assert_eq!(restored.position().pieces(), game.position().pieces());
            assert_eq!(restored.turn(), game.turn());
        }
    }
}
