#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{
        board::{Board, Cell, Player},
        config::SearchConfig,
        error::MoveError,
        eval::evaluate,
        rules::{game_state, is_game_over, is_winner, GameState},
        solver::{find_best_move, Solver, INFINITY},
        HEIGHT, WIDTH,
    };

    /// Plays random legal moves until `max_moves` are on the board or the game ends
    fn random_position(rng: &mut StdRng, max_moves: usize) -> (Board, Player) {
        let mut board = Board::new();
        let mut player = Player::One;
        while board.num_moves() < max_moves && !is_game_over(&board) {
            let legal: Vec<usize> = board.legal_moves().collect();
            let column = legal[rng.gen_range(0..legal.len())];
            board = board
                .make_move(column, player)
                .expect("legal move rejected");
            player = -player;
        }
        (board, player)
    }

    /// Every column is filled from the bottom up with no gaps
    fn has_gravity(board: &Board) -> bool {
        (0..WIDTH).all(|column| {
            let top = (0..HEIGHT).find(|&row| !board.get(row, column).is_empty());
            match top {
                Some(top) => (top..HEIGHT).all(|row| !board.get(row, column).is_empty()),
                None => true,
            }
        })
    }

    /// Looks for four in a row by walking outwards from every tile
    fn has_run_of_four(board: &Board, player: Player) -> bool {
        let cell = player.cell();
        for row in 0..HEIGHT as i32 {
            for column in 0..WIDTH as i32 {
                for &(dy, dx) in [(0, 1), (1, 0), (1, 1), (1, -1)].iter() {
                    let run = (0..4).all(|i| {
                        let (y, x) = (row + dy * i, column + dx * i);
                        y >= 0
                            && y < HEIGHT as i32
                            && x >= 0
                            && x < WIDTH as i32
                            && board.get(y as usize, x as usize) == cell
                    });
                    if run {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Negamax without pruning, visiting every node to the given depth
    fn full_width_negamax(board: &Board, depth: usize, player: Player) -> i32 {
        if depth == 0 || is_game_over(board) {
            return player.sign() * evaluate(board, player);
        }
        board
            .legal_moves()
            .filter_map(|column| board.make_move(column, player).ok())
            .map(|next| -full_width_negamax(&next, depth - 1, -player))
            .max()
            .unwrap_or(-INFINITY)
    }

    /// Builds a board from rows of 'X' (player one) and 'O' (player two), top row first
    fn board_from_rows(rows: [&str; HEIGHT]) -> Result<Board> {
        let mut board = Board::new();
        for column in 0..WIDTH {
            for row in (0..HEIGHT).rev() {
                match rows[row].as_bytes()[column] {
                    b'X' => board.play(column, Player::One)?,
                    b'O' => board.play(column, Player::Two)?,
                    _ => break,
                };
            }
        }
        Ok(board)
    }

    #[test]
    pub fn vertical_four_in_centre() -> Result<()> {
        let mut board = Board::new();
        for drop in 1..=4 {
            board.play(3, Player::One)?;
            assert_eq!(is_winner(&board, Player::One), drop == 4);
        }

        assert!(is_game_over(&board));
        assert_eq!(game_state(&board), GameState::PlayerOneWin);
        // +1000 for the four, +5 and +2 for the open lines above it
        assert_eq!(evaluate(&board, Player::One), 1007);
        assert_eq!(evaluate(&board, Player::Two), -4);
        Ok(())
    }

    #[test]
    pub fn make_move_copies_the_board() -> Result<()> {
        let board = Board::new();
        let next = board.make_move(2, Player::Two)?;

        assert_eq!(board, Board::new());
        assert_eq!(next.get(HEIGHT - 1, 2), Cell::PlayerTwo);
        assert_eq!(next.column_height(2), 1);
        assert_eq!(next.num_moves(), 1);
        Ok(())
    }

    #[test]
    pub fn invalid_moves_are_reported() -> Result<()> {
        let mut board = Board::new();
        for i in 0..HEIGHT {
            assert!(board.is_valid_move(0));
            let row = board.play(0, if i % 2 == 0 { Player::One } else { Player::Two })?;
            assert_eq!(row, HEIGHT - 1 - i);
        }

        assert!(!board.is_valid_move(0));
        assert!(!board.is_valid_move(WIDTH));
        assert_eq!(
            board.make_move(0, Player::One),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(
            board.play(WIDTH, Player::One),
            Err(MoveError::ColumnOutOfRange { column: WIDTH })
        );
        assert_eq!(board.num_moves(), HEIGHT);
        Ok(())
    }

    #[test]
    pub fn parse_moves() -> Result<()> {
        let (board, player) = Board::from_moves("11223")?;
        assert_eq!(player, Player::Two);
        assert_eq!(board.get(HEIGHT - 1, 0), Cell::PlayerOne);
        assert_eq!(board.get(HEIGHT - 2, 0), Cell::PlayerTwo);
        assert_eq!(board.get(HEIGHT - 1, 2), Cell::PlayerOne);

        // player one completes column 1 on the 7th move
        let (board, _) = Board::from_moves("1212121")?;
        assert!(is_winner(&board, Player::One));

        assert!(Board::from_moves("12121212").is_err());
        assert!(Board::from_moves("1111111").is_err());
        assert!(Board::from_moves("8").is_err());
        assert!(Board::from_moves("0").is_err());
        assert!(Board::from_moves("4x").is_err());
        Ok(())
    }

    #[test]
    pub fn gravity_invariant() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x0c4);
        for _ in 0..200 {
            let mut board = Board::new();
            let mut player = Player::One;
            while !board.is_full() {
                let legal: Vec<usize> = board.legal_moves().collect();
                board.play(legal[rng.gen_range(0..legal.len())], player)?;
                player = -player;
                assert!(has_gravity(&board));
            }
            assert_eq!(board.num_moves(), WIDTH * HEIGHT);
            assert!(board.legal_moves().next().is_none());
        }
        Ok(())
    }

    #[test]
    pub fn evaluation_symmetry() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..500 {
            let max_moves = rng.gen_range(0..=WIDTH * HEIGHT);
            let (board, _) = random_position(&mut rng, max_moves);
            for &player in [Player::One, Player::Two].iter() {
                assert_eq!(
                    evaluate(&board, player),
                    evaluate(&board.flipped(), -player)
                );
            }
        }
    }

    #[test]
    pub fn terminal_consistency() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let max_moves = rng.gen_range(0..=WIDTH * HEIGHT);
            let (board, _) = random_position(&mut rng, max_moves);

            let one = is_winner(&board, Player::One);
            let two = is_winner(&board, Player::Two);
            assert_eq!(one, has_run_of_four(&board, Player::One));
            assert_eq!(two, has_run_of_four(&board, Player::Two));
            assert_eq!(is_game_over(&board), one || two || board.is_full());

            let expected = match (one, two, board.is_full()) {
                (true, _, _) => GameState::PlayerOneWin,
                (false, true, _) => GameState::PlayerTwoWin,
                (false, false, true) => GameState::Draw,
                (false, false, false) => GameState::Playing,
            };
            assert_eq!(game_state(&board), expected);
        }
    }

    #[test]
    pub fn alpha_beta_matches_full_width() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..25 {
            let max_moves = rng.gen_range(0..30);
            let (board, player) = random_position(&mut rng, max_moves);
            for depth in 0..=4 {
                let mut solver = Solver::new(board, player, depth);
                let pruned = solver.negamax(&board, depth, player, -INFINITY, INFINITY);
                assert_eq!(pruned, full_width_negamax(&board, depth, player));
            }
        }
    }

    #[test]
    pub fn pruning_saves_work() {
        let (board, player) = (Board::new(), Player::One);
        let mut solver = Solver::new(board, player, 4);
        solver.negamax(&board, 4, player, -INFINITY, INFINITY);

        // a full-width 4-ply tree from the empty board has 1 + 7 + 49 + 343 + 2401 nodes
        assert!(solver.node_count < 2801);
    }

    #[test]
    pub fn player_two_blocks_bottom_row() -> Result<()> {
        let (board, player) = Board::from_moves("11223")?;
        assert_eq!(player, Player::Two);

        let mut solver = Solver::new(board, player, 1);
        assert_eq!(
            solver.column_scores(),
            [Some(-7), Some(-7), Some(-3), Some(0), Some(-5), Some(-7), Some(-7)]
        );
        assert_eq!(solver.find_best_move(), Some(3));
        assert_eq!(find_best_move(&board, player, 3), Some(3));
        Ok(())
    }

    #[test]
    pub fn player_one_blocks_bottom_row() -> Result<()> {
        let (board, player) = Board::from_moves("716273")?;
        assert_eq!(player, Player::One);

        assert_eq!(find_best_move(&board, player, 2), Some(3));
        assert_eq!(find_best_move(&board, player, 4), Some(3));
        Ok(())
    }

    #[test]
    pub fn ties_go_to_lowest_column() -> Result<()> {
        // a mirror-symmetric position: the centre column filled alternately
        let mut board = Board::new();
        for i in 0..HEIGHT {
            board.play(3, if i % 2 == 0 { Player::One } else { Player::Two })?;
        }
        assert!(!is_game_over(&board));

        let mut solver = Solver::new(board, Player::One, 4);
        let scores = solver.column_scores();
        assert_eq!(
            scores,
            [Some(2), Some(4), Some(6), None, Some(6), Some(4), Some(2)]
        );
        assert_eq!(solver.find_best_move(), Some(2));

        let mut solver = Solver::new(board, Player::One, 2);
        assert_eq!(
            solver.column_scores(),
            [Some(0), Some(2), Some(2), None, Some(2), Some(2), Some(0)]
        );
        assert_eq!(solver.find_best_move(), Some(1));
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() -> Result<()> {
        let board = board_from_rows([
            "XXXOXXX", "XXXOXXX", "OOOXOOO", "OOOXOOO", "XXXOXXX", "XXXOXXX",
        ])?;

        assert!(board.is_full());
        assert!(!is_winner(&board, Player::One));
        assert!(!is_winner(&board, Player::Two));
        assert!(is_game_over(&board));
        assert_eq!(game_state(&board), GameState::Draw);

        let mut solver = Solver::new(board, Player::One, 3);
        assert_eq!(solver.column_scores(), [None; WIDTH]);
        assert_eq!(solver.find_best_move(), None);
        assert_eq!(solver.find_best_move_parallel(), None);
        // the position is terminal, so the search only evaluates it
        assert_eq!(solver.negamax(&board, 3, Player::One, -INFINITY, INFINITY), 0);
        Ok(())
    }

    #[test]
    pub fn terminal_leaf_scores() -> Result<()> {
        let (board, _) = Board::from_moves("1212121")?;
        let mut solver = Solver::new(board, Player::One, 4);

        // game over: no look-ahead, whatever the depth
        for depth in 0..4 {
            assert_eq!(
                solver.negamax(&board, depth, Player::One, -INFINITY, INFINITY),
                evaluate(&board, Player::One)
            );
            assert_eq!(
                solver.negamax(&board, depth, Player::Two, -INFINITY, INFINITY),
                -evaluate(&board, Player::Two)
            );
        }
        Ok(())
    }

    #[test]
    pub fn depth_zero_still_moves() -> Result<()> {
        let (board, player) = Board::from_moves("11223")?;

        let mut solver = Solver::new(board, player, 0);
        assert_eq!(solver.negamax(&board, 0, player, -INFINITY, INFINITY), -evaluate(&board, player));
        assert_eq!(solver.find_best_move(), find_best_move(&board, player, 1));
        Ok(())
    }

    #[test]
    pub fn parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..20 {
            let max_moves = rng.gen_range(0..20);
            let (board, player) = random_position(&mut rng, max_moves);

            let mut sequential = Solver::new(board, player, 3);
            let mut parallel = Solver::new(board, player, 3);
            assert_eq!(sequential.find_best_move(), parallel.find_best_move_parallel());
            assert_eq!(sequential.node_count, parallel.node_count);
        }
    }

    #[test]
    pub fn search_follows_config() -> Result<()> {
        let (board, player) = Board::from_moves("4453")?;
        let expected = find_best_move(&board, player, 3);

        for &parallel in [false, true].iter() {
            let config = SearchConfig {
                depth: 3,
                parallel,
                verbose: false,
            };
            let mut solver = Solver::with_config(board, player, config);
            assert_eq!(solver.depth(), 3);
            assert_eq!(solver.board(), &board);
            assert_eq!(solver.search(), expected);
        }
        Ok(())
    }
}
