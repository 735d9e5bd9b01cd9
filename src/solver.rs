//! An agent to choose moves in Connect 4

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Player},
    config::SearchConfig,
    eval::evaluate,
    rules::is_game_over,
    WIDTH,
};

/// Score bound larger than any reachable position score; safe to negate
pub const INFINITY: i32 = i32::MAX;

/// Picks the lowest column holding the strictly greatest score
fn best_column(scores: &[Option<i32>; WIDTH]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (column, score) in scores.iter().enumerate() {
        if let Some(score) = *score {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }
    }
    best.map(|(column, _)| column)
}

/// An agent to choose moves with a fixed-depth game tree search
///
/// # Notes
/// The search is a negamax with alpha-beta pruning. Leaves are reached at the
/// configured depth or when the game is over, and are scored with the window
/// heuristic in [`evaluate`].
///
/// # Position Scoring
/// A search score is relative to the player to move at the node that
/// produced it: larger is better for that player, and a score is negated
/// each time it is passed up one ply. A leaf reached with `player` to move
/// is worth `player.sign() * evaluate(board, player)`.
#[derive(Clone)]
pub struct Solver {
    board: Board,
    player: Player,
    config: SearchConfig,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` choosing a move for `player` on `board`
    pub fn new(board: Board, player: Player, depth: usize) -> Self {
        Self::with_config(board, player, SearchConfig::default().with_depth(depth))
    }

    /// Creates a new `Solver` with the given search settings
    pub fn with_config(board: Board, player: Player, config: SearchConfig) -> Self {
        Self {
            board,
            player,
            config,
            node_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    /// Performs game tree search from `board` with `player` to move
    ///
    /// Returns the score of the position for `player` (see [Position Scoring]),
    /// or `-INFINITY` if `board` has no legal move and is not yet terminal.
    ///
    /// [Position Scoring]: #position-scoring
    pub fn negamax(
        &mut self,
        board: &Board,
        depth: usize,
        player: Player,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.node_count += 1;

        if depth == 0 || is_game_over(board) {
            return player.sign() * evaluate(board, player);
        }

        let mut max_value = -INFINITY;
        for column in 0..WIDTH {
            // every child searches its own copy of the board
            let next = match board.make_move(column, player) {
                Ok(next) => next,
                Err(_) => continue,
            };
            // the search window is flipped for the other player
            let score = -self.negamax(&next, depth - 1, -player, -beta, -alpha);
            if score > max_value {
                max_value = score;
            }
            alpha = alpha.max(score);
            // the opponent will never allow this line, skip the remaining siblings
            if alpha >= beta {
                break;
            }
        }
        max_value
    }

    /// Scores playing `column`, or `None` if the column is full
    ///
    /// Every top-level move is searched with a full window.
    fn score_column(&mut self, column: usize) -> Option<i32> {
        let next = self.board.make_move(column, self.player).ok()?;
        // a depth of 0 still looks at the positions after each move
        let depth = self.config.depth.saturating_sub(1);
        Some(-self.negamax(&next, depth, -self.player, -INFINITY, INFINITY))
    }

    /// Scores every column for the player to move, `None` for full columns
    pub fn column_scores(&mut self) -> [Option<i32>; WIDTH] {
        let mut scores = [None; WIDTH];
        for (column, score) in scores.iter_mut().enumerate() {
            *score = self.score_column(column);
        }
        scores
    }

    /// Calculates the best move, or `None` if the board is full
    ///
    /// Ties go to the lowest column.
    pub fn find_best_move(&mut self) -> Option<usize> {
        self._find_best_move(true)
    }

    /// Calculates the best move, logging progress and column scores to stdout
    pub fn find_best_move_verbose(&mut self) -> Option<usize> {
        self._find_best_move(false)
    }

    fn _find_best_move(&mut self, silent: bool) -> Option<usize> {
        if silent {
            let scores = self.column_scores();
            return best_column(&scores);
        }

        let start = Instant::now();
        let progress = ProgressBar::new(WIDTH as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Searching {msg}: {bar:40.cyan/blue} {pos}/{len} columns")
                .progress_chars("█▓▒░  "),
        );
        progress.set_message(&format!("depth {}", self.config.depth));

        let mut scores = [None; WIDTH];
        for (column, score) in scores.iter_mut().enumerate() {
            *score = self.score_column(column);
            progress.inc(1);
        }
        progress.finish_and_clear();

        self.report(&scores, start.elapsed());
        best_column(&scores)
    }

    /// Calculates the best move with the top-level columns searched in parallel
    ///
    /// Returns the same move as [`Solver::find_best_move`]: the top-level
    /// moves never share a search window, so splitting them loses no pruning.
    pub fn find_best_move_parallel(&mut self) -> Option<usize> {
        self._find_best_move_parallel(true)
    }

    fn _find_best_move_parallel(&mut self, silent: bool) -> Option<usize> {
        let start = Instant::now();
        let (board, player, config) = (self.board, self.player, self.config);

        let results: Vec<(Option<i32>, usize)> = (0..WIDTH)
            .into_par_iter()
            .map(|column| {
                let mut worker = Solver::with_config(board, player, config);
                let score = worker.score_column(column);
                (score, worker.node_count)
            })
            .collect();

        let mut scores = [None; WIDTH];
        for (column, (score, node_count)) in results.into_iter().enumerate() {
            scores[column] = score;
            self.node_count += node_count;
        }

        if !silent {
            self.report(&scores, start.elapsed());
        }
        best_column(&scores)
    }

    /// Calculates the best move as directed by the solver's [`SearchConfig`]
    pub fn search(&mut self) -> Option<usize> {
        match (self.config.parallel, self.config.verbose) {
            (true, verbose) => self._find_best_move_parallel(!verbose),
            (false, verbose) => self._find_best_move(!verbose),
        }
    }

    fn report(&self, scores: &[Option<i32>; WIDTH], elapsed: Duration) {
        let columns: Vec<String> = scores
            .iter()
            .map(|score| match score {
                Some(score) => score.to_string(),
                None => "-".to_string(),
            })
            .collect();
        println!("Column scores: [{}]", columns.join(", "));
        println!(
            "Searched {} positions in {:.3}ms, kpos/s: {:.1}",
            self.node_count,
            elapsed.as_secs_f64() * 1000.0,
            self.node_count as f64 / (1000.0 * elapsed.as_secs_f64().max(f64::EPSILON))
        );
    }
}

/// Chooses a move for `player` on `board` with a `depth`-ply search
///
/// Returns `None` if no column is playable.
pub fn find_best_move(board: &Board, player: Player, depth: usize) -> Option<usize> {
    Solver::new(*board, player, depth).find_best_move()
}
