/// The search depth used when none is given, in plies
pub const DEFAULT_DEPTH: usize = 4;

/// Settings for a move search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchConfig {
    /// Number of plies searched, including the move being chosen
    pub depth: usize,
    /// Split the top-level columns across worker threads
    pub parallel: bool,
    /// Report progress and per-column scores to stdout
    pub verbose: bool,
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel: false,
            verbose: false,
        }
    }
}
