use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use web_time::Instant;

use crate::*;

/// One game from the first click to a terminal status.
///
/// A session owns its field, move source, random source and mine generator, so independent sessions can run on
/// separate threads as long as `S` and `R` are `Send`.
pub struct GameSession<S = InferenceEngine, R = SmallRng> {
    field: MineField,
    source: S,
    rng: R,
    generator: Box<dyn MinefieldGenerator + Send>,
    history: Vec<Move>,
    elapsed: Duration,
}

impl GameSession {
    /// Solver game with random mines, fully determined by `seed`.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_parts(
            config,
            InferenceEngine::new(),
            SmallRng::seed_from_u64(seed),
            RandomMinefieldGenerator,
        )
    }

    #[cfg(feature = "os_rng")]
    pub fn from_entropy(config: GameConfig) -> Result<Self> {
        Self::with_parts(
            config,
            InferenceEngine::new(),
            SmallRng::from_os_rng(),
            RandomMinefieldGenerator,
        )
    }
}

impl GameSession<Replay> {
    /// Rebuilds a recorded game: same board, same mines, same moves.
    pub fn replay(summary: &GameSummary) -> Result<Self> {
        Self::with_parts(
            summary.config,
            Replay::new(summary.moves.iter().copied()),
            SmallRng::seed_from_u64(0),
            PresetMinefieldGenerator::new(summary.mine_indexes.iter().copied()),
        )
    }
}

impl<S: MoveSource, R: RngCore> GameSession<S, R> {
    pub fn with_parts(
        config: GameConfig,
        source: S,
        rng: R,
        generator: impl MinefieldGenerator + Send + 'static,
    ) -> Result<Self> {
        Ok(Self {
            field: MineField::new(config)?,
            source,
            rng,
            generator: Box::new(generator),
            history: Vec::new(),
            elapsed: Duration::ZERO,
        })
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn status(&self) -> GameStatus {
        self.field.status()
    }

    /// Every move applied so far, first click included.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Places the mines around the source's first move and applies it.
    ///
    /// On error nothing has been placed or applied.
    pub fn start(&mut self, observer: &mut dyn GameObserver) -> Result<()> {
        assert_eq!(
            self.field.status(),
            GameStatus::NotStarted,
            "session already started"
        );
        let started = Instant::now();

        let first = self.source.first_move(&self.field)?;
        self.field
            .place_mines(first.index, self.generator.as_mut(), &mut self.rng)?;
        self.apply(first, observer);

        self.elapsed += started.elapsed();
        Ok(())
    }

    /// Plays a single move, starting the game first if needed.
    pub fn step(&mut self, observer: &mut dyn GameObserver) -> Result<GameStatus> {
        match self.field.status() {
            GameStatus::NotStarted => self.start(observer)?,
            GameStatus::InProgress => {
                let started = Instant::now();
                let mv = self.source.next_move(&self.field, &mut self.rng)?;
                if !mv.is_applicable(&self.field) {
                    return Err(GameError::IllegalMove { index: mv.index });
                }
                self.apply(mv, observer);
                self.elapsed += started.elapsed();
            }
            GameStatus::Won | GameStatus::Lost => return Err(GameError::AlreadyEnded),
        }
        Ok(self.field.status())
    }

    /// Steps until the game is won or lost.
    pub fn run(&mut self, observer: &mut dyn GameObserver) -> Result<GameSummary> {
        while !self.field.is_finished() {
            self.step(observer)?;
        }
        log::debug!(
            "Session finished {:?}: {} steps, {} guesses, {:?}",
            self.field.status(),
            self.field.steps(),
            self.field.guesses(),
            self.elapsed
        );
        Ok(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            config: self.field.config(),
            status: self.field.status(),
            cells_revealed: self.field.revealed_count(),
            flags_placed: self.field.flagged_count(),
            total_steps: self.field.steps(),
            guess_count: self.field.guesses(),
            elapsed: self.elapsed,
            mine_indexes: self.field.mine_indexes().to_vec(),
            moves: self.history.clone(),
        }
    }

    fn apply(&mut self, mv: Move, observer: &mut dyn GameObserver) {
        observer.on_move(mv);
        self.field.apply(mv);
        self.history.push(mv);
        for event in self.field.take_events() {
            observer.notify(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use hashbrown::HashSet;

    use super::*;

    /// Summaries of the same game differ only in timing.
    fn without_timing(mut summary: GameSummary) -> GameSummary {
        summary.elapsed = Duration::ZERO;
        summary
    }

    /// Counts moves and fails on any cell that leaves `Hidden` twice.
    #[derive(Default)]
    struct PlayTracker {
        moves: usize,
        guesses: usize,
        opened: HashSet<CellIndex>,
    }

    impl GameObserver for PlayTracker {
        fn on_move(&mut self, mv: Move) {
            self.moves += 1;
            if mv.is_guess() {
                self.guesses += 1;
            }
        }

        fn on_reveal(&mut self, index: CellIndex, _count: u8) {
            assert!(self.opened.insert(index), "cell {index} revealed twice");
        }

        fn on_flag(&mut self, index: CellIndex) {
            assert!(self.opened.insert(index), "cell {index} flagged after leaving hidden");
        }
    }

    fn assert_field_invariants(field: &MineField, ever_open: &mut [bool]) {
        let geometry = field.geometry();
        for index in 0..geometry.total_cells() {
            let neighbors = geometry.neighbors(index);
            let unknown = usize::from(field.unknown_around(index));
            let flags = usize::from(field.flags_around(index));
            assert!(unknown + flags <= neighbors.len(), "neighbor counters at {index}");
            // the detonation sweep marks mines without touching the counters
            if field.status() != GameStatus::Lost {
                let hidden = neighbors
                    .iter()
                    .filter(|&&neighbor| field.view_at(neighbor).is_hidden())
                    .count();
                assert_eq!(unknown, hidden, "hidden neighbors of {index}");
            }

            if field.view_at(index).is_hidden() {
                assert!(!ever_open[index], "cell {index} went back to hidden");
            } else {
                ever_open[index] = true;
            }
        }
    }

    #[test]
    fn empty_board_is_won_by_the_first_click() {
        let mut session = GameSession::seeded(GameConfig::new((3, 3), 0), 1).unwrap();

        let summary = session.run(&mut ()).unwrap();

        assert_eq!(summary.status, GameStatus::Won);
        assert_eq!(summary.cells_revealed, 9);
        assert_eq!(summary.flags_placed, 0);
        assert_eq!(summary.moves, vec![Move::reveal(4)]);
        assert!(summary.won_without_guessing());
    }

    #[test]
    fn corner_mine_is_flagged_not_opened() {
        let mut session = GameSession::with_parts(
            GameConfig::new((4, 4), 1),
            InferenceEngine::new(),
            SmallRng::seed_from_u64(3),
            PresetMinefieldGenerator::new([0]),
        )
        .unwrap();
        let mut events: Vec<FieldEvent> = Vec::new();

        let summary = session.run(&mut events).unwrap();

        assert_eq!(summary.status, GameStatus::Won);
        assert_eq!(summary.mine_indexes, vec![0]);
        assert_eq!(session.field().view_at(0), ViewState::Flagged);
        assert!(
            events
                .iter()
                .all(|event| !matches!(event, FieldEvent::Revealed { index: 0, .. }))
        );
        assert_eq!(events.last(), Some(&FieldEvent::Won));
    }

    #[test]
    fn seeded_games_always_terminate() {
        for seed in 0..6 {
            let mut session = GameSession::seeded(GameConfig::intermediate(), seed).unwrap();
            let mut counter = PlayTracker::default();
            let mut ever_open = vec![false; GameConfig::intermediate().total_cells().into()];

            while !session.field().is_finished() {
                session.step(&mut counter).unwrap();
                assert_field_invariants(session.field(), &mut ever_open);
            }
            let summary = session.run(&mut counter).unwrap();

            assert!(summary.status.is_finished(), "seed {seed}");
            assert_eq!(summary.total_steps as usize, summary.moves.len());
            assert_eq!(counter.moves, summary.moves.len());
            assert_eq!(counter.guesses, summary.guess_count as usize);
            assert!(summary.progress() <= GameConfig::intermediate().total_cells());
            assert_eq!(summary.mine_indexes.len(), 40);
            if summary.status == GameStatus::Won {
                assert_eq!(summary.progress(), GameConfig::intermediate().total_cells());
                assert_eq!(summary.flags_placed, 40);
            }
            assert_eq!(summary.moves[0], Move::reveal(8 + 16 * 8));
        }
    }

    #[test]
    fn same_seed_plays_the_same_game() {
        let play = |seed| {
            let mut session = GameSession::seeded(GameConfig::beginner(), seed).unwrap();
            without_timing(session.run(&mut ()).unwrap())
        };

        assert_eq!(play(11), play(11));
    }

    #[test]
    fn oversized_mine_count_fails_before_any_move() {
        let mut session = GameSession::seeded(GameConfig::new((3, 3), 1), 0).unwrap();
        let mut events: Vec<FieldEvent> = Vec::new();

        let result = session.step(&mut events);

        assert_eq!(
            result,
            Err(GameError::InitMineMap {
                mines: 1,
                available: 0
            })
        );
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert!(session.history().is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn finished_session_rejects_further_steps() {
        let mut session = GameSession::seeded(GameConfig::new((3, 3), 0), 0).unwrap();
        session.run(&mut ()).unwrap();

        assert_eq!(session.step(&mut ()), Err(GameError::AlreadyEnded));
        assert_eq!(session.run(&mut ()).map(|s| s.status), Ok(GameStatus::Won));
    }

    #[test]
    fn replay_reproduces_a_recorded_game() {
        for seed in [2, 5] {
            let mut session = GameSession::seeded(GameConfig::intermediate(), seed).unwrap();
            let recorded = session.run(&mut ()).unwrap();

            let json = recorded.to_json().unwrap();
            let loaded = GameSummary::from_json(&json).unwrap();
            let mut replay = GameSession::replay(&loaded).unwrap();
            let replayed = replay.run(&mut ()).unwrap();

            assert_eq!(without_timing(replayed), without_timing(recorded));
            assert_eq!(replay.source().remaining(), 0);
        }
    }

    #[test]
    fn truncated_recording_runs_out() {
        let mut session = GameSession::seeded(GameConfig::intermediate(), 4).unwrap();
        let mut recorded = session.run(&mut ()).unwrap();
        assert!(recorded.moves.len() > 1);
        recorded.moves.truncate(1);

        let mut replay = GameSession::replay(&recorded).unwrap();

        assert_eq!(replay.run(&mut ()), Err(GameError::ReplayExhausted));
        assert_eq!(replay.history().len(), 1);
        assert_eq!(replay.status(), GameStatus::InProgress);
    }

    #[test]
    fn step_reports_progress() {
        let mut session = GameSession::seeded(GameConfig::beginner(), 8).unwrap();

        assert_eq!(session.status(), GameStatus::NotStarted);
        let status = session.step(&mut ()).unwrap();

        assert_eq!(status, session.status());
        assert_ne!(status, GameStatus::NotStarted);
        assert_eq!(session.history(), &[Move::reveal(4 + 9 * 4)]);
        assert!(session.field().revealed_count() > 0);
    }

    #[test]
    fn seeded_games_keep_the_first_click_safe_everywhere() {
        for (config, seed) in [
            (GameConfig::new((4, 4), 7), 0),
            (GameConfig::new((5, 1), 2), 1),
            (GameConfig::new((2, 9), 12), 2),
        ] {
            let mut session = GameSession::seeded(config, seed).unwrap();

            session.step(&mut ()).unwrap();

            let field = session.field();
            let first = session.history()[0].index;
            let safe_region = field.geometry().safe_region(first);
            assert_eq!(
                field.mine_indexes().len() + safe_region.len(),
                usize::from(config.total_cells()),
                "{config:?}"
            );
            assert!(
                field
                    .mine_indexes()
                    .iter()
                    .all(|mine| !safe_region.contains(mine))
            );
        }
    }

    #[cfg(feature = "os_rng")]
    #[test]
    fn entropy_seeded_sessions_finish() {
        let mut session = GameSession::from_entropy(GameConfig::beginner()).unwrap();

        assert!(session.run(&mut ()).unwrap().status.is_finished());
    }

    #[test]
    fn sessions_can_move_across_threads() {
        fn assert_send<T: Send>() {}

        assert_send::<GameSession>();
        assert_send::<GameSession<Replay>>();
    }
}
