//! Core game session: spawning, locking, holding and the per-tick update

use crate::controls::{AutoRepeat, TickInput};
use crate::field::Field;
use crate::hold::HoldSlot;
use crate::piece::Piece;
use crate::queue::PieceQueue;
use crate::score::Score;
use crate::sink::{NullSink, PieceRole, RenderSink};
use crate::tetromino::{Point, RotationDirection, TetrominoType};
use std::time::Duration;
use tracing::{debug, info};

/// Anchor cell every new piece spawns at
pub const SPAWN_POSITION: Point = (-1, 8);

/// Timing for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Time between gravity steps
    pub step_delay: Duration,
    /// Minimum rest before a grounded piece locks
    pub lock_delay: Duration,
    /// Time after game over before restart is accepted
    pub restart_cooldown: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_secs(1),
            lock_delay: Duration::from_millis(500),
            restart_cooldown: Duration::from_secs(1),
        }
    }
}

/// Tiles last handed to the sink for one role
type Tiles = Option<(TetrominoType, [Point; 4])>;

fn role_slot(role: PieceRole) -> usize {
    match role {
        PieceRole::Active => 0,
        PieceRole::Next => 1,
        PieceRole::Hold => 2,
    }
}

/// The game session
pub struct Game<S: RenderSink = NullSink> {
    /// Locked blocks
    field: Field,
    /// Current falling piece, `None` once the game is over
    current_piece: Option<Piece>,
    /// Upcoming pieces
    queue: PieceQueue,
    /// Held piece and its once-per-cycle flag
    hold: HoldSlot,
    score: Score,
    game_over: bool,
    /// Time spent in the game-over state
    since_game_over: Duration,
    config: GameConfig,
    sink: S,
    /// What the sink currently shows, per role
    painted: [Tiles; 3],
}

impl<S: RenderSink> Game<S> {
    /// Create a new game with a random piece sequence
    pub fn new(config: GameConfig, sink: S) -> Self {
        Self::with_seed(config, rand::random(), sink)
    }

    /// Create a new game with a fixed piece sequence
    pub fn with_seed(config: GameConfig, seed: u64, sink: S) -> Self {
        let mut game = Self {
            field: Field::new(),
            current_piece: None,
            queue: PieceQueue::with_seed(seed),
            hold: HoldSlot::new(),
            score: Score::new(),
            game_over: false,
            since_game_over: Duration::ZERO,
            config,
            sink,
            painted: [None; 3],
        };
        info!(seed, "Starting game");
        game.spawn_next();
        game
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    /// Where the current piece would land (ghost piece)
    pub fn ghost_cells(&self) -> Option<[Point; 4]> {
        self.current_piece
            .as_ref()
            .map(|piece| piece.landing_cells(&self.field))
    }

    /// The piece that spawns next
    pub fn next_piece(&self) -> Option<TetrominoType> {
        self.queue.front()
    }

    /// All queued pieces, next first
    pub fn preview(&self) -> impl Iterator<Item = TetrominoType> + '_ {
        self.queue.iter()
    }

    pub fn hold_piece(&self) -> Option<TetrominoType> {
        self.hold.piece()
    }

    pub fn can_hold(&self) -> bool {
        !self.game_over && self.hold.can_swap()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether a restart would be accepted now
    pub fn restart_ready(&self) -> bool {
        self.game_over && self.since_game_over >= self.config.restart_cooldown
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Advance the session by one frame.
    ///
    /// Player actions are applied first (hold, rotation, horizontal shift,
    /// soft drop, hard drop), then gravity and the lock check.
    pub fn tick(&mut self, dt: Duration, input: &TickInput, repeat: &mut AutoRepeat) {
        if self.game_over {
            self.since_game_over += dt;
            repeat.clear();
            if input.restart {
                self.restart();
            }
            return;
        }

        if input.hold {
            self.hold();
        }

        if let Some(piece) = &mut self.current_piece {
            piece.advance(dt);
        }

        if input.rotate_ccw {
            self.rotate(RotationDirection::CounterClockwise);
        } else if input.rotate_cw {
            self.rotate(RotationDirection::Clockwise);
        }

        if let Some(shift) = repeat.update(input.shift, dt) {
            self.move_piece(shift.dx(), 0);
        }

        if input.soft_drop {
            self.soft_drop();
        }

        if input.hard_drop {
            self.hard_drop();
        }

        self.apply_gravity();
        self.sync_display();
    }

    /// Advance timers and run gravity without any player input.
    /// After game over only the restart cooldown advances.
    pub fn step(&mut self, dt: Duration) {
        if self.game_over {
            self.since_game_over += dt;
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            piece.advance(dt);
        }
        self.apply_gravity();
        self.sync_display();
    }

    /// Gravity step once the step delay has elapsed; a piece that has
    /// rested for the lock delay and still cannot fall is locked.
    fn apply_gravity(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        if !piece.step_due(self.config.step_delay) {
            return;
        }

        piece.reset_step();
        piece.try_move(0, -1, &self.field);
        let should_lock =
            piece.lock_time() >= self.config.lock_delay && !piece.can_move_down(&self.field);

        if should_lock {
            self.lock();
        }
    }

    /// Translate the current piece. Returns whether it moved.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        let moved = match &mut self.current_piece {
            Some(piece) => piece.try_move(dx, dy, &self.field),
            None => false,
        };
        self.sync_display();
        moved
    }

    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        let rotated = match &mut self.current_piece {
            Some(piece) => piece.rotate(direction, &self.field),
            None => false,
        };
        self.sync_display();
        rotated
    }

    /// Move down one row
    pub fn soft_drop(&mut self) -> bool {
        self.move_piece(0, -1)
    }

    /// Drop to the floor and lock immediately, skipping the lock delay
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            let distance = piece.hard_drop(&self.field);
            debug!(distance, "Hard drop");
        }
        self.lock();
    }

    /// Commit the current piece, clear rows, score, and spawn the next one
    pub fn lock(&mut self) {
        if self.game_over {
            return;
        }
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.field.commit(&piece.cells(), piece.piece_type);
        let cleared = self.field.clear_full_rows();
        let awarded = self.score.add_lock(cleared);
        debug!(
            piece = ?piece.piece_type,
            cleared,
            awarded,
            total = self.score.points,
            "Piece locked"
        );
        if awarded > 0 {
            self.sink.on_score_changed(self.score.points);
        }

        if !self.game_over {
            self.spawn_next();
        }
        self.sync_display();
    }

    /// Spawn the front of the queue. A blocked spawn ends the game.
    fn spawn_next(&mut self) {
        if self.game_over {
            self.field.clear();
            return;
        }

        let piece_type = self.queue.peek();
        let piece = Piece::spawn(piece_type, SPAWN_POSITION);
        if !self.field.can_place(&piece.cells()) {
            self.enter_game_over();
            return;
        }

        self.queue.pop();
        self.current_piece = Some(piece);
        self.hold.reset_cycle();
        self.sync_display();
    }

    /// Swap the current piece with the hold slot.
    ///
    /// With an empty slot the next queued piece spawns; otherwise the held
    /// piece restarts at the spawn anchor. Only one swap per drop cycle.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold() {
            return false;
        }
        let Some(active) = self.current_piece.take() else {
            return false;
        };

        match self.hold.swap(active.piece_type) {
            None => self.spawn_next(),
            Some(held) => {
                let piece = Piece::spawn(held, SPAWN_POSITION);
                if self.field.can_place(&piece.cells()) {
                    self.current_piece = Some(piece);
                } else {
                    self.enter_game_over();
                }
            }
        }
        self.hold.mark_used();
        debug!(held = ?active.piece_type, "Hold");

        self.sync_display();
        true
    }

    fn enter_game_over(&mut self) {
        self.game_over = true;
        self.since_game_over = Duration::ZERO;
        self.current_piece = None;
        self.field.clear();
        info!(
            score = self.score.points,
            lines = self.score.lines,
            pieces = self.score.pieces,
            "Game over"
        );
        self.sync_display();
        self.sink.on_game_over();
    }

    /// Start over once the game has ended and the cooldown has passed.
    /// Returns whether the restart happened.
    pub fn restart(&mut self) -> bool {
        if !self.restart_ready() {
            return false;
        }

        self.game_over = false;
        self.since_game_over = Duration::ZERO;
        self.score = Score::new();
        self.field.clear();
        self.hold.clear();
        info!("Restarting game");
        self.sink.on_score_changed(self.score.points);
        self.sink.on_restart();

        self.spawn_next();
        true
    }

    /// Bring the sink's active/next/hold tiles in line with the session
    fn sync_display(&mut self) {
        let (active, next, hold) = if self.game_over {
            (None, None, None)
        } else {
            (
                self.current_piece
                    .as_ref()
                    .map(|piece| (piece.piece_type, piece.cells())),
                self.queue.front().map(|t| (t, t.cells())),
                self.hold.piece().map(|t| (t, t.cells())),
            )
        };

        self.paint(PieceRole::Active, active);
        self.paint(PieceRole::Next, next);
        self.paint(PieceRole::Hold, hold);
    }

    fn paint(&mut self, role: PieceRole, tiles: Tiles) {
        let slot = role_slot(role);
        let previous = self.painted[slot];
        if previous == tiles {
            return;
        }

        if let Some((_, cells)) = previous {
            self.sink.clear_cells(role, &cells);
        }
        if let Some((piece, cells)) = tiles {
            self.sink.draw_cells(role, &cells, piece);
        }
        self.painted[slot] = tiles;
    }
}
