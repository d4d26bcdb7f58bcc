use crate::board::{line_clear_points, Board};
use crate::controller::{Controller, DropResult, LockOutcome};
use crate::generator::PieceGenerator;
use crate::input::Input;
use crate::piece::{Piece, Point};
use crate::settings::GameSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Source of tick callbacks. The session keeps at most one request
/// outstanding and cancels it when play stops.
pub trait Scheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn frame_fired(&mut self, _handle: FrameHandle) {}
}

/// Bookkeeping scheduler for hosts that drive ticks themselves (the wasm
/// client's animation loop, the replay binary, tests).
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u32,
    outstanding: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn is_pending(&self) -> bool {
        !self.outstanding.is_empty()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

impl Scheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.outstanding.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.outstanding.retain(|h| *h != handle);
    }

    fn frame_fired(&mut self, handle: FrameHandle) {
        self.outstanding.retain(|h| *h != handle);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PieceLocked { lines: usize, points: u32 },
    GameOver { score: u32 },
}

pub struct Session<S: Scheduler = FrameQueue> {
    settings: GameSettings,
    board: Board,
    controller: Controller,
    score: u32,
    active: bool,
    game_over: bool,
    drop_accum: f64,
    last_time: Option<f64>,
    scheduler: S,
    pending_frame: Option<FrameHandle>,
    events: Vec<GameEvent>,
}

impl Session<FrameQueue> {
    pub fn with_settings(settings: GameSettings) -> Self {
        Self::new(settings, FrameQueue::default())
    }
}

impl<S: Scheduler> Session<S> {
    pub fn new(settings: GameSettings, scheduler: S) -> Self {
        let mut controller = Controller::new(PieceGenerator::new(&settings.randomizer));
        // "next" is displayable before the first start
        controller.ensure_pending();
        Self {
            board: Board::new(settings.columns, settings.rows),
            controller,
            score: 0,
            active: false,
            game_over: false,
            drop_accum: 0.0,
            last_time: None,
            scheduler,
            pending_frame: None,
            events: Vec::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.controller.active()
    }

    pub fn position(&self) -> Point {
        self.controller.position()
    }

    pub fn pending_piece(&self) -> Option<&Piece> {
        self.controller.pending()
    }

    pub fn ghost_position(&self) -> Option<Point> {
        self.controller.landing_position(&self.board)
    }

    pub fn drop_accumulator(&self) -> f64 {
        self.drop_accum
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Removes a queued game-over and returns its final score; other events
    /// stay queued.
    pub fn take_game_over(&mut self) -> Option<u32> {
        let idx = self
            .events
            .iter()
            .position(|e| matches!(e, GameEvent::GameOver { .. }))?;
        match self.events.remove(idx) {
            GameEvent::GameOver { score } => Some(score),
            GameEvent::PieceLocked { .. } => None,
        }
    }

    /// Resets board and score and spawns the first piece. Any stale frame
    /// request is cancelled before a new one is made.
    pub fn start(&mut self, now: f64) {
        self.cancel_frame();
        self.board.clear();
        self.score = 0;
        self.active = true;
        self.game_over = false;
        self.controller.ensure_pending();
        self.drop_accum = 0.0;
        self.last_time = Some(now);
        crate::log("session started");
        if !self.controller.spawn(&self.board) {
            self.end_game();
            return;
        }
        self.request_frame();
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.controller.discard_active();
        self.cancel_frame();
    }

    /// Gravity step driven by the frame callback. Returns true when the
    /// board or piece changed.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.active {
            return false;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.frame_fired(handle);
        }
        // the first tick after a start without a timestamp only sets the baseline
        let elapsed = self.last_time.map_or(0.0, |last| (now - last).max(0.0));
        self.last_time = Some(now);
        self.drop_accum += elapsed;

        let mut changed = false;
        if self.drop_accum > self.settings.drop_interval_ms {
            if let DropResult::Locked(outcome) = self.controller.soft_drop(&mut self.board) {
                self.after_lock(outcome);
            }
            self.drop_accum = 0.0;
            changed = true;
        }
        if self.active {
            self.request_frame();
        }
        changed
    }

    /// Applies one player command. Start is honoured only while stopped,
    /// everything else only while playing.
    pub fn handle_input(&mut self, input: Input) -> bool {
        match input {
            Input::Start => {
                if self.active {
                    return false;
                }
                self.start(0.0);
                self.last_time = None;
                true
            }
            _ if !self.active => false,
            Input::MoveLeft => self.controller.shift(&self.board, -1),
            Input::MoveRight => self.controller.shift(&self.board, 1),
            Input::Rotate => self.controller.rotate(&self.board),
            Input::SoftDrop => {
                if let DropResult::Locked(outcome) = self.controller.soft_drop(&mut self.board) {
                    self.after_lock(outcome);
                }
                self.drop_accum = 0.0;
                true
            }
            Input::HardDrop => {
                if let Some(outcome) = self.controller.hard_drop(&mut self.board) {
                    self.after_lock(outcome);
                }
                self.drop_accum = 0.0;
                true
            }
        }
    }

    fn after_lock(&mut self, outcome: LockOutcome) {
        let points = line_clear_points(outcome.lines);
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::PieceLocked {
            lines: outcome.lines,
            points,
        });
        if outcome.topped_out {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.active = false;
        self.game_over = true;
        self.controller.discard_active();
        self.cancel_frame();
        self.events.push(GameEvent::GameOver { score: self.score });
        crate::log(&format!("game over, score {}", self.score));
    }

    fn request_frame(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }
}
