//! Frame clock: the per-frame scheduler.
//!
//! The host calls [`FrameClock::advance`] once for every displayed frame.
//! Each registered [`FrameTask`] runs once per advance, in registration
//! order, then yields back to the host until the next frame. A task keeps
//! running until its [`TaskHandle`] is cancelled.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! let handle = clock.schedule(Box::new(my_task));
//!
//! // In the redraw handler:
//! clock.advance(Instant::now(), theme, pointer, &mut draw_list);
//!
//! // Later, if the task should stop:
//! handle.cancel();
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::surface::Surface;
use crate::theme::Theme;

/// Everything a task sees during one frame.
pub struct Frame<'a> {
    /// Frames since the clock started, starting at 1.
    pub index: u64,
    /// Time since the previous frame.
    pub delta: Duration,
    /// Theme at the moment of drawing.
    pub theme: Theme,
    /// Latest pointer position in surface pixels.
    pub pointer: Vec2,
    /// Where to draw.
    pub surface: &'a mut dyn Surface,
}

/// Work that runs once per frame.
pub trait FrameTask {
    fn tick(&mut self, frame: &mut Frame<'_>);

    /// Short name for logs.
    fn name(&self) -> &'static str {
        "task"
    }
}

/// Cancels a scheduled task. Clones refer to the same task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    /// Stop the task. It will not tick again.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

struct Slot {
    handle: TaskHandle,
    task: Box<dyn FrameTask>,
}

/// Runs frame tasks and keeps frame timing.
pub struct FrameClock {
    slots: Vec<Slot>,
    next_id: u64,
    frame: u64,
    last_frame: Option<Instant>,
    fps: f32,
    fps_frames: u64,
    fps_since: Option<Instant>,
    fps_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
            frame: 0,
            last_frame: None,
            fps: 0.0,
            fps_frames: 0,
            fps_since: None,
            fps_interval: Duration::from_millis(500),
        }
    }

    /// Register a task to run on every following frame.
    pub fn schedule(&mut self, task: Box<dyn FrameTask>) -> TaskHandle {
        let handle = TaskHandle {
            id: self.next_id,
            cancelled: Rc::new(Cell::new(false)),
        };
        self.next_id += 1;
        tracing::debug!(task = task.name(), id = handle.id, "frame task scheduled");
        self.slots.push(Slot {
            handle: handle.clone(),
            task,
        });
        handle
    }

    /// Run one frame. Returns the number of tasks that ticked.
    pub fn advance(
        &mut self,
        now: Instant,
        theme: Theme,
        pointer: Vec2,
        surface: &mut dyn Surface,
    ) -> usize {
        self.slots.retain(|slot| {
            let keep = !slot.handle.is_cancelled();
            if !keep {
                tracing::debug!(task = slot.task.name(), id = slot.handle.id, "frame task cancelled");
            }
            keep
        });

        let delta = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        self.frame += 1;
        self.update_fps(now);

        let mut frame = Frame {
            index: self.frame,
            delta,
            theme,
            pointer,
            surface,
        };

        let mut ran = 0;
        for slot in &mut self.slots {
            // A task may cancel another mid-frame.
            if slot.handle.is_cancelled() {
                continue;
            }
            slot.task.tick(&mut frame);
            ran += 1;
        }
        ran
    }

    fn update_fps(&mut self, now: Instant) {
        let Some(since) = self.fps_since else {
            self.fps_since = Some(now);
            self.fps_frames = self.frame;
            return;
        };
        let elapsed = now.saturating_duration_since(since);
        if elapsed >= self.fps_interval {
            let frames = self.frame - self.fps_frames;
            self.fps = frames as f32 / elapsed.as_secs_f32();
            self.fps_frames = self.frame;
            self.fps_since = Some(now);
        }
    }

    /// Forget the previous frame time so the next delta starts from zero.
    ///
    /// Used when frames stop for a while, e.g. while the window is hidden.
    pub fn suspend(&mut self) {
        self.last_frame = None;
        self.fps_since = None;
    }

    /// Total frames advanced.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames per second, measured over half-second windows.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Number of live (not cancelled) tasks.
    pub fn task_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !slot.handle.is_cancelled())
            .count()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    struct Counter {
        ticks: Rc<Cell<u32>>,
        last_pointer: Rc<Cell<Vec2>>,
    }

    impl FrameTask for Counter {
        fn tick(&mut self, frame: &mut Frame<'_>) {
            self.ticks.set(self.ticks.get() + 1);
            self.last_pointer.set(frame.pointer);
            frame.surface.fill_circle(frame.pointer, 1.0, frame.theme.particle_color(1.0));
        }
    }

    fn counter() -> (Counter, Rc<Cell<u32>>) {
        let ticks = Rc::new(Cell::new(0));
        let task = Counter {
            ticks: ticks.clone(),
            last_pointer: Rc::new(Cell::new(Vec2::ZERO)),
        };
        (task, ticks)
    }

    #[test]
    fn test_tasks_tick_once_per_frame() {
        let mut clock = FrameClock::new();
        let (task, ticks) = counter();
        clock.schedule(Box::new(task));
        let mut list = DrawList::new(10.0, 10.0);
        let t0 = Instant::now();

        for i in 0..5 {
            clock.advance(t0 + Duration::from_millis(16 * i), Theme::Dark, Vec2::ONE, &mut list);
        }
        assert_eq!(ticks.get(), 5);
        assert_eq!(clock.frame(), 5);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_cancel_stops_task() {
        let mut clock = FrameClock::new();
        let (a, a_ticks) = counter();
        let (b, b_ticks) = counter();
        let handle_a = clock.schedule(Box::new(a));
        clock.schedule(Box::new(b));
        let mut list = DrawList::new(10.0, 10.0);
        let now = Instant::now();

        assert_eq!(clock.advance(now, Theme::Dark, Vec2::ZERO, &mut list), 2);
        handle_a.cancel();
        assert_eq!(clock.task_count(), 1);
        assert_eq!(clock.advance(now, Theme::Dark, Vec2::ZERO, &mut list), 1);
        assert_eq!(a_ticks.get(), 1);
        assert_eq!(b_ticks.get(), 2);
    }

    #[test]
    fn test_delta_and_fps() {
        let mut clock = FrameClock::new();
        let mut list = DrawList::new(10.0, 10.0);
        let t0 = Instant::now();

        for i in 0..=60 {
            clock.advance(t0 + Duration::from_micros(16_667 * i), Theme::Dark, Vec2::ZERO, &mut list);
        }
        assert!((clock.fps() - 60.0).abs() < 1.0);

        clock.suspend();
        // First frame after a pause has no delta to speak of.
        struct Delta(Rc<Cell<Duration>>);
        impl FrameTask for Delta {
            fn tick(&mut self, frame: &mut Frame<'_>) {
                self.0.set(frame.delta);
            }
        }
        let seen = Rc::new(Cell::new(Duration::MAX));
        clock.schedule(Box::new(Delta(seen.clone())));
        clock.advance(t0 + Duration::from_secs(30), Theme::Dark, Vec2::ZERO, &mut list);
        assert_eq!(seen.get(), Duration::ZERO);
    }
}
