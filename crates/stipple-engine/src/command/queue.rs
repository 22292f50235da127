use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::error::{Error, Result};

use super::Command;

/// Ordered command queue between the host and the render thread.
///
/// Only dataset commands (`init`, `setData`, `setColors`) wait for room.
/// Renders, gestures and resizes are always accepted and merge with the
/// command at the tail when the result is equivalent, so the queue stays
/// short while the renderer is busy:
/// - a `render` behind a `render` is dropped,
/// - a `moveCamera` replaces a trailing `moveCamera`,
/// - a `handleZoom` at the same anchor adds its delta to a trailing one,
/// - a `resize` replaces a trailing `resize`.
pub(crate) struct CommandQueue<B> {
    state: Mutex<QueueState<B>>,
    ready: Condvar,
    space: Condvar,
    capacity: usize,
}

struct QueueState<B> {
    items: VecDeque<Command<B>>,
    /// Host is gone; the worker drains what is left and exits.
    closed: bool,
    /// Worker is gone; nothing more is accepted.
    stopped: bool,
}

impl<B> CommandQueue<B> {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
                stopped: false,
            }),
            ready: Condvar::new(),
            space: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<B>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enqueues `command`, blocking only for dataset commands on a full queue.
    pub fn push(&self, command: Command<B>) -> Result<()> {
        let mut state = self.lock();
        if state.stopped {
            return Err(Error::WorkerStopped);
        }

        if waits_for_room(&command) {
            while state.items.len() >= self.capacity && !state.stopped {
                state = self.space.wait(state).unwrap_or_else(|e| e.into_inner());
            }
            if state.stopped {
                return Err(Error::WorkerStopped);
            }
            state.items.push_back(command);
        } else if let Some(command) = merge_into_tail(&mut state.items, command) {
            state.items.push_back(command);
        }

        drop(state);
        self.ready.notify_one();
        Ok(())
    }

    /// Next command, waiting while the queue is empty. `None` once the host
    /// closed the queue and everything queued was handed out.
    pub fn pop(&self) -> Option<Command<B>> {
        let mut state = self.lock();
        loop {
            if let Some(command) = state.items.pop_front() {
                drop(state);
                self.space.notify_one();
                return Some(command);
            }
            if state.closed {
                return None;
            }
            state = self.ready.wait(state).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Host side: no more commands will follow.
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    /// Worker side: discards queued commands and rejects further ones.
    pub fn stop(&self) {
        {
            let mut state = self.lock();
            state.stopped = true;
            state.items.clear();
        }
        self.space.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }
}

fn waits_for_room<B>(command: &Command<B>) -> bool {
    matches!(
        command,
        Command::Init(_) | Command::SetData { .. } | Command::SetColors(_)
    )
}

/// Folds `command` into the last queued one when that is equivalent.
/// Returns the command back when it has to be queued on its own.
fn merge_into_tail<B>(items: &mut VecDeque<Command<B>>, command: Command<B>) -> Option<Command<B>> {
    let Some(tail) = items.back_mut() else {
        return Some(command);
    };
    match (tail, command) {
        (Command::Render, Command::Render) => None,
        (Command::MoveCamera(last), Command::MoveCamera(clip)) => {
            *last = clip;
            None
        }
        (
            Command::HandleZoom { clip: last_clip, delta_y: last_delta },
            Command::HandleZoom { clip, delta_y },
        ) if *last_clip == clip => {
            *last_delta += delta_y;
            None
        }
        (Command::Resize { width: w, height: h }, Command::Resize { width, height }) => {
            *w = width;
            *h = height;
            None
        }
        (_, command) => Some(command),
    }
}
