//! Input edges decoupled from DOM event delivery.
//!
//! Listener closures translate platform events into [`InputEdge`] values and
//! push them onto an [`InputQueue`]; the frame loop drains the queue once per
//! tick, so game state only ever mutates inside a frame.

use std::collections::VecDeque;

/// A discrete press/release transition from the platform input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEdge {
    /// Jump key (Space) pressed.
    KeyDown,
    /// Jump key released.
    KeyUp,
    PointerDown,
    PointerUp,
    TouchStart,
}

/// FIFO queue of edges awaiting the next frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    edges: VecDeque<InputEdge>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edge: InputEdge) {
        self.edges.push_back(edge);
    }

    /// Removes and yields every queued edge in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEdge> + '_ {
        self.edges.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
