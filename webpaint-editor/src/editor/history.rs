// Undo/redo history module for the editor.
//
// Every commit stores a full copy of the surface. The stack is small and
// bounded, so diffs are not worth the bookkeeping.

use std::collections::VecDeque;

use image::RgbaImage;
use tracing::{debug, trace};
use webpaint_core::PixelSurface;

/// Immutable copy of the committed surface at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    image: RgbaImage,
}

impl Snapshot {
    pub fn capture(surface: &PixelSurface) -> Self {
        Self {
            image: surface.as_image().clone(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Where an undo or redo landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryStep<'a> {
    /// Show this snapshot.
    Snapshot(&'a Snapshot),
    /// Walked past the oldest snapshot: show an empty canvas.
    Blank,
    /// Nothing to redo; leave the canvas alone.
    NoOp,
}

#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: VecDeque<Snapshot>,
    // None is the blank canvas that precedes the oldest snapshot.
    cursor: Option<usize>,
    capacity: usize,
}

impl HistoryStack {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        debug!("Creating history with capacity {}", capacity);
        Self {
            snapshots: VecDeque::with_capacity(capacity + 1),
            cursor: None,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|i| self.snapshots.get(i))
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.next_index() < self.snapshots.len()
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |i| i + 1)
    }

    /// Record a commit. Anything ahead of the cursor is discarded first.
    pub fn push_snapshot(&mut self, snapshot: Snapshot) {
        let keep = self.next_index();
        if keep < self.snapshots.len() {
            trace!(
                "Discarding {} redo snapshots",
                self.snapshots.len() - keep
            );
            self.snapshots.truncate(keep);
        }

        self.snapshots.push_back(snapshot);

        if self.snapshots.len() > self.capacity {
            // The cursor keeps its index, which now names the new tail.
            self.snapshots.pop_front();
            trace!("History full, evicted oldest snapshot");
        } else {
            self.cursor = Some(self.snapshots.len() - 1);
        }

        debug!(
            "Pushed snapshot, history length {} cursor {:?}",
            self.snapshots.len(),
            self.cursor
        );
    }

    pub fn undo(&mut self) -> HistoryStep<'_> {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                debug!("Undo reached blank canvas");
                HistoryStep::Blank
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                debug!("Undo to snapshot {}", i - 1);
                HistoryStep::Snapshot(&self.snapshots[i - 1])
            }
        }
    }

    pub fn redo(&mut self) -> HistoryStep<'_> {
        let next = self.next_index();
        if next >= self.snapshots.len() {
            debug!("Nothing to redo");
            return HistoryStep::NoOp;
        }
        self.cursor = Some(next);
        debug!("Redo to snapshot {}", next);
        HistoryStep::Snapshot(&self.snapshots[next])
    }

    pub fn clear(&mut self) {
        debug!("Clearing history");
        self.snapshots.clear();
        self.cursor = None;
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        HistoryStack::new(webpaint_document::config::DEFAULT_HISTORY_CAPACITY)
    }
}
