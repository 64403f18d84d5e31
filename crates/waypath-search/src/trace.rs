//! Search traces: step-wise records of the open and closed sets.
//!
//! A searcher with tracing enabled appends one [`Snapshot`] after every
//! expansion. [`SearchTraceRecorder`] replays recorded snapshots one step at
//! a time, optionally painting them onto a [`TraceCanvas`].

use waypath_core::Coord;

use crate::grid::SearchGrid;

/// A node as seen in a snapshot, with the costs it had at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceNode {
    pub coord: Coord,
    pub g_cost: f32,
    pub h_cost: i32,
}

/// Copy of the search frontier after one expansion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub current: TraceNode,
    pub open: Vec<TraceNode>,
    pub closed: Vec<TraceNode>,
}

impl Snapshot {
    /// Deep-copy the given node indices out of `grid`.
    pub(crate) fn capture(
        grid: &SearchGrid,
        current: usize,
        open: &[usize],
        closed: &[usize],
    ) -> Self {
        let view = |i: usize| {
            let n = grid.node(i);
            TraceNode {
                coord: n.coord(),
                g_cost: n.g_cost(),
                h_cost: n.h_cost(),
            }
        };
        Self {
            current: view(current),
            open: open.iter().map(|&i| view(i)).collect(),
            closed: closed.iter().map(|&i| view(i)).collect(),
        }
    }
}

/// Ordered, append-only list of snapshots produced by one search.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchTrace {
    snapshots: Vec<Snapshot>,
}

impl SearchTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

/// How a cell is highlighted while a snapshot is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Open,
    Closed,
    Current,
}

/// Something a recorder can paint snapshots onto, e.g. a tile view with
/// colors and cost labels.
pub trait TraceCanvas {
    /// Highlight a cell. `node` carries the costs for labels.
    fn mark(&mut self, node: &TraceNode, marker: Marker);

    /// Remove any highlight and label from a cell.
    fn clear(&mut self, coord: Coord);
}

/// Forward-only replay of recorded snapshots.
///
/// Each [`advance`](Self::advance) reveals the next unseen snapshot. Once
/// every snapshot has been shown, the next call resets the cursor to zero,
/// drops all recorded snapshots and returns `None`. There is no way to step
/// backwards; re-run the search to replay it again.
#[derive(Debug, Default)]
pub struct SearchTraceRecorder {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    shown: Option<usize>,
}

impl SearchTraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a deep copy of the given frontier.
    pub fn record(&mut self, current: TraceNode, open: &[TraceNode], closed: &[TraceNode]) {
        self.snapshots.push(Snapshot {
            current,
            open: open.to_vec(),
            closed: closed.to_vec(),
        });
    }

    /// Append every snapshot of a finished search.
    pub fn load(&mut self, trace: SearchTrace) {
        self.snapshots.extend(trace.into_snapshots());
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the next snapshot [`advance`](Self::advance) will return.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reveal the next snapshot, or wrap around and clear everything.
    pub fn advance(&mut self) -> Option<&Snapshot> {
        if self.cursor < self.snapshots.len() {
            let i = self.cursor;
            self.shown = Some(i);
            self.cursor += 1;
            Some(&self.snapshots[i])
        } else {
            log::trace!("trace replay finished after {} snapshots", self.snapshots.len());
            self.cursor = 0;
            self.shown = None;
            self.snapshots.clear();
            None
        }
    }

    /// Like [`advance`](Self::advance), but first clears the markers of the
    /// previously shown snapshot from `canvas` and then marks the new one.
    pub fn advance_on<C: TraceCanvas + ?Sized>(&mut self, canvas: &mut C) -> Option<&Snapshot> {
        if let Some(prev) = self.shown.and_then(|i| self.snapshots.get(i)) {
            for n in prev.open.iter().chain(&prev.closed) {
                canvas.clear(n.coord);
            }
            canvas.clear(prev.current.coord);
        }

        let snap = self.advance()?;
        for n in &snap.open {
            canvas.mark(n, Marker::Open);
        }
        for n in &snap.closed {
            canvas.mark(n, Marker::Closed);
        }
        canvas.mark(&snap.current, Marker::Current);
        Some(snap)
    }
}
