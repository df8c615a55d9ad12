// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing session state machine.
//!
//! Turns raw map clicks into a single draft feature. A marker click produces a
//! finished draft immediately; a polygon accumulates vertices until it is
//! finished by an explicit signal or by the auto-finish timer, and then waits
//! for a name. Commit or cancel always return the session to idle.
//!
//! Time never advances on its own here: callers pass `Instant`s in, so the
//! timer race is decided entirely by the order of `finish`, `tick` and
//! `cancel` calls.

use std::time::{Duration, Instant};

use crate::error::{AnnotationError, CommitRejection, Result};
use crate::models::annotation::{Coordinate, Geometry, Metrics, NewFeature, Segment, Style};

/// Default delay before an accumulating polygon finishes itself.
pub const DEFAULT_AUTO_FINISH: Duration = Duration::from_secs(15);

pub use crate::models::annotation::MIN_POLYGON_VERTICES;

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Marker,
    Polygon,
}

/// Cancellable one-shot deadline owned by an accumulating polygon.
///
/// Dropping the handle cancels it, which happens whenever the session
/// leaves the accumulating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFinishTimer {
    deadline: Instant,
}

impl AutoFinishTimer {
    fn arm(now: Instant, after: Duration) -> Self {
        Self {
            deadline: now + after,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// A finished but not yet committed feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    geometry: Geometry,
    metrics: Option<Metrics>,
    style: Style,
}

impl Draft {
    fn marker(at: Coordinate) -> Self {
        Self {
            geometry: Geometry::Point(at),
            metrics: None,
            style: Style::MARKER,
        }
    }

    fn polygon(vertices: Vec<Coordinate>) -> Self {
        Self {
            metrics: Some(Metrics::of_polygon(&vertices)),
            geometry: Geometry::Polygon(vertices),
            style: Style::POLYGON,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Accumulating {
        vertices: Vec<Coordinate>,
        timer: Option<AutoFinishTimer>,
    },
    AwaitingConfirmation(Draft),
}

/// What a click did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    MarkerPlaced,
    DrawingStarted,
    VertexAdded { count: usize },
    /// A finished draft is waiting for commit or cancel.
    Ignored,
}

#[derive(Debug)]
pub struct DrawingSession {
    tool: Tool,
    state: SessionState,
    auto_finish: Duration,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_FINISH)
    }
}

impl DrawingSession {
    pub fn new(auto_finish: Duration) -> Self {
        Self {
            tool: Tool::default(),
            state: SessionState::Idle,
            auto_finish,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Change tool. Refused while any draft exists.
    pub fn select_tool(&mut self, tool: Tool) -> Result<()> {
        if tool == self.tool {
            return Ok(());
        }
        if self.has_draft() {
            return Err(AnnotationError::DraftInProgress);
        }
        self.tool = tool;
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True while polygon vertices are being collected.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Accumulating { .. })
    }

    /// True in any state other than idle.
    pub fn has_draft(&self) -> bool {
        !matches!(self.state, SessionState::Idle)
    }

    /// The finished draft, if one is awaiting confirmation.
    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            SessionState::AwaitingConfirmation(draft) => Some(draft),
            _ => None,
        }
    }

    /// Vertices collected so far by an accumulating polygon.
    pub fn vertices(&self) -> &[Coordinate] {
        match &self.state {
            SessionState::Accumulating { vertices, .. } => vertices,
            _ => &[],
        }
    }

    pub fn auto_finish_deadline(&self) -> Option<Instant> {
        match &self.state {
            SessionState::Accumulating { timer, .. } => timer.map(|t| t.deadline()),
            _ => None,
        }
    }

    /// Feed one map click into the active tool.
    pub fn on_click(&mut self, at: Coordinate, now: Instant) -> ClickOutcome {
        match &mut self.state {
            SessionState::Accumulating { vertices, .. } => {
                vertices.push(at);
                log::debug!(
                    "Added vertex at ({:.6}, {:.6}), total vertices: {}",
                    at.lat,
                    at.lng,
                    vertices.len()
                );
                return ClickOutcome::VertexAdded {
                    count: vertices.len(),
                };
            }
            SessionState::AwaitingConfirmation(_) => return ClickOutcome::Ignored,
            SessionState::Idle => {}
        }

        match self.tool {
            Tool::Marker => {
                self.state = SessionState::AwaitingConfirmation(Draft::marker(at));
                log::debug!("Marker draft at ({:.6}, {:.6})", at.lat, at.lng);
                ClickOutcome::MarkerPlaced
            }
            Tool::Polygon => {
                self.state = SessionState::Accumulating {
                    vertices: Vec::new(),
                    timer: Some(AutoFinishTimer::arm(now, self.auto_finish)),
                };
                log::debug!("Polygon drawing started, auto-finish in {:?}", self.auto_finish);
                ClickOutcome::DrawingStarted
            }
        }
    }

    /// Explicit finish signal (double-click).
    ///
    /// With fewer than three vertices the polygon keeps accumulating and
    /// `PrematureFinish` is returned. Outside the accumulating state this is
    /// a no-op, so a finish arriving after the timer already fired is harmless.
    pub fn finish(&mut self) -> Result<()> {
        let count = match &self.state {
            SessionState::Accumulating { vertices, .. } => vertices.len(),
            _ => return Ok(()),
        };
        if count < MIN_POLYGON_VERTICES {
            return Err(AnnotationError::PrematureFinish { vertices: count });
        }
        self.finalize();
        Ok(())
    }

    /// Fire the auto-finish timer if it is due. Returns true when this call
    /// finished the polygon.
    ///
    /// The timer is one-shot: if it fires with fewer than three vertices it is
    /// spent and only an explicit finish can complete the polygon.
    pub fn tick(&mut self, now: Instant) -> bool {
        let SessionState::Accumulating { vertices, timer } = &mut self.state else {
            return false;
        };
        if !timer.is_some_and(|t| t.is_due(now)) {
            return false;
        }
        *timer = None;

        if vertices.len() < MIN_POLYGON_VERTICES {
            log::debug!(
                "Auto-finish fired with {} vertices, polygon stays open",
                vertices.len()
            );
            return false;
        }

        log::info!("Auto-finishing polygon after {:?}", self.auto_finish);
        self.finalize();
        true
    }

    /// Turn the awaiting draft into a feature ready for the store.
    ///
    /// The session is untouched when the commit is rejected.
    pub fn commit(&mut self, name: &str, description: &str) -> Result<NewFeature> {
        let Some(draft) = self.draft() else {
            return Err(AnnotationError::InvalidCommit(CommitRejection::NoDraft));
        };
        let feature = match draft.geometry() {
            Geometry::Point(at) => NewFeature::point(name, description, *at)?,
            Geometry::Polygon(vertices) => NewFeature::polygon(name, description, vertices.clone())?,
        };
        self.state = SessionState::Idle;
        Ok(feature)
    }

    /// Discard any draft and pending timer.
    pub fn cancel(&mut self) {
        if self.has_draft() {
            log::debug!("Draft cancelled");
        }
        self.state = SessionState::Idle;
    }

    /// Edges between consecutive accumulated vertices, with their lengths.
    pub fn preview_edges(&self) -> Vec<Segment> {
        self.vertices()
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }

    /// Edge from the last vertex back to the first once the polygon could close.
    pub fn closing_edge(&self) -> Option<Segment> {
        let vertices = self.vertices();
        if vertices.len() < MIN_POLYGON_VERTICES {
            return None;
        }
        Some(Segment::new(vertices[vertices.len() - 1], vertices[0]))
    }

    fn finalize(&mut self) {
        if let SessionState::Accumulating { vertices, .. } = std::mem::take(&mut self.state) {
            let draft = Draft::polygon(vertices);
            if let Some(m) = draft.metrics() {
                log::info!("Polygon finished: area {:.1} m², perimeter {:.1} m", m.area, m.perimeter);
            }
            self.state = SessionState::AwaitingConfirmation(draft);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon_session(now: Instant) -> DrawingSession {
        let mut session = DrawingSession::default();
        session.select_tool(Tool::Polygon).unwrap();
        assert_eq!(
            session.on_click(Coordinate::new(0.0, 0.0), now),
            ClickOutcome::DrawingStarted
        );
        session
    }

    fn click_triangle(session: &mut DrawingSession, now: Instant) {
        session.on_click(Coordinate::new(0.0, 0.0), now);
        session.on_click(Coordinate::new(0.0, 0.001), now);
        session.on_click(Coordinate::new(0.001, 0.0), now);
    }

    #[test]
    fn test_marker_click_finishes_immediately() {
        let mut session = DrawingSession::default();
        let outcome = session.on_click(Coordinate::new(-6.2, 106.8), Instant::now());
        assert_eq!(outcome, ClickOutcome::MarkerPlaced);

        let draft = session.draft().expect("marker draft");
        assert_eq!(draft.geometry(), &Geometry::Point(Coordinate::new(-6.2, 106.8)));
        assert!(draft.metrics().is_none());
    }

    #[test]
    fn test_polygon_starts_with_no_vertices() {
        let now = Instant::now();
        let session = polygon_session(now);
        assert!(session.is_drawing());
        assert!(session.vertices().is_empty());
        assert_eq!(session.auto_finish_deadline(), Some(now + DEFAULT_AUTO_FINISH));
    }

    #[test]
    fn test_finish_with_two_vertices_is_rejected() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        session.on_click(Coordinate::new(0.0, 0.0), now);
        session.on_click(Coordinate::new(0.0, 0.001), now);

        assert_eq!(
            session.finish(),
            Err(AnnotationError::PrematureFinish { vertices: 2 })
        );
        assert!(session.is_drawing());
        assert_eq!(session.vertices().len(), 2);
    }

    #[test]
    fn test_finish_with_three_vertices_stamps_metrics() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        click_triangle(&mut session, now);
        session.finish().unwrap();

        let draft = session.draft().expect("polygon draft");
        let metrics = draft.metrics().expect("metrics");
        assert!(metrics.area > 0.0);
        assert!(metrics.perimeter > 0.0);
        assert_eq!(draft.geometry().vertices().len(), 3);
        assert_eq!(session.auto_finish_deadline(), None);
    }

    #[test]
    fn test_preview_edges() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        session.on_click(Coordinate::new(0.0, 0.0), now);
        assert!(session.preview_edges().is_empty());

        session.on_click(Coordinate::new(0.0, 0.001), now);
        assert_eq!(session.preview_edges().len(), 1);
        assert!(session.closing_edge().is_none());

        session.on_click(Coordinate::new(0.001, 0.0), now);
        assert_eq!(session.preview_edges().len(), 2);
        let closing = session.closing_edge().unwrap();
        assert_eq!(closing.from, Coordinate::new(0.001, 0.0));
        assert_eq!(closing.to, Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_timer_finishes_polygon_when_due() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        click_triangle(&mut session, now);

        assert!(!session.tick(now + Duration::from_secs(14)));
        assert!(session.is_drawing());
        assert!(session.tick(now + DEFAULT_AUTO_FINISH));
        assert!(session.draft().is_some());

        // The explicit finish arriving afterwards changes nothing.
        let before = session.state().clone();
        session.finish().unwrap();
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_timer_with_too_few_vertices_is_spent() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        session.on_click(Coordinate::new(0.0, 0.0), now);

        assert!(!session.tick(now + DEFAULT_AUTO_FINISH));
        assert!(session.is_drawing());
        assert_eq!(session.auto_finish_deadline(), None);

        session.on_click(Coordinate::new(0.0, 0.001), now);
        session.on_click(Coordinate::new(0.001, 0.0), now);
        assert!(!session.tick(now + DEFAULT_AUTO_FINISH * 2));
        assert!(session.is_drawing());
    }

    #[test]
    fn test_finish_before_timer_wins() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        click_triangle(&mut session, now);
        session.finish().unwrap();

        assert!(!session.tick(now + DEFAULT_AUTO_FINISH));
        assert!(session.draft().is_some());
    }

    #[test]
    fn test_cancel_drops_timer() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        click_triangle(&mut session, now);
        session.cancel();

        assert_eq!(session.state(), &SessionState::Idle);
        assert!(!session.tick(now + DEFAULT_AUTO_FINISH));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_commit_with_empty_name_is_rejected() {
        let mut session = DrawingSession::default();
        session.on_click(Coordinate::new(1.0, 2.0), Instant::now());
        let before = session.state().clone();

        assert_eq!(
            session.commit("   ", "desc"),
            Err(AnnotationError::InvalidCommit(CommitRejection::EmptyName))
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_commit_without_draft_is_rejected() {
        let mut session = DrawingSession::default();
        assert_eq!(
            session.commit("name", ""),
            Err(AnnotationError::InvalidCommit(CommitRejection::NoDraft))
        );

        let now = Instant::now();
        let mut drawing = polygon_session(now);
        click_triangle(&mut drawing, now);
        assert_eq!(
            drawing.commit("name", ""),
            Err(AnnotationError::InvalidCommit(CommitRejection::NoDraft))
        );
        assert!(drawing.is_drawing());
    }

    #[test]
    fn test_commit_returns_to_idle() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        click_triangle(&mut session, now);
        session.finish().unwrap();

        let feature = session.commit(" Paddy ", "north field").unwrap();
        assert_eq!(feature.name(), "Paddy");
        assert_eq!(feature.description(), "north field");
        assert!(feature.metrics().is_some());
        assert_eq!(feature.style(), Style::POLYGON);
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_tool_switch_blocked_while_drawing() {
        let now = Instant::now();
        let mut session = polygon_session(now);
        assert_eq!(
            session.select_tool(Tool::Marker),
            Err(AnnotationError::DraftInProgress)
        );
        assert_eq!(session.tool(), Tool::Polygon);

        session.cancel();
        session.select_tool(Tool::Marker).unwrap();
        assert_eq!(session.tool(), Tool::Marker);
    }

    #[test]
    fn test_click_while_awaiting_confirmation_is_ignored() {
        let mut session = DrawingSession::default();
        let now = Instant::now();
        session.on_click(Coordinate::new(1.0, 1.0), now);
        assert_eq!(
            session.on_click(Coordinate::new(2.0, 2.0), now),
            ClickOutcome::Ignored
        );
        assert_eq!(
            session.draft().unwrap().geometry(),
            &Geometry::Point(Coordinate::new(1.0, 1.0))
        );
    }
}
