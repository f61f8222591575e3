//! The stateful sky map: objects, filter, viewport, hover, and backdrop.
//!
//! [`SkyMap`] holds everything that does not depend on a browser, so it can
//! be driven from tests and the CLI as well as from the canvas host in
//! [`crate::web`]. Input handlers return [`Action`]s for the host to apply.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt;

use crate::backdrop::StarField;
use crate::consts::DEFAULT_BACKDROP_SEED;
use crate::filter::{ActiveFilter, ViewMode};
use crate::hit::{HitPolicy, hit_test_with};
use crate::input::{ViewportController, WheelDelta};
use crate::object::{CelestialObject, ObjectId, sample_objects};
use crate::projection::{Point, Viewport, ViewportTransform};
use crate::render::{Surface, draw};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Map state changed; redraw.
    RenderNeeded,
    /// The object under the pointer changed.
    HoverChanged(Option<ObjectId>),
    /// A click resolved to this object, or to empty sky.
    ObjectClicked(Option<ObjectId>),
    /// CSS cursor keyword for the canvas element.
    SetCursor(String),
}

/// Pointer cursor the map wants the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Crosshair,
    Pointer,
    Grabbing,
}

impl Cursor {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Crosshair => "crosshair",
            Self::Pointer => "pointer",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Details of the hovered object in the current view mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: String,
    pub source: String,
    pub mode: ViewMode,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub magnitude: Option<f64>,
}

impl Tooltip {
    fn from_object(obj: &CelestialObject, mode: ViewMode) -> Self {
        let (ra, dec) = match mode {
            ViewMode::Normalized => (obj.ra_normalized, obj.dec_normalized),
            ViewMode::Raw => (obj.ra_raw, obj.dec_raw),
        };
        Self { name: obj.name.clone(), source: obj.source.to_uppercase(), mode, ra, dec, magnitude: obj.magnitude }
    }

    /// Label/value rows in display order. Magnitude is listed only when known.
    #[must_use]
    pub fn rows(&self) -> Vec<(String, String)> {
        let mode = self.mode.as_str();
        let mut rows = vec![
            ("Source".to_owned(), self.source.clone()),
            (format!("RA ({mode})"), degrees(self.ra)),
            (format!("Dec ({mode})"), degrees(self.dec)),
        ];
        if let Some(m) = self.magnitude {
            rows.push(("Magnitude".to_owned(), m.to_string()));
        }
        rows
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (label, value) in self.rows() {
            write!(f, "\n  {label}: {value}")?;
        }
        Ok(())
    }
}

fn degrees(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v}°"))
}

/// Callback invoked with the object under a click, or `None` for empty sky.
pub type ClickHandler = Box<dyn FnMut(Option<&CelestialObject>)>;

/// Sky-map state independent of any drawing backend.
pub struct SkyMap {
    objects: Vec<CelestialObject>,
    filter: ActiveFilter,
    controller: ViewportController,
    viewport: Viewport,
    hovered: Option<ObjectId>,
    backdrop: StarField,
    hit_policy: HitPolicy,
    cursor: Cursor,
    on_click: Option<ClickHandler>,
}

impl Default for SkyMap {
    fn default() -> Self {
        Self::new(Vec::new(), Viewport::default(), true)
    }
}

impl fmt::Debug for SkyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkyMap")
            .field("objects", &self.objects.len())
            .field("filter", &self.filter)
            .field("transform", self.controller.transform())
            .field("viewport", &self.viewport)
            .field("hovered", &self.hovered)
            .field("seed", &self.backdrop.seed())
            .field("hit_policy", &self.hit_policy)
            .finish_non_exhaustive()
    }
}

impl SkyMap {
    /// Create a map over `objects`. An empty list shows the demo sample.
    #[must_use]
    pub fn new(objects: Vec<CelestialObject>, viewport: Viewport, show_normalized: bool) -> Self {
        let mode = if show_normalized { ViewMode::Normalized } else { ViewMode::Raw };
        let mut filter = ActiveFilter::default();
        filter.set_view_mode(mode);
        Self {
            objects: or_sample(objects),
            filter,
            controller: ViewportController::new(),
            viewport,
            hovered: None,
            backdrop: StarField::new(DEFAULT_BACKDROP_SEED),
            hit_policy: HitPolicy::default(),
            cursor: Cursor::default(),
            on_click: None,
        }
    }

    /// Use `seed` for the decorative star field.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.backdrop.reseed(seed);
        self
    }

    #[must_use]
    pub fn with_hit_policy(mut self, policy: HitPolicy) -> Self {
        self.hit_policy = policy;
        self
    }

    /// Register the callback run by [`SkyMap::on_click`].
    pub fn set_click_handler(&mut self, handler: impl FnMut(Option<&CelestialObject>) + 'static) {
        self.on_click = Some(Box::new(handler));
    }

    // --- Data inputs ---

    /// Replace the object list. An empty list shows the demo sample.
    pub fn set_objects(&mut self, objects: Vec<CelestialObject>) -> Vec<Action> {
        self.objects = or_sample(objects);
        self.after_visibility_change()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = viewport;
        vec![Action::RenderNeeded]
    }

    // --- Filter ---

    pub fn toggle_source(&mut self, source: &str) -> Vec<Action> {
        self.filter.toggle(source);
        self.after_visibility_change()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Vec<Action> {
        self.filter.set_view_mode(mode);
        self.after_visibility_change()
    }

    pub fn toggle_view_mode(&mut self) -> Vec<Action> {
        self.filter.toggle_view_mode();
        self.after_visibility_change()
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.controller.zoom_in();
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.controller.zoom_out();
        vec![Action::RenderNeeded]
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.controller.reset();
        vec![Action::RenderNeeded]
    }

    /// Regenerate the decorative star field from a new seed.
    pub fn reseed_backdrop(&mut self, seed: u64) -> Vec<Action> {
        self.backdrop.reseed(seed);
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        self.controller.on_pointer_down(screen_pt);
        self.update_cursor().into_iter().collect()
    }

    /// Pan while dragging; otherwise track the hovered object.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.controller.is_dragging() {
            if self.controller.on_pointer_move(screen_pt) {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }

        let next = self.pick(screen_pt).map(|obj| obj.id.clone());
        if next != self.hovered {
            self.hovered.clone_from(&next);
            actions.push(Action::HoverChanged(next));
            actions.push(Action::RenderNeeded);
        }
        actions.extend(self.update_cursor());
        actions
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.controller.on_pointer_up();
        self.update_cursor().into_iter().collect()
    }

    /// Pointer left the surface. Ends a drag; the hovered object is kept.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.controller.on_pointer_leave();
        self.update_cursor().into_iter().collect()
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let before = self.controller.transform().scale();
        self.controller.on_wheel(delta);
        let after = self.controller.transform().scale();
        if (after - before).abs() < f64::EPSILON { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    /// Resolve a click and run the click handler with the result.
    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let hit = hit_test_with(
            self.hit_policy,
            screen_pt,
            &self.objects,
            &self.filter,
            self.viewport,
            self.controller.transform(),
        );
        if let Some(handler) = self.on_click.as_mut() {
            handler(hit);
        }
        vec![Action::ObjectClicked(hit.map(|obj| obj.id.clone()))]
    }

    // --- Render ---

    /// Draw the current state to `surface`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any surface call fails.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        draw(
            surface,
            &self.objects,
            &self.filter,
            self.controller.transform(),
            self.viewport,
            self.hovered.as_ref(),
            &self.backdrop,
        )
    }

    // --- Queries ---

    #[must_use]
    pub fn objects(&self) -> &[CelestialObject] {
        &self.objects
    }

    #[must_use]
    pub fn filter(&self) -> &ActiveFilter {
        &self.filter
    }

    #[must_use]
    pub fn transform(&self) -> &ViewportTransform {
        self.controller.transform()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&CelestialObject> {
        let id = self.hovered.as_ref()?;
        self.objects.iter().find(|obj| obj.id == *id)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn backdrop_seed(&self) -> u64 {
        self.backdrop.seed()
    }

    /// The object under `screen_pt` without changing hover state.
    #[must_use]
    pub fn pick(&self, screen_pt: Point) -> Option<&CelestialObject> {
        hit_test_with(
            self.hit_policy,
            screen_pt,
            &self.objects,
            &self.filter,
            self.viewport,
            self.controller.transform(),
        )
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<Tooltip> {
        self.hovered().map(|obj| Tooltip::from_object(obj, self.filter.view_mode()))
    }

    /// Objects whose source is active, regardless of coordinates.
    #[must_use]
    pub fn active_object_count(&self) -> usize {
        self.objects.iter().filter(|obj| self.filter.is_active(&obj.source)).count()
    }

    /// `"Zoom: 100% | Objects: 5"`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "Zoom: {:.0}% | Objects: {}",
            self.controller.transform().scale() * 100.0,
            self.active_object_count()
        )
    }

    // --- Internal ---

    fn after_visibility_change(&mut self) -> Vec<Action> {
        let mut actions = self.revalidate_hover();
        actions.extend(self.update_cursor());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Drop the hover if that object is no longer visible.
    fn revalidate_hover(&mut self) -> Vec<Action> {
        let Some(id) = self.hovered.as_ref() else {
            return Vec::new();
        };
        if self.filter.visible(&self.objects).any(|(obj, _)| obj.id == *id) {
            return Vec::new();
        }
        self.hovered = None;
        vec![Action::HoverChanged(None)]
    }

    fn update_cursor(&mut self) -> Option<Action> {
        let next = if self.controller.is_dragging() {
            Cursor::Grabbing
        } else if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Crosshair
        };
        if next == self.cursor {
            return None;
        }
        self.cursor = next;
        Some(Action::SetCursor(next.as_css().to_owned()))
    }
}

fn or_sample(objects: Vec<CelestialObject>) -> Vec<CelestialObject> {
    if objects.is_empty() { sample_objects() } else { objects }
}
