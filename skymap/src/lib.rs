//! Sky-map projection, interaction, and rendering engine.
//!
//! This crate owns everything the sky map needs between raw pointer events
//! and pixels: projecting celestial coordinates into the viewport, tracking
//! pan/zoom gestures, filtering objects by data source, hit-testing the
//! pointer against rendered objects, and drawing the scene. The host layer
//! (browser canvas or the `nexus` CLI) wires events in and persists nothing.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::SkyMap`], the stateful map, and its [`engine::Action`]s |
//! | [`object`] | Celestial object model, source catalog, demo sample |
//! | [`projection`] | RA/Dec to pixel projection and viewport clipping |
//! | [`input`] | Wheel/pointer types and the pan/zoom gesture state machine |
//! | [`filter`] | Active-source set and raw/normalized view mode |
//! | [`hit`] | Hit-testing objects under the pointer |
//! | [`render`] | Scene rendering against the [`render::Surface`] trait |
//! | [`backdrop`] | Seeded decorative star field |
//! | [`svg`] | Headless SVG [`render::Surface`] |
//! | [`web`] | Browser [`render::Surface`] over `CanvasRenderingContext2d` |
//! | [`consts`] | Shared numeric constants (zoom limits, hit radius, grid steps) |

pub mod backdrop;
pub mod consts;
pub mod engine;
pub mod filter;
pub mod hit;
pub mod input;
pub mod object;
pub mod projection;
pub mod render;
pub mod svg;
pub mod web;
