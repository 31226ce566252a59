//! Rendering back-ends.
//!
//! Both renderers are read-only consumers of the view traits in
//! [`crate::view`] and both produce data frames: the planar renderer a
//! layered draw-op list, the scene renderer mesh/billboard instances plus
//! the fire-light feedback. Neither owns simulation state.

pub mod canvas;
pub mod scene;

pub use canvas::{Blend, CanvasRenderer, DrawOp, Frame, GradientStop, Paint, Rgba};
pub use scene::{
    select_pipeline, Billboard, HeadlessBackend, LogInstance, SceneBackend, SceneError,
    SceneFrame, SceneRenderer,
};
