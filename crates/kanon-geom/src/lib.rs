//! # kanon-geom
//!
//! The Kanon geometric construction kernel: value-level primitives
//! (segments, circles, arcs), exact intersection and measurement
//! algorithms with ε-tolerant degenerate handling, composite shapes
//! (angle markers, polygons), and the figure arena that gives entities
//! persistent identity across moves.
//!
//! Every query here is a pure function of its geometric inputs plus a
//! [`ToleranceConfig`](kanon_core::ToleranceConfig); there is no hidden
//! global state.

pub mod angle;
pub mod bisect;
pub mod figure;
pub mod intersect;
pub mod marker;
pub mod polygon;
pub mod primitive;
pub mod tangent;

pub use angle::{measure_angle, MeasuredAngle};
pub use bisect::{bisect, Bisection};
pub use figure::{Anchor, Entity, EntityId, Figure, Shape};
pub use intersect::{arc_segment, circle_circle, circle_segment, line_line, LineLine};
pub use marker::AngleMarker;
pub use polygon::Polygon;
pub use primitive::{Arc, Circle, Segment};
pub use tangent::{tangent, TangentSide};
