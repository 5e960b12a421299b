//! The figure arena: persistent identity for geometric entities.
//!
//! A `Figure` owns every entity of one construction. Points are stored
//! with live coordinates; lines and circles reference their defining
//! points through [`Anchor`]s, so moving a point re-derives every
//! dependent shape at resolution time. Nothing derived (radius, length,
//! direction) is stored redundantly.

use serde::{Deserialize, Serialize};

use kanon_core::{Color, KanonError, KanonResult, ToleranceConfig, Vec2};

use crate::polygon::Polygon;
use crate::primitive::{Arc, Circle, Segment};

/// Handle to an entity in a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One end of a line or the center/rim of a circle: either a live point
/// entity (tracks movement) or a frozen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    Pt(EntityId),
    Fixed(Vec2),
}

impl From<Vec2> for Anchor {
    fn from(v: Vec2) -> Self {
        Anchor::Fixed(v)
    }
}

impl From<EntityId> for Anchor {
    fn from(id: EntityId) -> Self {
        Anchor::Pt(id)
    }
}

/// The geometric payload of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Point {
        at: Vec2,
    },
    Line {
        start: Anchor,
        end: Anchor,
    },
    /// Center plus a defining rim point; the radius is derived at
    /// resolution time so the circle stays consistent when the center
    /// moves.
    Circle {
        center: Anchor,
        rim: Anchor,
    },
    Arc {
        center: Anchor,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Vertices must be point entities so the ring tracks their moves.
    Polygon {
        vertices: Vec<EntityId>,
    },
}

/// An entity record: shape plus the presentation state the animation
/// layer mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub shape: Shape,
    /// Virtual entities participate in computation but are excluded
    /// from the visible-object set and from label layout.
    pub is_virtual: bool,
    pub visible: bool,
    pub color: Color,
    pub opacity: f32,
    /// Opaque label descriptor, forwarded to the label layer.
    pub label: Option<String>,
}

impl Entity {
    fn new(shape: Shape) -> Self {
        Self {
            shape,
            is_virtual: false,
            visible: true,
            color: Color::WHITE,
            opacity: 1.0,
            label: None,
        }
    }
}

/// Arena of entities for one construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Figure {
    slots: Vec<Option<Entity>>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(entity));
        id
    }

    pub fn add_point(&mut self, at: Vec2) -> EntityId {
        self.insert(Entity::new(Shape::Point { at }))
    }

    pub fn add_line(&mut self, start: Anchor, end: Anchor) -> EntityId {
        self.insert(Entity::new(Shape::Line { start, end }))
    }

    pub fn add_circle(&mut self, center: Anchor, rim: Anchor) -> EntityId {
        self.insert(Entity::new(Shape::Circle { center, rim }))
    }

    pub fn add_arc(
        &mut self,
        center: Anchor,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    ) -> EntityId {
        self.insert(Entity::new(Shape::Arc {
            center,
            radius,
            start_angle,
            sweep,
        }))
    }

    pub fn add_polygon(&mut self, vertices: Vec<EntityId>) -> EntityId {
        self.insert(Entity::new(Shape::Polygon { vertices }))
    }

    pub fn get(&self, id: EntityId) -> KanonResult<&Entity> {
        self.slots
            .get(id.0 as usize)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| KanonError::unknown(id.to_string()))
    }

    pub fn get_mut(&mut self, id: EntityId) -> KanonResult<&mut Entity> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| KanonError::unknown(id.to_string()))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_ok()
    }

    /// Remove an entity. The slot stays dead; later resolutions of the
    /// id fail with `UnknownEntity`.
    pub fn remove(&mut self, id: EntityId) -> KanonResult<Entity> {
        let slot = self
            .slots
            .get_mut(id.0 as usize)
            .ok_or_else(|| KanonError::unknown(id.to_string()))?;
        slot.take().ok_or_else(|| KanonError::unknown(id.to_string()))
    }

    /// Relocate a point. Identity persists: dependent lines and circles
    /// see the new coordinates at their next resolution.
    pub fn move_point(&mut self, id: EntityId, to: Vec2) -> KanonResult<()> {
        match &mut self.get_mut(id)?.shape {
            Shape::Point { at } => {
                *at = to;
                Ok(())
            }
            other => Err(KanonError::InvalidArgument(format!(
                "move_point on non-point entity {id} ({other:?})"
            ))),
        }
    }

    pub fn resolve_anchor(&self, anchor: Anchor) -> KanonResult<Vec2> {
        match anchor {
            Anchor::Fixed(v) => Ok(v),
            Anchor::Pt(id) => match &self.get(id)?.shape {
                Shape::Point { at } => Ok(*at),
                other => Err(KanonError::InvalidArgument(format!(
                    "anchor {id} is not a point ({other:?})"
                ))),
            },
        }
    }

    pub fn resolve_point(&self, id: EntityId) -> KanonResult<Vec2> {
        self.resolve_anchor(Anchor::Pt(id))
    }

    pub fn resolve_line(&self, id: EntityId, tol: &ToleranceConfig) -> KanonResult<Segment> {
        match &self.get(id)?.shape {
            Shape::Line { start, end } => Segment::new(
                self.resolve_anchor(*start)?,
                self.resolve_anchor(*end)?,
                tol,
            ),
            other => Err(KanonError::InvalidArgument(format!(
                "entity {id} is not a line ({other:?})"
            ))),
        }
    }

    pub fn resolve_circle(&self, id: EntityId, tol: &ToleranceConfig) -> KanonResult<Circle> {
        match &self.get(id)?.shape {
            Shape::Circle { center, rim } => Circle::from_rim(
                self.resolve_anchor(*center)?,
                self.resolve_anchor(*rim)?,
                tol,
            ),
            other => Err(KanonError::InvalidArgument(format!(
                "entity {id} is not a circle ({other:?})"
            ))),
        }
    }

    pub fn resolve_arc(&self, id: EntityId, tol: &ToleranceConfig) -> KanonResult<Arc> {
        match &self.get(id)?.shape {
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Arc::new(
                self.resolve_anchor(*center)?,
                *radius,
                *start_angle,
                *sweep,
                tol,
            ),
            other => Err(KanonError::InvalidArgument(format!(
                "entity {id} is not an arc ({other:?})"
            ))),
        }
    }

    pub fn resolve_polygon(&self, id: EntityId, tol: &ToleranceConfig) -> KanonResult<Polygon> {
        match &self.get(id)?.shape {
            Shape::Polygon { vertices } => {
                let coords = vertices
                    .iter()
                    .map(|v| self.resolve_point(*v))
                    .collect::<KanonResult<Vec<_>>>()?;
                Polygon::from_vertices(coords, tol)
            }
            other => Err(KanonError::InvalidArgument(format!(
                "entity {id} is not a polygon ({other:?})"
            ))),
        }
    }

    /// Ids of the entities in the visible-object set: alive, visible,
    /// and not virtual.
    pub fn visible_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .filter(|e| e.visible && !e.is_virtual)
                .map(|_| EntityId(i as u32))
        })
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
