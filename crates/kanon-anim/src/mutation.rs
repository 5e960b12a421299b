use serde::{Deserialize, Serialize};

use kanon_core::{Color, Vec2};
use kanon_geom::EntityId;

/// A single change to a geometric entity's presented state.
///
/// Every geometry-mutating call is expressed as one of these and routed
/// through the orchestrator's `submit`; the playback sink realizes it
/// either as an animated transition or as an instant end-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// The entity's "appear" transition.
    Appear(EntityId),
    /// The entity is removed from the visual narrative.
    Remove(EntityId),
    /// Relocate a point; dependent shapes follow at render time.
    MovePoint { id: EntityId, to: Vec2 },
    /// Push a line's end further out.
    ExtendLine { id: EntityId, new_end: Vec2 },
    /// Pull a line's start further back.
    PrependLine { id: EntityId, new_start: Vec2 },
    Recolor { id: EntityId, color: Color },
    /// Dim the entity to the given opacity.
    Fade { id: EntityId, opacity: f32 },
    /// Restore default emphasis (full opacity, default color).
    Normal(EntityId),
}

impl Mutation {
    /// The entity this mutation targets.
    pub fn target(&self) -> EntityId {
        match self {
            Mutation::Appear(id)
            | Mutation::Remove(id)
            | Mutation::Normal(id)
            | Mutation::MovePoint { id, .. }
            | Mutation::ExtendLine { id, .. }
            | Mutation::PrependLine { id, .. }
            | Mutation::Recolor { id, .. }
            | Mutation::Fade { id, .. } => *id,
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::Appear(id) => write!(f, "appear {id}"),
            Mutation::Remove(id) => write!(f, "remove {id}"),
            Mutation::MovePoint { id, to } => {
                write!(f, "move {id} to ({:.3}, {:.3})", to.x, to.y)
            }
            Mutation::ExtendLine { id, .. } => write!(f, "extend {id}"),
            Mutation::PrependLine { id, .. } => write!(f, "prepend {id}"),
            Mutation::Recolor { id, color } => write!(f, "recolor {id} to {color}"),
            Mutation::Fade { id, opacity } => write!(f, "fade {id} to {opacity:.2}"),
            Mutation::Normal(id) => write!(f, "normal {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_target() {
        let id = EntityId(7);
        assert_eq!(Mutation::Appear(id).target(), id);
        assert_eq!(
            Mutation::MovePoint {
                id,
                to: Vec2::new(1.0, 2.0)
            }
            .target(),
            id
        );
    }

    #[test]
    fn test_mutation_display() {
        let m = Mutation::MovePoint {
            id: EntityId(3),
            to: Vec2::new(1.0, 2.0),
        };
        assert_eq!(format!("{}", m), "move #3 to (1.000, 2.000)");
        assert_eq!(format!("{}", Mutation::Appear(EntityId(0))), "appear #0");
    }
}
