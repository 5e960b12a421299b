/// Core error types for the Kanon engine.
///
/// Geometric failures are expected, recoverable conditions in a
/// construction narrative: a proof step that gets `NoIntersection` back
/// may simply pick a larger auxiliary circle and try again. They are
/// therefore ordinary `Result` variants the caller must branch on.
/// Scope imbalance in the animation orchestrator is NOT represented
/// here — it corrupts all subsequent sequencing and panics instead.

/// A specialized Result type for Kanon operations.
pub type KanonResult<T> = Result<T, KanonError>;

/// Top-level error type encompassing all Kanon subsystems.
#[derive(Debug, thiserror::Error)]
pub enum KanonError {
    /// The queried entities do not meet (disjoint or parallel geometry).
    #[error("no intersection: {0}")]
    NoIntersection(String),

    /// Angle construction on two lines with no ε-coincident endpoint pair.
    #[error("no common vertex between lines (closest endpoints {gap:.6} apart)")]
    NoCommonVertex { gap: f64 },

    /// Angle construction on two lines with more than one coincident pair.
    #[error("ambiguous vertex: {pairings} endpoint pairings coincide")]
    AmbiguousVertex { pairings: usize },

    /// Zero-length line, non-positive radius, coincident circle centers
    /// with unequal radii, and the like.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Tangent construction from a point strictly inside the circle.
    #[error("point at distance {distance:.6} lies inside circle of radius {radius:.6}")]
    PointInsideCircle { distance: f64, radius: f64 },

    /// A lookup by entity id or registered name failed.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl KanonError {
    /// Create a `NoIntersection` error with a short reason.
    pub fn no_intersection(reason: impl Into<String>) -> Self {
        KanonError::NoIntersection(reason.into())
    }

    /// Create a `DegenerateGeometry` error with a short reason.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        KanonError::DegenerateGeometry(reason.into())
    }

    /// Create an `UnknownEntity` error.
    pub fn unknown(what: impl Into<String>) -> Self {
        KanonError::UnknownEntity(what.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_intersection_display() {
        let err = KanonError::no_intersection("circles are disjoint");
        assert_eq!(err.to_string(), "no intersection: circles are disjoint");
    }

    #[test]
    fn test_point_inside_circle_display() {
        let err = KanonError::PointInsideCircle {
            distance: 1.0,
            radius: 3.0,
        };
        assert!(err.to_string().contains("inside circle"));
        assert!(err.to_string().contains("3.0"));
    }

    #[test]
    fn test_ambiguous_vertex_display() {
        let err = KanonError::AmbiguousVertex { pairings: 2 };
        assert!(err.to_string().contains("2 endpoint pairings"));
    }
}
