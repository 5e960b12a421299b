//! Object lifecycle glue: how an entity's construction, mutation, and
//! removal are expressed as animation submissions.
//!
//! Each construction expands into the entity's own "appear" transition,
//! any auxiliary transitions, and cleanup of the transient aids used to
//! derive it — all issued through the orchestrator's `submit`, so a
//! proof step that creates several entities "simultaneously" just wraps
//! its body in a batch scope.

use kanon_core::{Color, KanonResult, ToleranceConfig, Vec2};
use kanon_geom::{bisect, tangent, Anchor, EntityId, Figure, TangentSide};
use kanon_geom::intersect::circle_circle;
use kanon_geom::primitive::Circle;

use crate::mutation::Mutation;
use crate::orchestrator::Orchestrator;
use crate::sink::PlaybackSink;

/// Presentation options for a new entity.
#[derive(Debug, Clone, Default)]
pub struct EntityOptions {
    /// Virtual entities participate in computation but are never
    /// rendered; no appear transition is submitted for them.
    pub is_virtual: bool,
    /// Opaque label descriptor forwarded to the label layer.
    pub label: Option<String>,
}

impl EntityOptions {
    pub fn virtual_only() -> Self {
        Self {
            is_virtual: true,
            label: None,
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            is_virtual: false,
            label: Some(label.into()),
        }
    }
}

/// A proof step's working context: the figure being built, the
/// orchestrator deciding how changes are shown, and the active
/// tolerances. Passed explicitly to step functions — there is no
/// ambient scene.
pub struct ConstructionCtx<'a, S: PlaybackSink> {
    pub figure: &'a mut Figure,
    pub orch: &'a mut Orchestrator<S>,
    pub tol: ToleranceConfig,
}

impl<'a, S: PlaybackSink> ConstructionCtx<'a, S> {
    pub fn new(figure: &'a mut Figure, orch: &'a mut Orchestrator<S>, tol: ToleranceConfig) -> Self {
        Self { figure, orch, tol }
    }

    fn finish_entity(&mut self, id: EntityId, opts: EntityOptions) -> KanonResult<EntityId> {
        let entity = self.figure.get_mut(id)?;
        entity.is_virtual = opts.is_virtual;
        entity.label = opts.label;
        if !opts.is_virtual {
            self.orch.submit(Mutation::Appear(id));
        }
        Ok(id)
    }

    pub fn add_point(&mut self, at: Vec2) -> KanonResult<EntityId> {
        self.add_point_with(at, EntityOptions::default())
    }

    pub fn add_point_with(&mut self, at: Vec2, opts: EntityOptions) -> KanonResult<EntityId> {
        let id = self.figure.add_point(at);
        self.finish_entity(id, opts)
    }

    pub fn add_line(
        &mut self,
        start: impl Into<Anchor>,
        end: impl Into<Anchor>,
    ) -> KanonResult<EntityId> {
        self.add_line_with(start, end, EntityOptions::default())
    }

    pub fn add_line_with(
        &mut self,
        start: impl Into<Anchor>,
        end: impl Into<Anchor>,
        opts: EntityOptions,
    ) -> KanonResult<EntityId> {
        let id = self.figure.add_line(start.into(), end.into());
        // Resolve once up front so a degenerate line is rejected at
        // construction, not at first render.
        self.figure.resolve_line(id, &self.tol).inspect_err(|_| {
            let _ = self.figure.remove(id);
        })?;
        self.finish_entity(id, opts)
    }

    pub fn add_circle(
        &mut self,
        center: impl Into<Anchor>,
        rim: impl Into<Anchor>,
    ) -> KanonResult<EntityId> {
        self.add_circle_with(center, rim, EntityOptions::default())
    }

    pub fn add_circle_with(
        &mut self,
        center: impl Into<Anchor>,
        rim: impl Into<Anchor>,
        opts: EntityOptions,
    ) -> KanonResult<EntityId> {
        let id = self.figure.add_circle(center.into(), rim.into());
        self.figure.resolve_circle(id, &self.tol).inspect_err(|_| {
            let _ = self.figure.remove(id);
        })?;
        self.finish_entity(id, opts)
    }

    pub fn add_polygon(&mut self, vertices: Vec<EntityId>) -> KanonResult<EntityId> {
        self.add_polygon_with(vertices, EntityOptions::default())
    }

    pub fn add_polygon_with(
        &mut self,
        vertices: Vec<EntityId>,
        opts: EntityOptions,
    ) -> KanonResult<EntityId> {
        let id = self.figure.add_polygon(vertices);
        self.figure.resolve_polygon(id, &self.tol).inspect_err(|_| {
            let _ = self.figure.remove(id);
        })?;
        self.finish_entity(id, opts)
    }

    /// Relocate a point. The figure's state changes immediately; the
    /// orchestrator decides how the move is shown.
    pub fn move_point(&mut self, id: EntityId, to: Vec2) -> KanonResult<()> {
        self.figure.move_point(id, to)?;
        self.orch.submit(Mutation::MovePoint { id, to });
        Ok(())
    }

    /// Push a line's end `by` further along its direction. The end
    /// anchor is frozen at the new coordinate.
    pub fn extend_line(&mut self, id: EntityId, by: f64) -> KanonResult<()> {
        let resolved = self.figure.resolve_line(id, &self.tol)?;
        let new_end = resolved.extended(by).end;
        match &mut self.figure.get_mut(id)?.shape {
            kanon_geom::Shape::Line { end, .. } => *end = Anchor::Fixed(new_end),
            _ => unreachable!("resolve_line verified the shape"),
        }
        self.orch.submit(Mutation::ExtendLine { id, new_end });
        Ok(())
    }

    /// Pull a line's start `by` further back. The start anchor is
    /// frozen at the new coordinate.
    pub fn prepend_line(&mut self, id: EntityId, by: f64) -> KanonResult<()> {
        let resolved = self.figure.resolve_line(id, &self.tol)?;
        let new_start = resolved.reversed().extended(by).end;
        match &mut self.figure.get_mut(id)?.shape {
            kanon_geom::Shape::Line { start, .. } => *start = Anchor::Fixed(new_start),
            _ => unreachable!("resolve_line verified the shape"),
        }
        self.orch.submit(Mutation::PrependLine { id, new_start });
        Ok(())
    }

    pub fn recolor(&mut self, id: EntityId, color: Color) -> KanonResult<()> {
        self.figure.get_mut(id)?.color = color;
        self.orch.submit(Mutation::Recolor { id, color });
        Ok(())
    }

    pub fn fade(&mut self, id: EntityId, opacity: f32) -> KanonResult<()> {
        self.figure.get_mut(id)?.opacity = opacity;
        self.orch.submit(Mutation::Fade { id, opacity });
        Ok(())
    }

    /// Restore default emphasis.
    pub fn normal(&mut self, id: EntityId) -> KanonResult<()> {
        let entity = self.figure.get_mut(id)?;
        entity.color = Color::WHITE;
        entity.opacity = 1.0;
        self.orch.submit(Mutation::Normal(id));
        Ok(())
    }

    /// Remove an entity from the figure and the visual narrative.
    pub fn remove(&mut self, id: EntityId) -> KanonResult<()> {
        let was_virtual = self.figure.get(id)?.is_virtual;
        self.figure.remove(id)?;
        if !was_virtual {
            self.orch.submit(Mutation::Remove(id));
        }
        Ok(())
    }

    /// Bisect the angle between two line entities with the classical
    /// compass construction, and add the bisector as a new line.
    ///
    /// The two auxiliary circles and cut points exist only to derive
    /// the apex; they are created and cleaned up inside a silent scope
    /// so they never appear on screen.
    pub fn bisect_angle(&mut self, l1: EntityId, l2: EntityId) -> KanonResult<EntityId> {
        let s1 = self.figure.resolve_line(l1, &self.tol)?;
        let s2 = self.figure.resolve_line(l2, &self.tol)?;
        let construction = bisect(&s1, &s2, &self.tol)?;

        let figure = &mut *self.figure;
        let tol = self.tol;
        self.orch.with_silent(|orch| -> KanonResult<()> {
            let cut_a = figure.add_point(construction.cut_a);
            let cut_b = figure.add_point(construction.cut_b);
            let rim_a =
                Anchor::Fixed(construction.aux_a.center + Vec2::new(construction.aux_a.radius, 0.0));
            let rim_b =
                Anchor::Fixed(construction.aux_b.center + Vec2::new(construction.aux_b.radius, 0.0));
            let aux_a = figure.add_circle(cut_a.into(), rim_a);
            let aux_b = figure.add_circle(cut_b.into(), rim_b);
            for id in [cut_a, cut_b, aux_a, aux_b] {
                orch.submit(Mutation::Appear(id));
            }
            // Check the aids resolve before tearing them down again.
            figure.resolve_circle(aux_a, &tol)?;
            figure.resolve_circle(aux_b, &tol)?;
            for id in [aux_a, aux_b, cut_a, cut_b] {
                orch.submit(Mutation::Remove(id));
                figure.remove(id)?;
            }
            Ok(())
        })?;

        self.add_line(
            Anchor::Fixed(construction.bisector.start),
            Anchor::Fixed(construction.bisector.end),
        )
    }

    /// Construct the tangent line from a point entity to a circle
    /// entity on the chosen side. The line's start tracks the point.
    pub fn tangent_from(
        &mut self,
        point: EntityId,
        circle: EntityId,
        side: TangentSide,
    ) -> KanonResult<EntityId> {
        let p = self.figure.resolve_point(point)?;
        let c = self.figure.resolve_circle(circle, &self.tol)?;
        let line = tangent(p, &c, side, &self.tol)?;
        self.add_line(Anchor::Pt(point), Anchor::Fixed(line.end))
    }

    /// Euclid I.1: erect an equilateral triangle on the segment between
    /// two point entities. Returns the apex point and the triangle.
    ///
    /// The two construction circles are shown, used, and removed within
    /// this step, so a driver batching the step sees one clean group.
    pub fn equilateral_triangle(
        &mut self,
        a: EntityId,
        b: EntityId,
    ) -> KanonResult<(EntityId, EntityId)> {
        let pa = self.figure.resolve_point(a)?;
        let pb = self.figure.resolve_point(b)?;
        let circle_a = Circle::from_rim(pa, pb, &self.tol)?;
        let circle_b = Circle::from_rim(pb, pa, &self.tol)?;
        let apex_at = circle_circle(&circle_a, &circle_b, &self.tol)?[0];

        let aid_a = self.add_circle(Anchor::Pt(a), Anchor::Pt(b))?;
        let aid_b = self.add_circle(Anchor::Pt(b), Anchor::Pt(a))?;

        let apex = self.add_point(apex_at)?;
        let triangle = self.add_polygon(vec![a, b, apex])?;

        // The circles served their purpose; clean them up before the
        // enclosing batch closes.
        self.remove(aid_a)?;
        self.remove(aid_b)?;

        Ok((apex, triangle))
    }
}
