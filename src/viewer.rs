//! A viewing session: at most one loaded shape with its actors and selection.

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::import::{import_with_format, FileFormat, Importer};
use crate::pick::{PickAdapter, PickEvent, ScreenRect};
use crate::scene::{PresentReport, Scene};
use crate::selection::{self, FaceId, PickOutcome, SelectionSnapshot, SelectionState, VolumeFaceMap};
use crate::tessellation::Triangulate;
use crate::topology::Shape;

/// Proof that a load was started. Only the most recent ticket can finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    file_name: String,
    format: FileFormat,
}

impl LoadTicket {
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn format(&self) -> FileFormat {
        self.format
    }
}

/// Everything built for one loaded shape.
#[derive(Debug)]
pub struct LoadedModel {
    pub file_name: String,
    pub shape: Shape,
    pub map: VolumeFaceMap,
    pub scene: Scene,
    pub selection: SelectionState,
    pub report: PresentReport,
}

/// Owns the loaded model and routes picks into the selection engine.
#[derive(Debug, Default)]
pub struct Viewer {
    config: ViewerConfig,
    generation: u64,
    in_flight: Option<u64>,
    model: Option<LoadedModel>,
}

impl Viewer {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        self.model.as_ref().map(|m| &m.selection)
    }

    /// The selection buffers of the loaded model, ready for persistence.
    #[must_use]
    pub fn snapshot(&self) -> Option<SelectionSnapshot> {
        self.selection().map(SelectionState::snapshot)
    }

    /// Starts loading `file_name`, superseding any load still in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the file extension is not supported. The session
    /// is left unchanged in that case.
    pub fn begin_load(&mut self, file_name: &str) -> Result<LoadTicket> {
        let format = FileFormat::from_file_name(file_name).inspect_err(|err| {
            tracing::error!(file = file_name, %err, "not a supported input file");
        })?;
        self.generation += 1;
        if self.in_flight.replace(self.generation).is_some() {
            tracing::warn!(file = file_name, "superseding a load still in flight");
        }
        Ok(LoadTicket {
            generation: self.generation,
            file_name: file_name.to_owned(),
            format,
        })
    }

    /// Finishes a load once the file contents are available.
    ///
    /// Returns `Ok(false)` without touching the session if `ticket` was
    /// superseded by a later [`begin_load`](Self::begin_load). On success the
    /// previous model is discarded and replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the importer fails. The previous model is kept.
    pub fn finish_load<I, T>(
        &mut self,
        ticket: LoadTicket,
        data: &[u8],
        importer: &mut I,
        triangulator: &T,
        seed: &[u32],
    ) -> Result<bool>
    where
        I: Importer + ?Sized,
        T: Triangulate + ?Sized,
    {
        if self.in_flight != Some(ticket.generation) {
            tracing::warn!(file = %ticket.file_name, "discarding stale load");
            return Ok(false);
        }
        self.in_flight = None;
        let shape = import_with_format(importer, &ticket.file_name, ticket.format, data)
            .inspect_err(|err| tracing::error!(%err, "failed to import geometry"))?;
        self.show_shape(ticket.file_name, shape, triangulator, seed);
        Ok(true)
    }

    /// Builds the volume map, actors and seeded selection for `shape`.
    ///
    /// Replaces any loaded model and invalidates every outstanding
    /// [`LoadTicket`]. `seed` holds face ids in face mode and volume ids in
    /// volume mode.
    pub fn show_shape<T: Triangulate + ?Sized>(
        &mut self,
        file_name: String,
        shape: Shape,
        triangulator: &T,
        seed: &[u32],
    ) -> &LoadedModel {
        self.generation += 1;
        if self.in_flight.take().is_some() {
            tracing::warn!(file = %file_name, "superseding a load still in flight");
        }
        if let Some(mut previous) = self.model.take() {
            tracing::debug!(file = %previous.file_name, "removing previous scene");
            previous.scene.clear();
        }

        let map = VolumeFaceMap::build(&shape);
        let selection = SelectionState::seeded(self.config.mode, seed, &map);
        let (scene, report) = Scene::present(
            &shape,
            &map,
            &selection,
            triangulator,
            &self.config.mesh,
            &self.config.policy,
        );
        tracing::info!(
            file = %file_name,
            actors = report.actors,
            skipped = report.skipped.len(),
            "triangulated and added to the scene"
        );

        self.model.insert(LoadedModel {
            file_name,
            shape,
            map,
            scene,
            selection,
            report,
        })
    }

    /// Handles a left-button press: hit test, toggle, recolor.
    ///
    /// A miss, or a hit on an actor the scene does not know, is a no-op.
    pub fn handle_pick<P: PickAdapter + ?Sized>(
        &mut self,
        event: PickEvent,
        adapter: &mut P,
    ) -> PickOutcome {
        let Some(model) = self.model.as_ref() else {
            return PickOutcome::default();
        };
        let picked = adapter
            .hit_test(&model.scene, ScreenRect::point(event.position))
            .and_then(|hit| model.scene.face_of(hit.actor));
        self.apply(picked, event.is_deselect())
    }

    /// Applies a pick whose face the caller already resolved.
    pub fn apply_pick(&mut self, face: FaceId, is_deselect: bool) -> PickOutcome {
        self.apply(Some(face), is_deselect)
    }

    fn apply(&mut self, picked: Option<FaceId>, is_deselect: bool) -> PickOutcome {
        let Some(model) = self.model.as_mut() else {
            return PickOutcome::default();
        };
        if let Some(face) = picked {
            tracing::debug!(%face, is_deselect, "picked face");
        }
        let outcome = selection::apply_pick(&mut model.selection, picked, is_deselect, &model.map);
        model.scene.apply_changes(&outcome.faces, &self.config.policy);
        if !outcome.is_noop() {
            tracing::info!(
                faces = model.selection.selected_faces().len(),
                volumes = model.selection.selected_volumes().len(),
                "selection changed"
            );
        }
        outcome
    }

    /// Drops the loaded model.
    pub fn unload(&mut self) {
        self.model = None;
        self.in_flight = None;
    }
}
