use crate::core::geometry::indexed::WeldedMesh;
use crate::core::geometry::mesh::{EmptyMeshError, Mesh};
use crate::core::geometry::primitives::Primitives;
use crate::core::geometry::transform::{DegenerateDirectionError, Transform};
use crate::core::models::model::Model;
use crate::engine::assembly;
use crate::engine::config::{Representation, SceneConfig};
use crate::engine::error::PipelineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::synthesis::{atoms, backbone, bonds, ribbon};
use crate::engine::weld;
use tracing::{debug, info, instrument};

/// The assembled scene together with its welded form.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Flat triangle list after symmetry expansion and normalization.
    pub mesh: Mesh,
    pub welded: WeldedMesh,
    /// Transform applied by normalization; identity when disabled.
    pub normalization: Transform,
}

fn synthesize(
    representation: Representation,
    model: &Model,
    config: &SceneConfig,
    primitives: &Primitives,
) -> Result<Mesh, DegenerateDirectionError> {
    let mesh = match representation {
        Representation::BallAndStick => {
            let placed = atoms::ball_and_stick_atoms(model, &config.synthesis);
            let mut mesh = atoms::ball_and_stick_spheres(&placed, &config.synthesis, primitives);
            mesh.add(&bonds::bond_mesh(
                &placed,
                model.connections(),
                &config.synthesis,
                primitives,
            )?);
            mesh
        }
        Representation::SpaceFilling => atoms::space_filling(model, primitives),
        Representation::Backbone => backbone::backbone_mesh(model, primitives)?,
        Representation::Ribbon => ribbon::ribbon_mesh(model, config.palette.colormap()),
    };
    Ok(mesh)
}

/// Builds the complete scene for `model`.
///
/// Representations are synthesized in configuration order and concatenated. With
/// `apply_symmetry` set, the scene is replicated once per non-identity operator of the
/// model. The result is then fitted into the bi-unit cube (unless disabled) and welded.
///
/// # Errors
///
/// Returns [`PipelineError::Geometry`] when a bond or stick joins coincident points and
/// [`PipelineError::EmptyScene`] when normalization is requested for a scene without
/// triangles. With normalization disabled an empty scene welds to empty tables.
#[instrument(skip_all, name = "build_workflow")]
pub fn run(
    model: &Model,
    config: &SceneConfig,
    reporter: &ProgressReporter,
) -> Result<Scene, PipelineError> {
    let custom;
    let primitives = if config.resolution.is_default() {
        Primitives::shared()
    } else {
        let r = config.resolution;
        custom = Primitives::new(r.sphere_lat_bands, r.sphere_lon_bands, r.cylinder_sides);
        &custom
    };

    // === Phase 1: Per-representation synthesis ===
    reporter.report(Progress::PhaseStart { name: "Synthesis" });
    info!(
        atoms = model.atom_count(),
        chains = model.chains().len(),
        connections = model.connections().len(),
        "Synthesizing scene."
    );
    reporter.report(Progress::TaskStart {
        total_steps: config.representations.len() as u64,
    });
    let mut parts = Vec::with_capacity(config.representations.len());
    for &representation in &config.representations {
        let part = synthesize(representation, model, config, primitives)?;
        debug!(%representation, triangles = part.len(), "Synthesized representation.");
        parts.push(part);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Assembly ===
    let (mesh, normalization) = reporter.phase("Assembly", || {
        let mut mesh = assembly::concatenate(&parts);
        drop(parts);

        if config.apply_symmetry && !model.symmetry().is_empty() {
            mesh = assembly::expand_symmetry(&mesh, model.symmetry());
            info!(
                operators = model.symmetry().len(),
                triangles = mesh.len(),
                "Applied symmetry operators."
            );
        }

        let normalization = if config.normalize {
            debug!(offset = ?assembly::center_offset(&mesh)?, "Normalizing scene.");
            assembly::normalize(&mut mesh)?
        } else {
            Transform::identity()
        };
        Ok::<_, EmptyMeshError>((mesh, normalization))
    })?;

    // === Phase 3: Welding ===
    let welded = reporter.phase("Welding", || weld::weld(&mesh));
    info!(
        triangles = mesh.len(),
        vertices = welded.vertices.len(),
        colors = welded.colors.len(),
        "Scene welded."
    );
    reporter.report(Progress::Message(format!(
        "{} triangles, {} vertices, {} colors",
        welded.faces.len(),
        welded.vertices.len(),
        welded.colors.len()
    )));

    Ok(Scene {
        mesh,
        welded,
        normalization,
    })
}
