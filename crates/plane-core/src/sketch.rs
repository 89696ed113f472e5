//! Platform-neutral sketch state: camera, controls, scene, the tracked media
//! plane and the two application hooks. Frontends feed it resize, pointer
//! and frame-time events and read back uniforms for drawing.

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::config::SketchConfig;
use crate::constants::*;
use crate::error::Result;
use crate::media::{MediaPlane, UvTransform};
use crate::pointer::PointerMapper;
use crate::scene::{MeshId, Scene, SceneObject, Transform};
use crate::uniforms::ObjectUniforms;
use crate::viewport::{ElementBounds, MeshScale, ViewportMapper, ViewportPixelSize};
use glam::{Vec2, Vec3};

pub type ScaleHook = Box<dyn FnMut(MeshScale)>;
pub type UvHook = Box<dyn FnMut(Vec2)>;

pub struct Sketch {
    config: SketchConfig,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    scene: Scene,
    media: MediaPlane,
    cube: Option<MeshId>,
    mapper: ViewportMapper,
    pointer: PointerMapper,
    hover_uv: Vec2,
    hover_target: f32,
    hover_strength: f32,
    time: f32,
    on_scale: Option<ScaleHook>,
    on_uv: Option<UvHook>,
}

impl Sketch {
    pub fn new(config: SketchConfig, viewport: ViewportPixelSize, bounds: ElementBounds) -> Result<Self> {
        let aspect = viewport.aspect()?;
        let camera = PerspectiveCamera::looking_at_origin(
            config.fov_radians(),
            aspect,
            config.camera_distance,
            config.near,
            config.far,
        );
        let controls = OrbitControls::new(&camera);
        let mapper = ViewportMapper::new(config.fov_radians(), config.camera_distance, viewport, bounds)?;

        let mut scene = Scene::new();
        let scale = mapper.scale();
        let plane = scene.add_plane(Transform::default().with_scale(Vec3::new(scale.x, scale.y, 1.0)), true);
        let cube = config
            .with_cube
            .then(|| scene.add_cuboid(Transform::from_translation(Vec3::from(CUBE_OFFSET)), false, CUBE_COLOR));

        let extents = mapper.extents();
        log::info!(
            "[sketch] viewport={}x{} extents=({:.3},{:.3}) scale=({:.3},{:.3}) cube={}",
            viewport.width,
            viewport.height,
            extents.width,
            extents.height,
            scale.x,
            scale.y,
            cube.is_some()
        );

        Ok(Self {
            config,
            camera,
            controls,
            scene,
            media: MediaPlane::new(plane),
            cube,
            mapper,
            pointer: PointerMapper::new(plane),
            hover_uv: Vec2::splat(0.5),
            hover_target: 0.0,
            hover_strength: 0.0,
            time: 0.0,
            on_scale: None,
            on_uv: None,
        })
    }

    /// Called with every new mesh scale (after resizes and bounds changes).
    pub fn on_scale(&mut self, hook: impl FnMut(MeshScale) + 'static) {
        self.on_scale = Some(Box::new(hook));
    }

    /// Called with the plane UV for every qualifying pointer move.
    pub fn on_uv(&mut self, hook: impl FnMut(Vec2) + 'static) {
        self.on_uv = Some(Box::new(hook));
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn plane(&self) -> MeshId {
        self.media.mesh()
    }

    pub fn cube(&self) -> Option<MeshId> {
        self.cube
    }

    pub fn viewport(&self) -> ViewportPixelSize {
        self.mapper.viewport()
    }

    pub fn mapper(&self) -> &ViewportMapper {
        &self.mapper
    }

    pub fn mesh_scale(&self) -> MeshScale {
        self.mapper.scale()
    }

    pub fn hover_strength(&self) -> f32 {
        self.hover_strength
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Viewport resize with freshly read element bounds. Degenerate input
    /// keeps the last good scale, and the camera keeps its aspect with it.
    pub fn resize(&mut self, viewport: ViewportPixelSize, bounds: ElementBounds) -> MeshScale {
        match self.mapper.resize(viewport, bounds) {
            Ok(scale) => {
                self.camera.aspect = self.mapper.aspect();
                self.apply_scale(scale);
            }
            Err(e) => log::warn!("[sketch] resize ignored, keeping previous scale: {e}"),
        }
        self.mapper.scale()
    }

    pub fn set_element_bounds(&mut self, bounds: ElementBounds) -> MeshScale {
        match self.mapper.set_bounds(bounds) {
            Ok(scale) => self.apply_scale(scale),
            Err(e) => log::warn!("[sketch] bounds change kept previous scale: {e}"),
        }
        self.mapper.scale()
    }

    /// Move the camera's rest position along its view axis. Extents and mesh
    /// scale follow.
    pub fn set_camera_distance(&mut self, distance: f32) -> MeshScale {
        match self.mapper.set_distance(distance) {
            Ok(scale) => {
                self.config.camera_distance = distance;
                self.camera = PerspectiveCamera::looking_at_origin(
                    self.config.fov_radians(),
                    self.camera.aspect,
                    distance,
                    self.config.near,
                    self.config.far,
                );
                self.controls = OrbitControls::new(&self.camera);
                self.apply_scale(scale);
            }
            Err(e) => log::warn!("[sketch] distance change ignored: {e}"),
        }
        self.mapper.scale()
    }

    pub fn set_image_resolution(&mut self, width: u32, height: u32) {
        self.media.set_image_resolution(width, height);
        log::info!("[sketch] image resolution {}x{}", width, height);
    }

    fn apply_scale(&mut self, scale: MeshScale) {
        if scale.is_empty() {
            log::debug!("[sketch] tracked element has no area; plane hidden");
        }
        if let Err(e) = self.scene.set_scale(self.media.mesh(), scale) {
            log::error!("[sketch] {e}");
            return;
        }
        if let Some(hook) = &mut self.on_scale {
            hook(scale);
        }
    }

    /// One pointer-move sample in viewport pixels. Returns the forwarded UV.
    pub fn pointer_move(&mut self, screen: Vec2) -> Option<Vec2> {
        let uv = self
            .pointer
            .pick(screen, self.mapper.viewport(), &self.camera, &self.scene);
        match uv {
            Some(uv) => {
                self.hover_uv = uv;
                self.hover_target = 1.0;
                if let Some(hook) = &mut self.on_uv {
                    hook(uv);
                }
            }
            None => self.hover_target = 0.0,
        }
        uv
    }

    pub fn orbit_drag(&mut self, dx: f32, dy: f32) {
        let viewport = self.mapper.viewport();
        self.controls.rotate(dx, dy, viewport);
    }

    pub fn dolly(&mut self, delta: f32) {
        self.controls.dolly(delta);
    }

    pub fn reset_view(&mut self) {
        self.controls.reset();
    }

    /// Per-frame update: orbit easing, hover fade, shader time.
    pub fn advance(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() { dt_sec.clamp(0.0, 0.25) } else { 0.0 };
        self.time += dt;
        self.controls.update(&mut self.camera);

        let rate = if self.hover_target > self.hover_strength {
            HOVER_RISE_PER_SEC
        } else {
            HOVER_FALL_PER_SEC
        };
        let step = rate * dt;
        let diff = self.hover_target - self.hover_strength;
        self.hover_strength += diff.clamp(-step, step);
    }

    pub fn uv_transform(&self) -> UvTransform {
        self.media.uv_transform(self.mapper.bounds())
    }

    pub fn uniforms_for(&self, object: &SceneObject) -> ObjectUniforms {
        let is_media = object.kind.is_mesh(self.media.mesh());
        let fit = if is_media { self.uv_transform() } else { UvTransform::IDENTITY };
        ObjectUniforms {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            model: object.transform.matrix().to_cols_array_2d(),
            tint: object.tint,
            uv_scale: fit.scale.to_array(),
            uv_offset: fit.offset.to_array(),
            hover_uv: self.hover_uv.to_array(),
            hover_strength: if is_media { self.hover_strength } else { 0.0 },
            time: self.time,
        }
    }
}
