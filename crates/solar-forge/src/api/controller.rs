use glam::Vec2;

use crate::api::config::{Capabilities, Populations, SceneConfig};
use crate::api::types::HostTask;
use crate::bridge::protocol::{self, FrameHeader};
use crate::core::smoothing::Smoothed;
use crate::core::state::{Effect, Expansion, Trigger};
use crate::core::time::FrameClock;
use crate::host::Page;
use crate::input::queue::InputEvent;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::{ClearColor, Renderer};
use crate::scene::SolarScene;
use crate::systems::animate::{self, FrameInputs, FrameScales};
use crate::systems::metrics::FrameMetrics;
use crate::systems::resize;

/// Owns the scene, the camera, the smoothed pointer/hover scalars and the
/// expand/collapse state. The host feeds it input events, animation-frame
/// timestamps and delayed tasks; everything visible goes out through
/// [`Page`] and [`Renderer`].
pub struct SolarController {
    config: SceneConfig,
    caps: Capabilities,
    scene: SolarScene,
    camera: PerspectiveCamera,
    clock: FrameClock,
    pointer: Smoothed<Vec2>,
    hover: Smoothed<f32>,
    state: Expansion,
    /// Viewport-normalised centre of the inline badge, Y up.
    anchor: Vec2,
    /// Bumped every time the backdrop is shown; a scheduled removal only
    /// applies to the generation it was scheduled for.
    backdrop_generation: u32,
    scene_buffer: Vec<f32>,
    frame_buffer: Vec<f32>,
    frame_counter: u32,
    metrics: FrameMetrics,
    last_scales: FrameScales,
}

impl SolarController {
    pub fn new(config: SceneConfig, caps: Capabilities) -> Self {
        let populations = Populations::for_capabilities(&caps);
        log::info!(
            "solar init: reduced_motion={} viewport_width={} populations={:?}",
            caps.reduced_motion,
            caps.viewport_width,
            populations
        );
        let scene = SolarScene::build(&populations, config.seed);
        let camera = PerspectiveCamera::new(
            config.camera.fov_deg,
            config.camera.near,
            config.camera.far,
            config.camera.base_distance,
        );
        let clock = FrameClock::new(config.max_frame_delta);
        let pointer = Smoothed::new(Vec2::ZERO, config.pointer_ease);
        let hover = Smoothed::new(0.0, config.hover_ease);
        let last_scales = animate::hover_scales(0.0, &config);

        Self {
            config,
            caps,
            scene,
            camera,
            clock,
            pointer,
            hover,
            state: Expansion::Idle,
            anchor: Vec2::ZERO,
            backdrop_generation: 0,
            scene_buffer: Vec::new(),
            frame_buffer: Vec::new(),
            frame_counter: 0,
            metrics: FrameMetrics::new(),
            last_scales,
        }
    }

    /// Upload the scene, size the output and render the first frame.
    /// With reduced motion that frame is the only one; otherwise the
    /// frame loop starts here.
    pub fn start(&mut self, page: &mut impl Page, renderer: &mut impl Renderer) {
        renderer.set_clear_color(ClearColor::TRANSPARENT);
        protocol::pack_scene(&self.scene, self.config.exposure, &mut self.scene_buffer);
        renderer.upload_scene(&self.scene_buffer);
        self.resize(page, renderer);

        if self.caps.reduced_motion {
            self.render_static(renderer);
        } else {
            self.step(0.0, page, renderer);
        }
    }

    /// Animation-frame callback. Ignored under reduced motion.
    pub fn tick(&mut self, timestamp_ms: f64, page: &mut impl Page, renderer: &mut impl Renderer) {
        if self.caps.reduced_motion {
            return;
        }
        let dt = self.clock.advance_to(timestamp_ms);
        self.frame(dt, page, renderer);
    }

    /// Advance by an explicit delta in seconds (headless driving).
    pub fn step(&mut self, dt: f32, page: &mut impl Page, renderer: &mut impl Renderer) {
        let dt = self.clock.advance(dt);
        self.frame(dt, page, renderer);
    }

    fn frame(&mut self, delta: f32, page: &mut impl Page, renderer: &mut impl Renderer) {
        let pointer = self.pointer.step();
        let hover = self.hover.step();

        self.fire(Trigger::HoverProgress(hover), page, renderer);

        let inputs = FrameInputs {
            delta,
            elapsed: self.clock.elapsed(),
            hover,
            pointer,
            anchor: self.state.is_expanded().then_some(self.anchor),
        };
        self.last_scales =
            animate::animate(&mut self.scene, &mut self.camera, &self.config, &inputs);
        self.metrics.record(
            &self.clock,
            hover,
            self.last_scales,
            self.camera.distance(),
            self.state,
        );

        self.draw(renderer);
        page.request_frame();
    }

    fn render_static(&mut self, renderer: &mut impl Renderer) {
        self.scene.graph.propagate();
        self.draw(renderer);
    }

    fn draw(&mut self, renderer: &mut impl Renderer) {
        let header = FrameHeader {
            counter: self.frame_counter,
            elapsed: self.clock.elapsed(),
            hover: self.hover.value(),
            expanded: self.state.is_expanded(),
        };
        protocol::pack_frame(&self.scene, &self.camera, header, &mut self.frame_buffer);
        renderer.draw(&self.frame_buffer);
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    pub fn handle_input(
        &mut self,
        event: InputEvent,
        page: &mut impl Page,
        renderer: &mut impl Renderer,
    ) {
        match event {
            // A static badge never expands: nothing would ever drive the
            // hover scalar across the threshold.
            InputEvent::BadgeEnter | InputEvent::BadgeLeave if self.caps.reduced_motion => {}
            InputEvent::BadgeEnter => self.fire(Trigger::BadgeEnter, page, renderer),
            InputEvent::BadgeLeave => self.fire(Trigger::BadgeLeave, page, renderer),
            InputEvent::BadgePointerMove { x, y } => {
                if let Some(p) = page.canvas_rect().normalize(x, y) {
                    self.pointer.set_target(p);
                }
            }
            InputEvent::DocumentPointerMove { x, y } => {
                if let Expansion::Expanded { .. } = self.state {
                    let inside = self.core_contains(page, Vec2::new(x, y));
                    self.fire(Trigger::CorePointer { inside }, page, renderer);
                }
            }
            InputEvent::Scroll => {
                if self.state.is_expanded() {
                    self.capture_anchor(page);
                }
            }
            InputEvent::Resize => {
                self.resize(page, renderer);
                if self.state.is_expanded() {
                    self.capture_anchor(page);
                }
                // Resizing the output clears it; the loop isn't there to repaint.
                if self.caps.reduced_motion {
                    self.draw(renderer);
                }
            }
        }
    }

    /// Delayed work handed back by the host.
    pub fn run_task(&mut self, task: HostTask, page: &mut impl Page) {
        match task {
            HostTask::RemoveBackdrop { generation } => {
                if generation == self.backdrop_generation && self.state == Expansion::Idle {
                    page.remove_backdrop();
                } else {
                    log::debug!(
                        "solar: skipping stale backdrop removal (gen {generation}, current {})",
                        self.backdrop_generation
                    );
                }
            }
        }
    }

    /// Whether a client-space point lies inside the hit radius around the anchor.
    fn core_contains(&self, page: &impl Page, point: Vec2) -> bool {
        let center = page.viewport().to_client(self.anchor);
        point.distance(center) <= self.config.hit_radius_px
    }

    fn capture_anchor(&mut self, page: &impl Page) {
        self.anchor = page.viewport().to_ndc(page.container_rect().center());
    }

    /// Resize the output to the viewport (expanded) or the inline container.
    pub fn resize(&mut self, page: &mut impl Page, renderer: &mut impl Renderer) {
        let viewport = page.viewport();
        let size = resize::target_size(self.state.is_expanded(), viewport, page.container_rect());
        let pixel_ratio = viewport.device_pixel_ratio.min(self.config.max_pixel_ratio);
        resize::apply_size(size, pixel_ratio, &mut self.camera, renderer);
    }

    fn fire(&mut self, trigger: Trigger, page: &mut impl Page, renderer: &mut impl Renderer) {
        let Some(step) = self.state.on(trigger, self.config.expand_threshold) else {
            return;
        };
        if step.next.name() != self.state.name() {
            log::info!("solar: {} -> {}", self.state.name(), step.next.name());
        } else {
            log::debug!("solar: {:?} -> {:?}", self.state, step.next);
        }
        self.state = step.next;
        for effect in step.effects {
            self.apply(*effect, page, renderer);
        }
    }

    fn apply(&mut self, effect: Effect, page: &mut impl Page, renderer: &mut impl Renderer) {
        match effect {
            Effect::RaiseHoverTarget => self.hover.set_target(1.0),
            Effect::DropHoverTarget => self.hover.set_target(0.0),
            Effect::ResetPointer => self.pointer.set_target(Vec2::ZERO),
            Effect::ScaleCanvas => page.set_canvas_scale(Some(self.config.pre_expand_scale)),
            Effect::ClearCanvasScale => page.set_canvas_scale(None),
            Effect::ShowBackdrop => {
                self.backdrop_generation = self.backdrop_generation.wrapping_add(1);
                page.show_backdrop();
            }
            Effect::FadeBackdrop => page.fade_backdrop(),
            Effect::ScheduleBackdropRemoval => page.schedule(
                HostTask::RemoveBackdrop { generation: self.backdrop_generation },
                self.config.backdrop_fade_ms,
            ),
            Effect::CaptureAnchor => self.capture_anchor(page),
            Effect::MountOverlay => page.mount_overlay(),
            Effect::UnmountOverlay => page.unmount_overlay(),
            Effect::RaiseHero => page.raise_hero(),
            Effect::RestoreHero => page.restore_hero(),
            Effect::AttachTrackers => page.attach_trackers(),
            Effect::DetachTrackers => page.detach_trackers(),
            Effect::OpaqueClear => renderer.set_clear_color(self.config.expanded_clear),
            Effect::TransparentClear => renderer.set_clear_color(ClearColor::TRANSPARENT),
            Effect::Resize => self.resize(page, renderer),
        }
    }

    pub fn state(&self) -> Expansion {
        self.state
    }

    pub fn hover(&self) -> f32 {
        self.hover.value()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer.value()
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn scene(&self) -> &SolarScene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn backdrop_generation(&self) -> u32 {
        self.backdrop_generation
    }

    pub fn last_scales(&self) -> FrameScales {
        self.last_scales
    }
}
