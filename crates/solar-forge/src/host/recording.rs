//! Recording test doubles for [`Page`] and [`Renderer`].

use crate::api::types::{HostTask, Rect, RootFlag, Viewport};
use crate::renderer::traits::{ClearColor, Renderer};

use super::Page;

#[derive(Debug, Clone, PartialEq)]
pub enum PageCall {
    SetCanvasScale(Option<f32>),
    ShowBackdrop,
    FadeBackdrop,
    RemoveBackdrop,
    MountOverlay,
    UnmountOverlay,
    RaiseHero,
    RestoreHero,
    AttachTrackers,
    DetachTrackers,
    Schedule(HostTask, u32),
    RequestFrame,
    SetRootFlag(RootFlag),
}

/// Simulated document. Counts live elements and listeners so duplicate
/// creation shows up as a count above one.
#[derive(Debug, Clone)]
pub struct RecordingPage {
    pub viewport: Viewport,
    pub container: Rect,
    pub calls: Vec<PageCall>,
    pub overlays: usize,
    pub backdrops: usize,
    pub listeners: usize,
    pub canvas_in_overlay: bool,
    pub canvas_scale: Option<f32>,
    pub hero_raised: bool,
    pub root_flags: Vec<RootFlag>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(1280.0, 800.0, 1.0),
            container: Rect::new(880.0, 200.0, 300.0, 300.0),
            calls: Vec::new(),
            overlays: 0,
            backdrops: 0,
            listeners: 0,
            canvas_in_overlay: false,
            canvas_scale: None,
            hero_raised: false,
            root_flags: Vec::new(),
        }
    }

    pub fn count(&self, call: &PageCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn index_of(&self, call: &PageCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn scheduled(&self) -> Vec<(HostTask, u32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PageCall::Schedule(task, delay) => Some((*task, *delay)),
                _ => None,
            })
            .collect()
    }

    pub fn frame_requests(&self) -> usize {
        self.count(&PageCall::RequestFrame)
    }
}

impl Page for RecordingPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn container_rect(&self) -> Rect {
        self.container
    }

    fn canvas_rect(&self) -> Rect {
        if self.canvas_in_overlay {
            Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
        } else {
            self.container
        }
    }

    fn set_canvas_scale(&mut self, scale: Option<f32>) {
        self.canvas_scale = scale;
        self.calls.push(PageCall::SetCanvasScale(scale));
    }

    fn show_backdrop(&mut self) {
        self.backdrops = 1;
        self.calls.push(PageCall::ShowBackdrop);
    }

    fn fade_backdrop(&mut self) {
        self.calls.push(PageCall::FadeBackdrop);
    }

    fn remove_backdrop(&mut self) {
        self.backdrops = 0;
        self.calls.push(PageCall::RemoveBackdrop);
    }

    fn mount_overlay(&mut self) {
        self.overlays += 1;
        self.canvas_in_overlay = true;
        self.calls.push(PageCall::MountOverlay);
    }

    fn unmount_overlay(&mut self) {
        self.overlays = self.overlays.saturating_sub(1);
        self.canvas_in_overlay = false;
        self.calls.push(PageCall::UnmountOverlay);
    }

    fn raise_hero(&mut self) {
        self.hero_raised = true;
        self.calls.push(PageCall::RaiseHero);
    }

    fn restore_hero(&mut self) {
        self.hero_raised = false;
        self.calls.push(PageCall::RestoreHero);
    }

    fn attach_trackers(&mut self) {
        // scroll + document pointermove
        self.listeners += 2;
        self.calls.push(PageCall::AttachTrackers);
    }

    fn detach_trackers(&mut self) {
        self.listeners = self.listeners.saturating_sub(2);
        self.calls.push(PageCall::DetachTrackers);
    }

    fn schedule(&mut self, task: HostTask, delay_ms: u32) {
        self.calls.push(PageCall::Schedule(task, delay_ms));
    }

    fn request_frame(&mut self) {
        self.calls.push(PageCall::RequestFrame);
    }

    fn set_root_flag(&mut self, flag: RootFlag) {
        self.root_flags.push(flag);
        self.calls.push(PageCall::SetRootFlag(flag));
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub sizes: Vec<(u32, u32, f32)>,
    pub clears: Vec<ClearColor>,
    pub uploads: Vec<Vec<f32>>,
    pub draws: usize,
    pub last_frame: Vec<f32>,
}

impl Renderer for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.sizes.push((width, height, pixel_ratio));
    }

    fn set_clear_color(&mut self, color: ClearColor) {
        self.clears.push(color);
    }

    fn upload_scene(&mut self, scene: &[f32]) {
        self.uploads.push(scene.to_vec());
    }

    fn draw(&mut self, frame: &[f32]) {
        self.draws += 1;
        self.last_frame = frame.to_vec();
    }
}
