//! Window host: runs a [`Page`] inside a winit window.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::PageConfig;
use crate::error::FolioError;
use crate::gpu::GpuState;
use crate::input::{Input, PageEvent};
use crate::page::Page;
use crate::solo::NavEvent;
use crate::surface::{DrawList, Surface};
use crate::theme::Preferences;

pub struct App {
    page: Page,
    input: Input,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    draw_list: DrawList,
    title: String,
    error: Option<FolioError>,
}

impl App {
    pub fn new(config: PageConfig) -> Result<Self, FolioError> {
        let preferences = Preferences::load(&config.preferences);
        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let page = Page::new(config, preferences, viewport)?;
        Ok(Self {
            page,
            input: Input::new(),
            window: None,
            gpu_state: None,
            draw_list: DrawList::new(viewport.x, viewport.y),
            title: String::new(),
            error: None,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_title(&mut self) {
        let Some(window) = &self.window else { return };
        let base = &self.page.config().window.title;
        let section = self
            .page
            .navigator()
            .active_section()
            .map(|id| id.as_str())
            .unwrap_or("-");
        let title = if self.page.has_backdrop() {
            format!("{base} - {section} - {:.0} fps", self.page.clock().fps())
        } else {
            format!("{base} - {section}")
        };
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.page.frame(&mut self.draw_list, now);

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.draw_list, self.page.theme()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => tracing::error!(error = ?e, "render error"),
            }
        }

        if self.page.is_animating() {
            self.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let settings = &self.page.config().window;
        let window_attrs = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(settings.width, settings.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "could not create window");
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let size = window.inner_size();
        let viewport = Vec2::new(size.width as f32, size.height as f32);
        let now = Instant::now();
        self.draw_list.resize(viewport.x, viewport.y);
        self.page.resize(viewport, now);
        self.page.start(now);

        self.gpu_state = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu_state) => Some(gpu_state),
            Err(e) => {
                tracing::warn!(error = %e, "GPU unavailable");
                None
            }
        };

        let surface = self.gpu_state.as_ref().map(|_| viewport);
        if self.page.attach_surface(surface, &mut rand::thread_rng()) {
            window.set_cursor_visible(false);
        }
        self.update_title();
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let now = Instant::now();
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                let size = Vec2::new(physical_size.width as f32, physical_size.height as f32);
                self.draw_list.resize(size.x, size.y);
                self.page.handle(PageEvent::Resized(size), now);
                self.request_redraw();
            }
            WindowEvent::Occluded(occluded) => {
                self.page.set_visible(!occluded);
                if !occluded {
                    self.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                if let Some(page_event) = self.input.handle_event(&event) {
                    let was_animating = self.page.is_animating();
                    self.page.handle(page_event, now);
                    if !was_animating {
                        self.request_redraw();
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        for event in self.page.poll(now) {
            tracing::debug!(?event, "navigation");
            if let NavEvent::ScrollStarted { .. } = event {
                self.request_redraw();
            }
        }
        self.update_title();

        match self.page.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Open the window and run until it is closed.
pub fn run(config: PageConfig) -> Result<(), FolioError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
