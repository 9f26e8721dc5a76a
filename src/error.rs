//! Error types for folio.
//!
//! Nothing here is fatal to the page as a whole: a GPU failure leaves the
//! page without particles, a bad navigation target is ignored, and a broken
//! preferences file falls back to defaults.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors from loading configuration, building the page, or storing
/// preferences.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write a file.
    Io(std::io::Error),
    /// File contents were not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// Two sections share an identifier.
    DuplicateSection(String),
    /// A navigation link points at a section that does not exist.
    UnknownLinkTarget(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "Invalid JSON: {}", e),
            ConfigError::DuplicateSection(id) => write!(f, "Duplicate section id '{}'", id),
            ConfigError::UnknownLinkTarget(id) => {
                write!(f, "Navigation link targets unknown section '{}'", id)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// A navigation request that cannot be honoured. Callers treat it as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// No section has this identifier.
    UnknownSection(String),
    /// No navigation link at this index.
    UnknownLink(usize),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::UnknownSection(id) => write!(f, "No section with id '{}'", id),
            NavError::UnknownLink(index) => write!(f, "No navigation link at index {}", index),
        }
    }
}

impl std::error::Error for NavError {}

/// Top-level errors for running the page.
#[derive(Debug)]
pub enum FolioError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// Configuration could not be loaded or is inconsistent.
    Config(ConfigError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// There is no drawing surface to animate.
    MissingSurface,
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolioError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            FolioError::Window(e) => write!(f, "Failed to create window: {}", e),
            FolioError::Config(e) => write!(f, "Configuration error: {}", e),
            FolioError::Gpu(e) => write!(f, "GPU error: {}", e),
            FolioError::MissingSurface => write!(f, "No drawing surface available"),
        }
    }
}

impl std::error::Error for FolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FolioError::EventLoop(e) => Some(e),
            FolioError::Window(e) => Some(e),
            FolioError::Config(e) => Some(e),
            FolioError::Gpu(e) => Some(e),
            FolioError::MissingSurface => None,
        }
    }
}

impl From<winit::error::EventLoopError> for FolioError {
    fn from(e: winit::error::EventLoopError) -> Self {
        FolioError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for FolioError {
    fn from(e: winit::error::OsError) -> Self {
        FolioError::Window(e)
    }
}

impl From<ConfigError> for FolioError {
    fn from(e: ConfigError) -> Self {
        FolioError::Config(e)
    }
}

impl From<GpuError> for FolioError {
    fn from(e: GpuError) -> Self {
        FolioError::Gpu(e)
    }
}
