// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the line chart engine and its host-facing API.

pub mod animation;
pub mod chart;
pub mod dataset;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod recording;
pub mod store;
pub mod surface;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use animation::MaxAnimator;
pub use chart::{Chart, ChartError, ChartOptions, ChartTarget};
pub use dataset::{Column, ColumnType, Dataset, DatasetError};
pub use geometry::{compute_boundaries, format_axis_label, is_hovered, Boundary};
pub use host::{FrameQueue, FrameScheduler, PointerEvent, PointerEventKind, PointerListeners, SurfaceEvents};
pub use recording::{RecordingSurface, RecordingTooltip};
pub use store::StateStore;
pub use surface::Surface;
pub use theme::Theme;
pub use tooltip::{TooltipContent, TooltipItem, TooltipPresenter};
pub use types::{BoundingRect, Layout, Point, PointerState, TooltipPosition};
