mod grid_config;
mod grid_frame_builder;
mod grid_style;

pub use grid_config::{GRID_CONFIG_JSON_SCHEMA_V1, GridConfig, GridConfigJsonContractV1};
pub use grid_frame_builder::GridFrameBuilder;
pub use grid_style::{GridStyle, RenderParams};
