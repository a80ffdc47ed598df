//! Input/output operations and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Constants, defaults and the generation configuration
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// JSON export of level data
pub mod export;
/// PNG rendering of grids and levels
pub mod image;
/// Progress bars for batch generation
pub mod progress;
/// Stage-by-stage GIF visualization
pub mod visualization;
