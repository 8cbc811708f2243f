//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal client and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, ratatui for rendering
/// - **Simulation**: Replays scripted events and records renders and alerts
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next batch of user events.
    ///
    /// The driver may consult `app` to map raw input onto the visible view
    /// (join form or roster). Returns an empty batch if nothing happened.
    fn poll_events(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Show a blocking alert over the current view. Input is suspended
    /// until it is dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert cannot be shown.
    fn alert(&mut self, app: &App, message: &str) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
