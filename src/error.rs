//! Error types for template rendering.
//!
//! Uses thiserror for derive macros. Protocol mismatches between generated
//! code and the runtime (attribute or section calls out of order) are not
//! represented here: they panic, since no caller can recover from them.

use thiserror::Error;

/// Main error type for render operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing to an `std::io` destination failed.
    #[error("failed to write template output: {0}")]
    Io(#[from] std::io::Error),

    /// Writing to a `fmt::Write` destination failed.
    #[error("failed to format template output")]
    Fmt(#[from] std::fmt::Error),

    /// A failure raised by the template body itself, passed through as-is.
    #[error(transparent)]
    Body(#[from] anyhow::Error),

    /// The render was cancelled before the body completed.
    #[error("render was cancelled")]
    Cancelled,

    /// A section with this name was already defined by the page.
    #[error("section '{0}' is already defined")]
    SectionAlreadyDefined(String),

    /// A layout required a section the page did not define.
    #[error("section '{0}' is not defined")]
    SectionNotDefined(String),

    /// `render_body` or a section lookup was used outside a layout.
    #[error("page body and sections can only be rendered from a layout")]
    NotInLayout,

    /// A layout finished without rendering the page body.
    #[error("layout did not render the page body")]
    LayoutBodyNotRendered,

    /// A nested template suspended while being written synchronously.
    #[error("nested template suspended during a synchronous write; use write_template_async")]
    NestedSuspended,

    /// A layout was set after the page already wrote output.
    #[error("layout must be set before the page writes any output")]
    LayoutAfterOutput,

    /// Invalid or unreadable render configuration.
    #[error("{0}")]
    Config(String),
}

/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
