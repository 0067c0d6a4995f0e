//! Error types for geometry, routing and diagram assembly.

/// Errors raised by the wiring core.
///
/// Geometry and bounds failures are never clamped or retried here; they
/// propagate to whoever asked for the wire, which decides whether to skip it
/// or abort the whole diagram.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WiringError {
    /// A grid cell outside `[0, width) x [0, height)` was set or queried.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// A cell was painted twice while the grid rejects overlap.
    #[error("pixel ({x}, {y}) is already painted (while painting '{owner}')")]
    CellAlreadyPainted { x: i64, y: i64, owner: String },

    /// A departure direction string could not be recognised.
    #[error("invalid departure direction '{value}': expected up, down, left or right")]
    InvalidDirection { value: String },

    /// A rotation other than 0, 90, 180 or 270 degrees.
    #[error("unsupported rotation of {degrees} degrees: expected 0, 90, 180 or 270")]
    UnsupportedRotation { degrees: i32 },

    /// A pin that needs a wire has no side to leave the component from.
    #[error("pin {pin} of '{component}' has no departure direction")]
    MissingDirection { component: String, pin: u32 },

    /// A destination names a physical pin the controller does not have.
    #[error("controller '{controller}' has no pin {pin}")]
    UnknownControllerPin { controller: String, pin: u32 },

    /// A signal pin was left without a controller pin to connect to.
    #[error("pin {pin} of '{component}' needs a controller pin but none was given")]
    UnresolvedDestination { component: String, pin: u32 },

    /// A project names a component the catalog does not know.
    #[error("unknown component kind '{kind}'")]
    UnknownComponent { kind: String },

    /// Router or grid settings that cannot produce a route.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, WiringError>;
