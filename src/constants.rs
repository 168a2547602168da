//! Shared crate-wide constants.

/// Key value reported for the Escape key by current keyboard sources.
pub const ESCAPE_KEY: &str = "Escape";

/// Historical Escape key name still emitted by some older input sources.
///
/// Treated exactly like [`ESCAPE_KEY`] when classifying key-down events.
pub const LEGACY_ESCAPE_KEY: &str = "Esc";

/// Name of the dismissal event emitted for clicks outside the overlay surface.
pub const OUTSIDE_CLICK_EVENT: &str = "outside-click";

/// Name of the dismissal event emitted when Escape is pressed while open.
pub const ESCAPE_PRESS_EVENT: &str = "escape-press";

/// Tag used for the overlay host element.
pub const HOST_TAG: &str = "overlay-host";

/// Part names of the three visual zones built inside every host.
///
/// `overlay` is the presentational surface boundary: an interaction whose
/// composed path contains it counts as "inside".
pub const BACKDROP_PART: &str = "backdrop";
pub const OVERLAY_PART: &str = "overlay";
pub const CONTENT_PART: &str = "content";
