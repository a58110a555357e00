//! Import behavior switches.

/// Options for a reconciliation run.
///
/// Both switches only affect dashboard imports; datasource imports ignore
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Replace an existing dashboard with the same identity
    pub overwrite: bool,
    /// Recreate the source folder on the destination and import into it
    pub preserve_folders: bool,
}

impl ImportOptions {
    /// Creates options with both switches off
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overwrite switch
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets the folder preservation switch
    #[must_use]
    pub const fn with_preserve_folders(mut self, preserve: bool) -> Self {
        self.preserve_folders = preserve;
        self
    }
}
