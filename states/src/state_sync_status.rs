/// Where a compute stands relative to its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered, never run.
    #[default]
    Init,
    /// Ran, result not yet synced back (or the run produced nothing).
    Pending,
    /// A dependency changed since the last run.
    Dirty,
    /// Result synced and up to date.
    Clean,
}

impl StateSyncStatus {
    pub fn needs_run(self) -> bool {
        matches!(self, Self::Init | Self::Dirty)
    }
}
