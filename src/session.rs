/// Per-process context shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Token cached after the first lookup or prompt.
    pub token: Option<String>,
    /// Version token the last successful write was conditioned on.
    pub file_sha: Option<String>,
}
