//! Session steps and acquired state.

/// Install sequence states, in order. Only `Launch` is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    AwaitGreeting,
    ListTabs,
    RequestUpload,
    ChunkLoop,
    FinishUpload,
    Install,
    RemoveUploadActor,
    Launch,
    Closed,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Connect => "connect",
            Step::AwaitGreeting => "await_greeting",
            Step::ListTabs => "list_tabs",
            Step::RequestUpload => "request_upload",
            Step::ChunkLoop => "chunk_loop",
            Step::FinishUpload => "finish_upload",
            Step::Install => "install",
            Step::RemoveUploadActor => "remove_upload_actor",
            Step::Launch => "launch",
            Step::Closed => "closed",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields acquired as the session advances. Each is set by the step that
/// introduces it and stays valid until the connection closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Last step entered.
    pub step: Option<Step>,
    pub webapps_actor: Option<String>,
    pub upload_actor: Option<String>,
    /// App id as reported by the device's install reply.
    pub app_id: Option<String>,
}
