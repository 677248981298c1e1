#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Allow,
    Deny,
}

impl RenderableVerdict {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdict::Allow => "ALLOW",
            RenderableVerdict::Deny => "DENY",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub predicate: String,
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub policy: String,
    pub profile: Option<String>,
    pub enforce_encoded_payload: bool,
    pub predicates_evaluated: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub failed_predicates: Vec<String>,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}
