use crate::comment_service::CommentService;
use crate::group_service::GroupService;
use crate::sort::SortProperties;
use crate::summary::RequestsSummary;
use crate::task_service::TaskService;

/// Engine type tag the dashboard uses to select this adapter.
pub const ENGINE_TYPE: &str = "pam";

/// Bundle of all adapter services for one engine type. Construction wires
/// the shared lookup tables; the services themselves stay stateless.
#[derive(Debug, Clone, Default)]
pub struct KieEngine {
    pub tasks: TaskService,
    pub comments: CommentService,
    pub groups: GroupService,
    pub summaries: RequestsSummary,
}

impl KieEngine {
    #[must_use]
    pub fn new() -> Self {
        let groups = GroupService;
        Self {
            tasks: TaskService::new(SortProperties::default()),
            comments: CommentService::new(groups),
            groups,
            summaries: RequestsSummary,
        }
    }

    #[must_use]
    pub fn engine_type(&self) -> &'static str {
        ENGINE_TYPE
    }
}
