use rota_github_triage::priority::PriorityTag;

pub const STATUS_NOT_STARTED: &str = "Not Started";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_DONE: &str = "Done";
pub const STATUS_WONT_FIX: &str = "Won't Fix";

#[derive(Debug, Clone, Default)]
/// Read-only board configuration, constructed once at process start and
/// passed by reference to every component.
pub struct BoardConfig {
    pub board_id: Option<String>,
    pub priority_field_id: Option<String>,
    pub status_field_id: Option<String>,
    pub priority_options: PriorityOptionMap,
    pub status_options: StatusOptionMap,
}

#[derive(Debug, Clone, Default)]
/// Priority tag to board option id mapping.
pub struct PriorityOptionMap {
    pub p0: Option<String>,
    pub p1: Option<String>,
    pub p2: Option<String>,
    pub p3: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// Status name to board option id mapping.
pub struct StatusOptionMap {
    pub not_started: Option<String>,
    pub in_progress: Option<String>,
    pub done: Option<String>,
    pub wont_fix: Option<String>,
}

impl BoardConfig {
    /// Reads the board configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration through a key lookup; blank values are
    /// treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            board_id: read("BOARD_ID"),
            priority_field_id: read("PRIORITY_FIELD_ID"),
            status_field_id: read("STATUS_FIELD_ID"),
            priority_options: PriorityOptionMap {
                p0: read("BOARD_OPTION_P0"),
                p1: read("BOARD_OPTION_P1"),
                p2: read("BOARD_OPTION_P2"),
                p3: read("BOARD_OPTION_P3"),
            },
            status_options: StatusOptionMap {
                not_started: read("BOARD_STATUS_NOT_STARTED"),
                in_progress: read("BOARD_STATUS_IN_PROGRESS"),
                done: read("BOARD_STATUS_DONE"),
                wont_fix: read("BOARD_STATUS_WONT_FIX"),
            },
        }
    }

    /// Board sync requires at minimum a board id and a priority field id;
    /// anything less degrades those features to logged no-ops.
    pub fn is_valid(&self) -> bool {
        self.board_id.is_some() && self.priority_field_id.is_some()
    }

    pub fn priority_option_id(&self, tag: PriorityTag) -> Option<&str> {
        match tag {
            PriorityTag::P0 => self.priority_options.p0.as_deref(),
            PriorityTag::P1 => self.priority_options.p1.as_deref(),
            PriorityTag::P2 => self.priority_options.p2.as_deref(),
            PriorityTag::P3 => self.priority_options.p3.as_deref(),
        }
    }

    pub fn status_option_id(&self, status: &str) -> Option<&str> {
        match status {
            STATUS_NOT_STARTED => self.status_options.not_started.as_deref(),
            STATUS_IN_PROGRESS => self.status_options.in_progress.as_deref(),
            STATUS_DONE => self.status_options.done.as_deref(),
            STATUS_WONT_FIX => self.status_options.wont_fix.as_deref(),
            _ => None,
        }
    }
}
