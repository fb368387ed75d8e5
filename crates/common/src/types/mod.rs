use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Query string used by the "recent"/"latest" panels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    /// Dashboard panels show five rows unless asked otherwise.
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn resolve(self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}
