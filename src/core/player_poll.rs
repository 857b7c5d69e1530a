use serde::{Deserialize, Serialize};

/// Vote tallies of the catalog's suggested-player-count poll for one count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCountPoll {
    /// Player count label, e.g. `3` or `8+`
    pub label: String,

    #[serde(default)]
    pub best: u32,

    #[serde(default)]
    pub recommended: u32,

    #[serde(default)]
    pub not_recommended: u32,
}

impl PlayerCountPoll {
    pub fn new(label: impl Into<String>, best: u32, recommended: u32, not_recommended: u32) -> Self {
        Self {
            label: label.into(),
            best,
            recommended,
            not_recommended,
        }
    }

    /// Whether positive votes outweigh negative ones for this count.
    ///
    /// True when `best > not_recommended` or when `best + recommended`
    /// exceeds `factor * not_recommended`.
    pub fn is_recommended(&self, factor: u32) -> bool {
        let positive = u64::from(self.best) + u64::from(self.recommended);
        let negative = u64::from(factor) * u64::from(self.not_recommended);
        self.best > self.not_recommended || positive > negative
    }
}
