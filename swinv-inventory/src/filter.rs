use crate::InventoryError;

/// Publisher-based accept/reject test applied to every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PublisherFilter {
    #[default]
    All,
    /// Keep entries whose publisher contains the keyword.
    Include(String),
    /// Drop entries whose publisher contains the keyword.
    Exclude(String),
}

impl PublisherFilter {
    /// Builds the filter from the two optional keywords. Empty keywords count
    /// as not given; giving both is an error.
    pub fn from_keywords(
        include: Option<String>,
        exclude: Option<String>,
    ) -> Result<Self, InventoryError> {
        let include = include.filter(|keyword| !keyword.is_empty());
        let exclude = exclude.filter(|keyword| !keyword.is_empty());

        match (include, exclude) {
            (Some(_), Some(_)) => Err(InventoryError::ConflictingFilters),
            (Some(keyword), None) => Ok(Self::Include(keyword)),
            (None, Some(keyword)) => Ok(Self::Exclude(keyword)),
            (None, None) => Ok(Self::All),
        }
    }

    pub fn accepts(&self, publisher: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Include(keyword) => publisher.is_some_and(|p| contains_ignore_case(p, keyword)),
            Self::Exclude(keyword) => !publisher.is_some_and(|p| contains_ignore_case(p, keyword)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
