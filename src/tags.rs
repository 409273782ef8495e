use crate::{
    config::RecommenderConfig,
    error::MetadataError,
    metadata::{
        extract_by_role, extract_names, extract_top_k_names,
        item::{Item, RawItem},
        normalize_token,
    },
};

/// Composes one ordered tag sequence per item.
///
/// Order: overview words (lower-cased, whitespace split), genres, keywords,
/// the first `cast_limit` cast members, then crew members with `crew_role`.
/// Name-like fields are collapsed into single tokens. Nothing is
/// deduplicated, so a repeated token weighs more in its count vector.
#[derive(Debug, Clone)]
pub struct TagComposer {
    cast_limit: usize,
    crew_role: String,
}

impl TagComposer {
    pub fn new(cast_limit: usize, crew_role: impl Into<String>) -> Self {
        Self {
            cast_limit,
            crew_role: crew_role.into(),
        }
    }

    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(config.cast_limit, config.crew_role.clone())
    }

    /// Build an [`Item`] from raw metadata.
    ///
    /// Fails closed: any missing or malformed field rejects the whole item.
    pub fn compose(&self, raw: &RawItem) -> Result<Item, MetadataError> {
        let id = raw.require_id()?;
        let title = raw.require_title()?;
        let overview = RawItem::require(&raw.overview, "overview")?;
        let genres = extract_names("genres", RawItem::require(&raw.genres, "genres")?)?;
        let keywords = extract_names("keywords", RawItem::require(&raw.keywords, "keywords")?)?;
        let cast = extract_top_k_names("cast", RawItem::require(&raw.cast, "cast")?, self.cast_limit)?;
        let crew = extract_by_role("crew", RawItem::require(&raw.crew, "crew")?, &self.crew_role)?;

        let mut tags: Vec<String> = overview.split_whitespace().map(str::to_lowercase).collect();
        tags.extend(
            genres
                .iter()
                .chain(&keywords)
                .chain(&cast)
                .chain(&crew)
                .map(|name| normalize_token(name))
                .filter(|token| !token.is_empty()),
        );

        Ok(Item {
            id,
            title: title.to_string(),
            tags,
        })
    }
}

impl Default for TagComposer {
    fn default() -> Self {
        Self::from_config(&RecommenderConfig::default())
    }
}
