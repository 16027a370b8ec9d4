/// Episode fields as received from the provider, optional fields already
/// flattened to empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInput {
    pub number: i32,
    pub name: String,
    pub synopsis: String,
    pub still: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonInput {
    pub number: i32,
    pub episodes: Vec<EpisodeInput>,
}

#[derive(Debug, Clone)]
pub struct Episode {
    pub id: i32,
    pub number: i32,
    pub name: String,
    pub synopsis: String,
    pub still: String,
}

/// A stored season with its episodes ordered by number.
#[derive(Debug, Clone)]
pub struct Season {
    pub id: i32,
    pub number: i32,
    pub episodes: Vec<Episode>,
}
