use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigCompilerError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config root must be a mapping")]
    RootNotMapping,
    #[error("config modifications must be a list")]
    ModificationsNotList,
    #[error("each modification must be a mapping")]
    ModificationNotMapping,
    #[error("scope must be a mapping or a path list")]
    ScopeNotMappingOrList,
    #[error("scope must include a path array")]
    ScopeMissingPath,
    #[error("scope path must be a list")]
    PathNotList,
    #[error("path selector must be a mapping or string")]
    SelectorNotMappingOrString,
    #[error("selector cannot include both attrs and attributes")]
    ConflictingAttributeAliases,
    #[error("failed to decode normalized config: {0}")]
    Normalize(#[from] serde_json::Error),
    #[error("failed to write compiled config: {0}")]
    Io(#[from] std::io::Error),
}
