//! Fail-fast errors: any of these means the output would be meaningless.

use shipyard_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error(transparent)]
    Db(#[from] DbError),

    /// No thermal rule matches the material name.
    #[error("unrecognized material '{0}': no thermal rule matches its name")]
    UnrecognizedMaterial(String),

    #[error("cannot find group '{0}' among palettes")]
    PaletteGroupNotFound(String),

    #[error("cannot find any variants for material group '{0}'")]
    NoVariants(String),

    #[error("variant '{variant}' already found for material '{material}'")]
    DuplicateVariant { variant: String, material: String },

    #[error("cannot find base material for material group '{0}'")]
    MissingBase(String),

    #[error("cannot find material '{0}'")]
    MaterialNotFound(String),

    #[error("{count} materials are named '{name}'")]
    AmbiguousMaterial { name: String, count: usize },

    #[error("texture '{stem}.png' of '{kind}' not found under {root}")]
    TextureNotFound {
        kind: String,
        stem: String,
        root: String,
    },

    #[error("textures of '{0}' have no visible pixels")]
    EmptyTexture(String),

    #[error("{path}: {message}")]
    Image { path: String, message: String },

    #[error("template has no {0} placeholder")]
    TemplatePlaceholder(&'static str),
}
