//! Contribution flags and the contributor contract

use crate::error::JvmsecResult;
use crate::layer::{Layer, LayerTypes};
use serde::{Deserialize, Serialize};

/// Where a contributed layer is made available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Contribution {
    /// Populate the layer without marking it for build or launch
    None,

    /// Available to later buildpacks and cached between builds
    Build,

    /// Exported into the launch image
    #[default]
    Launch,
}

impl Contribution {
    /// Layer types implied by this flag
    pub fn types(self) -> LayerTypes {
        match self {
            Self::None => LayerTypes::default(),
            Self::Build => LayerTypes {
                build: true,
                cache: true,
                launch: false,
            },
            Self::Launch => LayerTypes {
                build: false,
                cache: false,
                launch: true,
            },
        }
    }

    /// Overwrite the layer's types with the ones implied by this flag
    pub fn apply(self, layer: &mut Layer) {
        layer.types = self.types();
    }
}

/// Something that populates a layer.
///
/// Receives the layer by value and hands it back mutated; on error the
/// caller discards the layer directory.
pub trait LayerContributor {
    /// Human-readable contributor name, used in logs
    fn name(&self) -> &str;

    fn contribute(&self, layer: Layer) -> JvmsecResult<Layer>;
}
