use crate::element::TypeDecl;
use crate::error::ElementError;
use crate::resources::ResourceIndex;
use crate::universe::TypeUniverse;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Serialised description of one processing round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundInput {
    /// Processor options as passed by the host (`butterknife.minSdk`, ...).
    #[serde(default)]
    pub options: IndexMap<String, String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub resource_indices: Vec<ResourceIndex>,
}

impl RoundInput {
    pub fn from_json(text: &str) -> Result<Self, ElementError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Everything the processor may query during one round.
#[derive(Debug, Clone)]
pub struct RoundEnvironment {
    pub universe: TypeUniverse,
    pub options: IndexMap<String, String>,
    resource_indices: IndexMap<String, ResourceIndex>,
}

impl RoundEnvironment {
    pub fn new(input: RoundInput) -> Result<Self, ElementError> {
        let mut universe = TypeUniverse::with_platform();
        let type_count = input.types.len();
        for decl in input.types {
            universe.insert(decl)?;
        }
        let resource_indices = input
            .resource_indices
            .into_iter()
            .map(|index| (index.name.clone(), index))
            .collect::<IndexMap<_, _>>();
        debug!(
            types = type_count,
            resource_indices = resource_indices.len(),
            "round environment loaded"
        );
        Ok(Self {
            universe,
            options: input.options,
            resource_indices,
        })
    }

    pub fn from_types(types: Vec<TypeDecl>) -> Result<Self, ElementError> {
        Self::new(RoundInput {
            types,
            ..RoundInput::default()
        })
    }

    pub fn with_resource_index(mut self, index: ResourceIndex) -> Self {
        self.resource_indices.insert(index.name.clone(), index);
        self
    }

    pub fn resource_index(&self, name: &str) -> Option<&ResourceIndex> {
        self.resource_indices.get(name)
    }
}
