//! YAML Quiz Catalog Adapter
//!
//! Loads authored quiz content from YAML files into memory and serves it
//! through the `QuizContentStore` port. A catalog path may be a single
//! file or a directory of `.yaml`/`.yml` files, each holding a list of
//! analyses.
//!
//! # Example
//!
//! ```ignore
//! let catalog = YamlQuizCatalog::load("./catalog").await?;
//! let strategy = catalog.strategy_config(&analysis_id).await?;
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::document::{AnalysisDocument, CatalogDocument};
use crate::domain::adaptive::AdaptiveTheme;
use crate::domain::foundation::{AnalysisId, DomainError, Gender, ResultTypeId};
use crate::domain::interpretation::{Interpretation, ResultTypeDefinition};
use crate::domain::resolution::{CompatibilityEntry, StrategyConfig};
use crate::domain::scoring::OptionWeights;
use crate::ports::QuizContentStore;

/// Errors that can occur while loading a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error reading {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid catalog entry for analysis '{analysis}': {message}")]
    Invalid { analysis: String, message: String },
}

impl CatalogError {
    fn invalid(analysis: &str, message: impl Into<String>) -> Self {
        CatalogError::Invalid {
            analysis: analysis.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
struct AnalysisContent {
    strategy: Option<StrategyConfig>,
    question_count: Option<usize>,
    options: HashMap<(String, String), OptionWeights>,
    result_types: Vec<ResultTypeDefinition>,
    compatibility: HashMap<String, CompatibilityEntry>,
    theme: Option<AdaptiveTheme>,
}

/// Quiz content loaded from YAML.
#[derive(Debug, Default)]
pub struct YamlQuizCatalog {
    analyses: HashMap<AnalysisId, AnalysisContent>,
    interpretations: HashMap<ResultTypeId, Vec<Interpretation>>,
}

impl YamlQuizCatalog {
    /// Loads a catalog file, or every YAML file of a directory.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let io_error = |e: std::io::Error| CatalogError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let metadata = fs::metadata(path).await.map_err(io_error)?;
        let files = if metadata.is_dir() {
            let mut files = Vec::new();
            let mut entries = fs::read_dir(path).await.map_err(io_error)?;
            while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
                let file = entry.path();
                let is_yaml = matches!(
                    file.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                );
                if is_yaml {
                    files.push(file);
                }
            }
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut catalog = Self::default();
        for file in files {
            let text = fs::read_to_string(&file)
                .await
                .map_err(|e| CatalogError::Io {
                    path: file.clone(),
                    message: e.to_string(),
                })?;
            catalog.merge_yaml(&text)?;
        }

        tracing::info!(
            path = %path.display(),
            analyses = catalog.analyses.len(),
            "Quiz catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        catalog.merge_yaml(yaml)?;
        Ok(catalog)
    }

    /// Number of analyses in the catalog.
    pub fn analysis_count(&self) -> usize {
        self.analyses.len()
    }

    fn merge_yaml(&mut self, yaml: &str) -> Result<(), CatalogError> {
        let document: CatalogDocument =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        for analysis in document.analyses {
            self.add_analysis(analysis)?;
        }
        Ok(())
    }

    fn add_analysis(&mut self, doc: AnalysisDocument) -> Result<(), CatalogError> {
        let name = doc.id.clone();
        let analysis_id =
            AnalysisId::new(&doc.id).map_err(|e| CatalogError::invalid(&name, e.to_string()))?;
        if self.analyses.contains_key(&analysis_id) {
            return Err(CatalogError::invalid(&name, "analysis is defined twice"));
        }

        let mut content = AnalysisContent::default();

        if let Some(raw) = doc.strategy {
            let value = serde_json::to_value(raw)
                .map_err(|e| CatalogError::invalid(&name, e.to_string()))?;
            let strategy = StrategyConfig::from_value(value)
                .map_err(|e| CatalogError::invalid(&name, e.to_string()))?;
            content.strategy = Some(strategy);
        }

        content.question_count = doc
            .question_count
            .or_else(|| (!doc.questions.is_empty()).then_some(doc.questions.len()));

        for question in doc.questions {
            for option in question.options {
                let weights = OptionWeights {
                    question_id: question.id.clone(),
                    option_id: option.id.clone(),
                    weights: option.weights,
                };
                content
                    .options
                    .insert((question.id.clone(), option.id), weights);
            }
        }

        for rt in doc.result_types {
            let id = ResultTypeId::new();
            let mut sections = Vec::with_capacity(rt.sections.len());
            for (section, text) in rt.sections {
                let interpretation = Interpretation::new(id, section, text).map_err(|e| {
                    CatalogError::invalid(&name, format!("result type '{}': {}", rt.key, e))
                })?;
                sections.push(interpretation);
            }
            self.interpretations.insert(id, sections);
            content.result_types.push(ResultTypeDefinition {
                id,
                analysis_id: analysis_id.clone(),
                result_key: rt.key,
                gender: rt.gender,
                title: rt.title,
                subtitle: rt.subtitle,
            });
        }

        for entry in doc.compatibility {
            content.compatibility.insert(
                entry.result_key.clone(),
                CompatibilityEntry {
                    analysis_id: analysis_id.clone(),
                    result_key: entry.result_key,
                    best: entry.best,
                    worst: entry.worst,
                },
            );
        }

        if let Some(raw) = doc.adaptive_theme {
            let mut mapping = match raw {
                serde_yaml::Value::Mapping(m) => m,
                _ => return Err(CatalogError::invalid(&name, "adaptive_theme must be a mapping")),
            };
            mapping.insert(
                serde_yaml::Value::from("analysis_id"),
                serde_yaml::Value::from(analysis_id.as_str()),
            );
            let theme: AdaptiveTheme = serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
                .map_err(|e| CatalogError::invalid(&name, e.to_string()))?;
            content.theme = Some(theme);
        }

        self.analyses.insert(analysis_id, content);
        Ok(())
    }
}

#[async_trait]
impl QuizContentStore for YamlQuizCatalog {
    async fn strategy_config(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Option<StrategyConfig>, DomainError> {
        Ok(self
            .analyses
            .get(analysis_id)
            .and_then(|a| a.strategy.clone()))
    }

    async fn question_count(&self, analysis_id: &AnalysisId) -> Result<Option<usize>, DomainError> {
        Ok(self.analyses.get(analysis_id).and_then(|a| a.question_count))
    }

    async fn option_weights(
        &self,
        analysis_id: &AnalysisId,
        question_id: &str,
        option_id: &str,
    ) -> Result<Option<OptionWeights>, DomainError> {
        Ok(self.analyses.get(analysis_id).and_then(|a| {
            a.options
                .get(&(question_id.to_string(), option_id.to_string()))
                .cloned()
        }))
    }

    async fn find_result_type(
        &self,
        analysis_id: &AnalysisId,
        result_key: &str,
        gender: Gender,
    ) -> Result<Option<ResultTypeDefinition>, DomainError> {
        Ok(self.analyses.get(analysis_id).and_then(|a| {
            a.result_types
                .iter()
                .find(|rt| rt.result_key == result_key && rt.gender == gender)
                .cloned()
        }))
    }

    async fn result_types(
        &self,
        analysis_id: &AnalysisId,
        gender: Gender,
    ) -> Result<Vec<ResultTypeDefinition>, DomainError> {
        Ok(self
            .analyses
            .get(analysis_id)
            .map(|a| {
                a.result_types
                    .iter()
                    .filter(|rt| rt.gender == gender)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn interpretations(
        &self,
        result_type_id: &ResultTypeId,
    ) -> Result<Vec<Interpretation>, DomainError> {
        Ok(self
            .interpretations
            .get(result_type_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn compatibility(
        &self,
        analysis_id: &AnalysisId,
        result_key: &str,
    ) -> Result<Option<CompatibilityEntry>, DomainError> {
        Ok(self
            .analyses
            .get(analysis_id)
            .and_then(|a| a.compatibility.get(result_key).cloned()))
    }

    async fn adaptive_theme(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Option<AdaptiveTheme>, DomainError> {
        Ok(self.analyses.get(analysis_id).and_then(|a| a.theme.clone()))
    }
}
