//! Workflow catalog: the built-in demo workflows plus any loaded from YAML

use demo_player_sdk::{Actor, StepDefinition, WorkflowDefinition};
use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;

/// Workflow selected when nothing else is configured
pub const DEFAULT_WORKFLOW_ID: &str = "ecom-order";

/// Where a catalog entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowSource {
    BuiltIn,
    UserDefined,
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub definition: WorkflowDefinition,
    pub source: WorkflowSource,
}

/// Immutable, validated list of workflow definitions
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, validating ids and sorting each workflow's steps by ordinal
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut entries = entries;
        for entry in &mut entries {
            let def = &mut entry.definition;
            if def.id.trim().is_empty() || def.name.trim().is_empty() {
                return Err(CatalogError::MissingField(def.id.clone()));
            }
            if !seen.insert(def.id.clone()) {
                return Err(CatalogError::DuplicateWorkflow(def.id.clone()));
            }
            if def.steps.is_empty() {
                return Err(CatalogError::NoSteps(def.id.clone()));
            }

            def.steps.sort_by_key(|s| s.id);
            if let Some(pair) = def.steps.windows(2).find(|w| w[0].id == w[1].id) {
                return Err(CatalogError::DuplicateStep {
                    workflow: def.id.clone(),
                    step: pair[0].id,
                });
            }
        }

        Ok(Self { entries })
    }

    /// The three demo workflows
    pub fn builtin() -> Self {
        let entries = builtin_workflows()
            .into_iter()
            .map(|definition| CatalogEntry {
                definition,
                source: WorkflowSource::BuiltIn,
            })
            .collect();
        // Built-ins are static and known to be valid
        Self { entries }
    }

    /// Parse user workflows from a YAML list
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let defs: Vec<WorkflowDefinition> = serde_yaml::from_str(yaml)?;
        Self::new(user_entries(defs))
    }

    /// Read user workflows from a YAML file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Append user workflows after the existing entries
    pub fn with_extra(self, extra: Vec<WorkflowDefinition>) -> Result<Self, CatalogError> {
        let mut entries = self.entries;
        entries.extend(user_entries(extra));
        Self::new(entries)
    }

    /// Built-ins merged with the workflows in `path`, if given
    pub fn load_with_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = Self::builtin();
        match path {
            Some(path) => {
                let user = Self::load(path)?;
                tracing::info!(path = %path.display(), count = user.len(), "loaded user workflows");
                catalog.with_extra(user.into_definitions())
            }
            None => Ok(catalog),
        }
    }

    pub fn get(&self, id: &str) -> Option<&WorkflowDefinition> {
        self.entries
            .iter()
            .map(|e| &e.definition)
            .find(|d| d.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.definition.id == id)
    }

    pub fn entry(&self, idx: usize) -> Option<&CatalogEntry> {
        self.entries.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.definition.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `ecom-order` when present, otherwise the first entry
    pub fn default_id(&self) -> &str {
        match self.get(DEFAULT_WORKFLOW_ID) {
            Some(def) => &def.id,
            None => &self.entries[0].definition.id,
        }
    }

    fn into_definitions(self) -> Vec<WorkflowDefinition> {
        self.entries.into_iter().map(|e| e.definition).collect()
    }
}

fn user_entries(defs: Vec<WorkflowDefinition>) -> Vec<CatalogEntry> {
    defs.into_iter()
        .map(|definition| CatalogEntry {
            definition,
            source: WorkflowSource::UserDefined,
        })
        .collect()
}

fn builtin_workflows() -> Vec<WorkflowDefinition> {
    use Actor::*;

    vec![
        WorkflowDefinition {
            id: "customer-onboarding".to_string(),
            name: "Customer Onboarding".to_string(),
            description: "End-to-end customer onboarding process".to_string(),
            steps: vec![
                StepDefinition::new(1, "Collect Customer Data", WebActor, "Customer submits onboarding form"),
                StepDefinition::new(2, "Verify Identity", ApiActor, "Run KYC/AML checks"),
                StepDefinition::new(3, "Create Accounts", Coordinator, "Coordinate account creation"),
                StepDefinition::new(4, "CRM Integration", ApiActor, "Add to CRM system"),
                StepDefinition::new(5, "Billing Setup", ApiActor, "Configure billing and subscriptions"),
                StepDefinition::new(6, "Send Welcome Kit", WebActor, "Deliver welcome email and resources"),
            ],
        },
        WorkflowDefinition {
            id: "ecom-order".to_string(),
            name: "E-commerce Order Processing".to_string(),
            description: "Processes an online order from cart to fulfillment".to_string(),
            steps: vec![
                StepDefinition::new(1, "Receive Order", WebActor, "Customer places order on website"),
                StepDefinition::new(2, "Check Inventory", ApiActor, "Verify product availability"),
                StepDefinition::new(3, "Process Payment", ApiActor, "Handle payment processing"),
                StepDefinition::new(4, "Update Order Status", WebActor, "Notify customer and update order status"),
            ],
        },
        WorkflowDefinition {
            id: "data-sync".to_string(),
            name: "Enterprise Data Sync".to_string(),
            description: "Synchronize data across multiple systems".to_string(),
            steps: vec![
                StepDefinition::new(1, "Extract Data", ApiActor, "Pull data from source system"),
                StepDefinition::new(2, "Transform Data", Coordinator, "Convert data to target format"),
                StepDefinition::new(3, "Load Data", ApiActor, "Push data to destination system"),
                StepDefinition::new(4, "Verify Sync", WebActor, "Confirm data integrity"),
            ],
        },
    ]
}
