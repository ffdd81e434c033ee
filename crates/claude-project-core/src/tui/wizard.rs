//! Question flow: name, preset, features, confirmation
//!
//! The flow is a small state machine so that the order of questions and the
//! cancellation rules are independent of the prompt library. Every state can
//! move to [`WizardState::Cancelled`].

use crate::registry::{FeatureKey, PresetDefinition, PresetKey, Registry};
use crate::validate::{validate_project_name, NameError};
use anyhow::Result;
use indexmap::IndexSet;
use std::io;

/// Answers already provided on the command line
#[derive(Debug, Clone, Default)]
pub struct WizardSeed {
    pub name: Option<String>,
    pub preset: Option<PresetKey>,
    pub features: Option<Vec<FeatureKey>>,
    /// Skip the feature prompt and the confirmation
    pub yes: bool,
}

/// A complete answer set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub name: String,
    pub preset: PresetKey,
    pub features: IndexSet<FeatureKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    CollectingName,
    CollectingPreset { name: String },
    CollectingFeatures { name: String, preset: PresetKey },
    Confirming(Answers),
    Done(Answers),
    Cancelled,
}

impl WizardState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardState::Done(_) | WizardState::Cancelled)
    }
}

/// Source of interactive answers.
///
/// Each question returns `Ok(None)` when the user cancels.
pub trait Prompter {
    fn project_name(&mut self) -> io::Result<Option<String>>;

    fn preset(&mut self, registry: &Registry, initial: PresetKey) -> io::Result<Option<PresetKey>>;

    fn features(&mut self, registry: &Registry) -> io::Result<Option<Vec<FeatureKey>>>;

    fn confirm_create(&mut self, name: &str, preset: &PresetDefinition) -> io::Result<Option<bool>>;

    /// Called when a typed name fails validation, before asking again
    fn rejected_name(&mut self, error: &NameError) -> io::Result<()>;
}

pub struct Wizard<'a> {
    registry: &'a Registry,
    seed: WizardSeed,
    state: WizardState,
}

impl<'a> Wizard<'a> {
    pub fn new(registry: &'a Registry, seed: WizardSeed) -> Self {
        Self {
            registry,
            seed,
            state: WizardState::CollectingName,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Advance by one question. Terminal states are left unchanged.
    pub fn step<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        let state = std::mem::replace(&mut self.state, WizardState::Cancelled);

        self.state = match state {
            WizardState::CollectingName => match self.seed.name.take() {
                Some(name) => {
                    if let Err(e) = validate_project_name(&name) {
                        anyhow::bail!("Invalid project name '{}': {}", name, e);
                    }
                    WizardState::CollectingPreset { name }
                }
                None => match prompter.project_name()? {
                    None => WizardState::Cancelled,
                    Some(name) => match validate_project_name(&name) {
                        Ok(()) => WizardState::CollectingPreset { name },
                        Err(e) => {
                            prompter.rejected_name(&e)?;
                            WizardState::CollectingName
                        }
                    },
                },
            },

            WizardState::CollectingPreset { name } => {
                let preset = match self.seed.preset {
                    Some(preset) => Some(preset),
                    None => prompter.preset(self.registry, PresetKey::default())?,
                };
                match preset {
                    Some(preset) => WizardState::CollectingFeatures { name, preset },
                    None => WizardState::Cancelled,
                }
            }

            WizardState::CollectingFeatures { name, preset } => {
                let features = match self.seed.features.take() {
                    Some(features) => Some(features),
                    None if self.seed.yes => Some(Vec::new()),
                    None => prompter.features(self.registry)?,
                };
                match features {
                    Some(features) => WizardState::Confirming(Answers {
                        name,
                        preset,
                        features: features.into_iter().collect(),
                    }),
                    None => WizardState::Cancelled,
                }
            }

            WizardState::Confirming(answers) => {
                if self.seed.yes {
                    WizardState::Done(answers)
                } else {
                    let preset = self.registry.lookup_preset(answers.preset)?;
                    match prompter.confirm_create(&answers.name, preset)? {
                        Some(true) => WizardState::Done(answers),
                        _ => WizardState::Cancelled,
                    }
                }
            }

            terminal => terminal,
        };

        Ok(())
    }

    /// Ask questions until the flow finishes. `None` means cancelled.
    pub fn run<P: Prompter>(mut self, prompter: &mut P) -> Result<Option<Answers>> {
        while !self.state.is_terminal() {
            self.step(prompter)?;
        }

        match self.state {
            WizardState::Done(answers) => Ok(Some(answers)),
            _ => Ok(None),
        }
    }
}
