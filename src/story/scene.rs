//! Scenes, choices and the static story graph
//!
//! The graph is validated once at load time; after that every scene reference
//! inside it is known to resolve.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::ENTRY_SCENE;

/// Story bundled with the game
const BUILTIN_STORY: &str = include_str!("../../assets/story.json");

/// Caller-supplied side effect run when a choice is picked, before advancing
#[derive(Clone)]
pub struct ChoiceAction(Rc<dyn Fn()>);

impl ChoiceAction {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn run(&self) {
        (self.0)()
    }
}

impl fmt::Debug for ChoiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChoiceAction(..)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub next_scene: String,
    #[serde(skip)]
    pub action: Option<ChoiceAction>,
}

impl Choice {
    pub fn new(text: impl Into<String>, next_scene: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_scene: next_scene.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(ChoiceAction::new(action));
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Direct continuation, used when there are no choices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scene: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Something the player can press once a scene's text is fully shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Affordance {
    Continue { target: String },
    Choice { index: usize, text: String, target: String },
}

impl Scene {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            background: None,
            next_scene: None,
            choices: Vec::new(),
        }
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn with_next(mut self, next_scene: impl Into<String>) -> Self {
        self.next_scene = Some(next_scene.into());
        self
    }

    /// Choices win over a direct continuation; a scene with neither offers nothing
    /// (it waits on gameplay).
    pub fn affordances(&self) -> Vec<Affordance> {
        if !self.choices.is_empty() {
            return self
                .choices
                .iter()
                .enumerate()
                .map(|(index, c)| Affordance::Choice {
                    index,
                    text: c.text.clone(),
                    target: c.next_scene.clone(),
                })
                .collect();
        }
        match &self.next_scene {
            Some(target) => vec![Affordance::Continue { target: target.clone() }],
            None => Vec::new(),
        }
    }

    /// Every scene id this scene can lead to
    fn targets(&self) -> impl Iterator<Item = &str> {
        self.next_scene
            .as_deref()
            .into_iter()
            .chain(self.choices.iter().map(|c| c.next_scene.as_str()))
    }
}

/// On-disk story document
#[derive(Debug, Deserialize)]
struct StoryDocument {
    #[serde(default = "default_entry")]
    entry: String,
    scenes: BTreeMap<String, Scene>,
}

fn default_entry() -> String {
    ENTRY_SCENE.to_string()
}

/// Validated, read-only scene graph
#[derive(Debug, Clone)]
pub struct SceneGraph {
    scenes: Vec<Scene>,
    index: HashMap<String, usize>,
    entry: usize,
}

impl SceneGraph {
    /// The story that ships with the game
    pub fn builtin() -> Result<Self, GameError> {
        Self::from_json(BUILTIN_STORY)
    }

    /// Parse and validate a story document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let doc: StoryDocument = serde_json::from_str(json)?;
        for (key, scene) in &doc.scenes {
            if *key != scene.id {
                return Err(GameError::SceneIdMismatch {
                    key: key.clone(),
                    id: scene.id.clone(),
                });
            }
        }
        Self::new(doc.scenes.into_values().collect(), &doc.entry)
    }

    /// Build from scenes in memory, failing fast on any dangling reference
    pub fn new(scenes: Vec<Scene>, entry: &str) -> Result<Self, GameError> {
        let mut index = HashMap::with_capacity(scenes.len());
        for (i, scene) in scenes.iter().enumerate() {
            if index.insert(scene.id.clone(), i).is_some() {
                return Err(GameError::DuplicateScene(scene.id.clone()));
            }
        }

        let entry = *index
            .get(entry)
            .ok_or_else(|| GameError::MissingEntryScene(entry.to_string()))?;

        for scene in &scenes {
            if let Some(target) = scene.targets().find(|t| !index.contains_key(*t)) {
                return Err(GameError::InvalidSceneReference {
                    from: scene.id.clone(),
                    target: target.to_string(),
                });
            }
        }

        log::debug!("Story graph loaded: {} scenes", scenes.len());
        Ok(Self { scenes, index, entry })
    }

    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.index.get(id).map(|&i| &self.scenes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn entry(&self) -> &Scene {
        &self.scenes[self.entry]
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Attach a side effect to a choice after loading
    pub fn attach_action(
        &mut self,
        scene_id: &str,
        index: usize,
        action: impl Fn() + 'static,
    ) -> Result<(), GameError> {
        let invalid = || GameError::InvalidChoice {
            scene: scene_id.to_string(),
            index,
        };
        let &i = self.index.get(scene_id).ok_or_else(invalid)?;
        let choice = self.scenes[i].choices.get_mut(index).ok_or_else(invalid)?;
        choice.action = Some(ChoiceAction::new(action));
        Ok(())
    }
}
