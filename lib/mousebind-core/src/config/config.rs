use crate::actions::Action;
use crate::binding::{BindingError, BindingResult, EventType, Modifiers};
use crate::config::serialize_config;
use crate::paths;
use log::{trace, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The path the config file was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Whether binding messages and errors are shown on screen
    pub notifications: bool,
    /// Whether to log every input event at debug level
    pub debug_events: bool,
    /// Event types to log when debug_events is on. Leave empty to log every type
    pub debug_event_types: Vec<String>,
    /// The mouse bindings to install
    pub bindings: Vec<BindingConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BindingConfig {
    /// Unique name for this binding
    pub name: String,
    /// Modifier keys that must be held, no more and no fewer (e.g. "alt", "cmd+shift", "⌘⇧")
    #[serde(default)]
    #[schemars(with = "String")]
    pub modifiers: Modifiers,
    /// Event type to intercept (e.g. leftMouseDragged, scrollWheel, otherMouseDown)
    pub event: String,
    /// Message shown on screen each time the binding fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// What to do with a matching event (block, pass, log, drag_scroll)
    #[serde(default)]
    pub action: Option<Action>,
    /// Whether the binding starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl BindingConfig {
    /// Checks what the binding constructor would reject, without creating anything
    pub fn validate(&self) -> BindingResult<EventType> {
        let event_type = EventType::from_name(&self.event)
            .ok_or_else(|| BindingError::UnrecognizedEventType(self.event.clone()))?;
        let action = self.action.as_ref().ok_or(BindingError::MissingCallback)?;
        action.validate().map_err(BindingError::InvalidAction)?;
        Ok(event_type)
    }
}

impl Config {
    pub fn default_config_path() -> Option<PathBuf> {
        paths::default_config_path()
    }

    pub fn load(config_path: Option<&Path>, save: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                Self::default_config_path().ok_or("Could not determine default config directory")?
            }
        };

        if !path.exists() {
            Self::create_default_config_file(&path)?;
            trace!("Created default config file at: {}", path.display());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let mut config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        config.config_path = Some(path.clone());

        // Save the config back to ensure all fields are present (fills in any missing fields with defaults)
        if save {
            if let Err(e) = config.save_to_file(&path) {
                warn!("Failed to update config file with missing fields: {e}");
            }
        }

        Ok(config)
    }

    fn create_default_config_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = Config::default();
        default_config.save_to_file(path)?;
        Ok(())
    }

    /// Save the config to a file, with each field's documentation as comments
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        serialize_config(self, path)?;
        Ok(())
    }

    /// Every problem that would keep a binding from being created
    pub fn validate(&self) -> Vec<(String, BindingError)> {
        self.bindings
            .iter()
            .filter_map(|b| b.validate().err().map(|e| (b.name.clone(), e)))
            .collect()
    }

    /// Unknown names are dropped with a warning
    pub fn debug_event_types(&self) -> Vec<EventType> {
        if self.debug_event_types.is_empty() {
            return EventType::all().collect();
        }
        self.debug_event_types
            .iter()
            .filter_map(|name| {
                let event_type = EventType::from_name(name);
                if event_type.is_none() {
                    warn!("Ignoring unknown debug event type '{name}'");
                }
                event_type
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            notifications: true,
            debug_events: false,
            debug_event_types: Vec::new(),
            bindings: vec![BindingConfig {
                name: "drag-scroll".to_string(),
                modifiers: Modifiers::parse("alt"),
                event: "leftMouseDragged".to_string(),
                message: None,
                action: Some(Action::drag_scroll()),
                enabled: true,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config::load(Some(&path), false).unwrap();
        assert!(path.exists());
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.bindings, Config::default().bindings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "bindings:\n  - name: block-back\n    modifiers: ⌘⇧\n    event: otherMouseDown\n    action:\n      type: block\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), false).unwrap();
        assert!(config.notifications);
        assert!(!config.debug_events);
        assert_eq!(config.bindings.len(), 1);

        let binding = &config.bindings[0];
        assert_eq!(binding.modifiers, Modifiers::parse("cmd+shift"));
        assert_eq!(binding.action, Some(Action::Block));
        assert!(binding.enabled);
        assert_eq!(binding.message, None);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "bindings: [oops").unwrap();
        assert!(Config::load(Some(&path), false).is_err());
    }

    #[test]
    fn test_save_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "debug_events: true\n").unwrap();

        Config::load(Some(&path), true).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("notifications: true"));
        assert!(contents.contains("debug_events: true"));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_empty());

        config.bindings.push(BindingConfig {
            name: "typo".to_string(),
            modifiers: Modifiers::default(),
            event: "leftMouseDrag".to_string(),
            message: None,
            action: Some(Action::Pass),
            enabled: true,
        });
        config.bindings.push(BindingConfig {
            name: "no-action".to_string(),
            modifiers: Modifiers::default(),
            event: "scrollWheel".to_string(),
            message: None,
            action: None,
            enabled: true,
        });

        assert_eq!(
            config.validate(),
            vec![
                (
                    "typo".to_string(),
                    BindingError::UnrecognizedEventType("leftMouseDrag".to_string())
                ),
                ("no-action".to_string(), BindingError::MissingCallback),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_drag_scroll_speed() {
        let mut config = Config::default();
        config.bindings[0].action = Some(Action::DragScroll {
            speed: 1_000_000_000,
            natural: true,
        });

        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].0, "drag-scroll");
        assert!(matches!(problems[0].1, BindingError::InvalidAction(_)));
    }

    #[test]
    fn test_debug_event_types() {
        let mut config = Config::default();
        assert_eq!(config.debug_event_types().len(), EventType::all().count());

        config.debug_event_types = vec!["scrollWheel".to_string(), "bogus".to_string()];
        assert_eq!(config.debug_event_types(), vec![EventType::ScrollWheel]);
    }
}
