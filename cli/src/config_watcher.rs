use log::{debug, error, info, trace};
use mousebind_core::config::Config;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

/// Editors often write a file several times per save
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Reloads the config file whenever it changes on disk and sends the result to the event loop.
///
/// A file that fails to parse is reported and skipped, so the running bindings stay in place.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(config_path: &Path, debug_events: bool, tx: Sender<Config>) -> notify::Result<Self> {
        let path = config_path
            .canonicalize()
            .unwrap_or_else(|_| config_path.to_path_buf());
        let file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut last_reload: Option<Instant> = None;
        let reload_path = path.clone();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    error!("Config watcher error: {e}");
                    return;
                }
            };
            if !is_config_change(&event, &file_name) {
                return;
            }

            let now = Instant::now();
            if last_reload.is_some_and(|last| now.duration_since(last) < DEBOUNCE) {
                trace!("Debouncing config reload");
                return;
            }
            last_reload = Some(now);

            match Config::load(Some(&reload_path), false) {
                Ok(mut config) => {
                    config.debug_events |= debug_events;
                    info!("Config file changed: {}", reload_path.display());
                    if tx.send(config).is_err() {
                        debug!("Event loop is gone, dropping reloaded config");
                    }
                }
                Err(e) => error!("Keeping current bindings: {e}"),
            }
        })?;

        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        info!("Watching {} for changes", path.display());

        Ok(Self { _watcher: watcher })
    }
}

fn is_config_change(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|name| name == file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_is_config_change() {
        let name = OsString::from("config.yaml");
        assert!(is_config_change(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/config.yaml"),
            &name
        ));
        assert!(is_config_change(
            &event(EventKind::Create(CreateKind::File), "/cfg/config.yaml"),
            &name
        ));
        assert!(!is_config_change(
            &event(EventKind::Remove(RemoveKind::File), "/cfg/config.yaml"),
            &name
        ));
        assert!(!is_config_change(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/config.yaml.swp"),
            &name
        ));
    }
}
