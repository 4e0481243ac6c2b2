//! Project bookkeeping
//!
//! A project file holds two `key=value` lines (`name=`, `lastScene=`). The
//! recent projects list is one `name|path` row per project, newest first.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{Error, Result};

/// The project an editor session works in
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
    pub name: String,
    pub last_scene: Option<PathBuf>,
    has_unsaved_changes: bool,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            last_scene: None,
            has_unsaved_changes: false,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn mark_dirty(&mut self) {
        self.has_unsaved_changes = true;
    }

    pub fn mark_saved(&mut self) {
        self.has_unsaved_changes = false;
    }

    pub fn to_project_string(&self) -> String {
        let last_scene = self
            .last_scene
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("name={}\nlastScene={}\n", self.name, last_scene)
    }

    pub fn parse(text: &str) -> Self {
        let mut project = Project::default();
        for line in text.lines() {
            match line.split_once('=') {
                Some(("name", value)) => project.name = value.to_string(),
                Some(("lastScene", value)) if !value.is_empty() => {
                    project.last_scene = Some(PathBuf::from(value));
                }
                _ => {}
            }
        }
        project
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_project_string()).map_err(|e| Error::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(&text))
    }
}

/// One row of the recent projects list
#[derive(Debug, Clone, PartialEq)]
pub struct RecentProject {
    pub name: String,
    pub path: PathBuf,
}

/// Most-recently-used project list with a fixed capacity
#[derive(Debug, Clone, PartialEq)]
pub struct RecentProjects {
    entries: Vec<RecentProject>,
    limit: usize,
}

impl RecentProjects {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn entries(&self) -> &[RecentProject] {
        &self.entries
    }

    /// Moves `path` to the front, dropping the oldest row past the limit
    pub fn touch(&mut self, name: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(
            0,
            RecentProject {
                name: name.to_string(),
                path,
            },
        );
        self.entries.truncate(self.limit);
    }

    pub fn to_rows(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}|{}\n", entry.name, entry.path.display()))
            .collect()
    }

    /// Parses rows, skipping malformed ones with a warning
    pub fn parse(text: &str, limit: usize) -> Self {
        let mut recent = RecentProjects::new(limit);
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once('|') {
                Some((name, path)) if !path.is_empty() => {
                    if recent.entries.len() < recent.limit
                        && !recent.entries.iter().any(|e| e.path == Path::new(path))
                    {
                        recent.entries.push(RecentProject {
                            name: name.to_string(),
                            path: PathBuf::from(path),
                        });
                    }
                }
                _ => warn!("Skipping malformed recent project row {}: '{}'", number + 1, line),
            }
        }
        recent
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_rows()).map_err(|e| Error::io(path, e))
    }

    /// Loads the list; a missing file is an empty list
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text, limit)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new(limit)),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_text_round_trip() {
        let mut project = Project::new("Courtyard");
        project.last_scene = Some(PathBuf::from("scenes/main.scene"));

        let text = project.to_project_string();
        assert_eq!(text, "name=Courtyard\nlastScene=scenes/main.scene\n");
        assert_eq!(Project::parse(&text), project);
    }

    #[test]
    fn test_project_without_last_scene() {
        let project = Project::parse("name=Empty\nlastScene=\n");
        assert_eq!(project.name, "Empty");
        assert_eq!(project.last_scene, None);
    }

    #[test]
    fn test_dirty_flag() {
        let mut project = Project::new("p");
        assert!(!project.has_unsaved_changes());
        project.mark_dirty();
        assert!(project.has_unsaved_changes());
        project.mark_saved();
        assert!(!project.has_unsaved_changes());
    }

    #[test]
    fn test_recent_projects_order_and_limit() {
        let mut recent = RecentProjects::new(2);
        recent.touch("a", "/p/a");
        recent.touch("b", "/p/b");
        recent.touch("a", "/p/a");
        recent.touch("c", "/p/c");

        let names: Vec<&str> = recent.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
        assert_eq!(recent.to_rows(), "c|/p/c\na|/p/a\n");
    }

    #[test]
    fn test_recent_projects_parse_skips_bad_rows() {
        let recent = RecentProjects::parse("one|/x/one\nbroken row\n\ntwo|\nthree|/x/three\none|/x/one\n", 5);
        let paths: Vec<PathBuf> = recent.entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/x/one"), PathBuf::from("/x/three")]);
    }

    #[test]
    fn test_recent_projects_missing_file_is_empty() {
        let recent = RecentProjects::load(Path::new("no/such/recent.txt"), 3).unwrap();
        assert!(recent.entries().is_empty());
    }
}
