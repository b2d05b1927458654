//! In-memory file tree produced by the generator.
//!
//! A [`Directory`] is a named, ordered list of [`Node`]s; a [`File`] is a name
//! plus text content. Entry order is significant: it is the order the
//! archiver writes entries in.

use serde::Serialize;

/// A file or a sub-directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A file.
    File(File),
    /// A sub-directory.
    Dir(Directory),
}

impl Node {
    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => &file.name,
            Self::Dir(dir) => &dir.name,
        }
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    /// File name, without any directory part.
    pub name: String,
    /// Text content.
    pub content: String,
}

impl File {
    /// Creates a file.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A named, ordered list of entries.
///
/// # Examples
///
/// ```
/// use ms_codegen::{Directory, File};
///
/// let mut models = Directory::new("models");
/// models.push_file(File::new("index.js", "module.exports = {}\n"));
///
/// let mut root = Directory::new("shop");
/// root.push_dir(models);
/// root.push_file(File::new(".gitignore", "node_modules/\n"));
///
/// let paths: Vec<_> = root.files().into_iter().map(|(path, _)| path).collect();
/// assert_eq!(paths, ["models/index.js", ".gitignore"]);
/// assert!(root.file("models/index.js").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Directory {
    /// Directory name, without any parent part.
    pub name: String,
    /// Entries in write order.
    pub entries: Vec<Node>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Appends a file.
    pub fn push_file(&mut self, file: File) {
        self.entries.push(Node::File(file));
    }

    /// Appends a sub-directory.
    pub fn push_dir(&mut self, dir: Self) {
        self.entries.push(Node::Dir(dir));
    }

    /// Returns every file with its `/`-separated path relative to this
    /// directory, depth-first in entry order.
    #[must_use]
    pub fn files(&self) -> Vec<(String, &File)> {
        let mut out = Vec::new();
        collect_files(self, "", &mut out);
        out
    }

    /// Looks up a file by its path relative to this directory.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&File> {
        let (dirs, name) = match path.rsplit_once('/') {
            Some((dirs, name)) => (Some(dirs), name),
            None => (None, path),
        };

        let mut current = self;
        for part in dirs.into_iter().flat_map(|d| d.split('/')) {
            current = current.entries.iter().find_map(|node| match node {
                Node::Dir(dir) if dir.name == part => Some(dir),
                _ => None,
            })?;
        }

        current.entries.iter().find_map(|node| match node {
            Node::File(file) if file.name == name => Some(file),
            _ => None,
        })
    }

    /// Returns the total number of files, at any depth.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|node| match node {
                Node::File(_) => 1,
                Node::Dir(dir) => dir.file_count(),
            })
            .sum()
    }
}

fn collect_files<'a>(dir: &'a Directory, prefix: &str, out: &mut Vec<(String, &'a File)>) {
    for node in &dir.entries {
        match node {
            Node::File(file) => out.push((format!("{prefix}{}", file.name), file)),
            Node::Dir(sub) => collect_files(sub, &format!("{prefix}{}/", sub.name), out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Directory {
        let mut inner = Directory::new("b");
        inner.push_file(File::new("c.txt", "c"));

        let mut outer = Directory::new("a");
        outer.push_dir(inner);
        outer.push_file(File::new("d.txt", "d"));

        let mut root = Directory::new("root");
        root.push_file(File::new("first.txt", "1"));
        root.push_dir(outer);
        root.push_dir(Directory::new("empty"));
        root
    }

    #[test]
    fn test_files_are_depth_first() {
        let root = tree();
        let paths: Vec<_> = root.files().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, ["first.txt", "a/b/c.txt", "a/d.txt"]);
        assert_eq!(root.file_count(), 3);
    }

    #[test]
    fn test_file_lookup() {
        let root = tree();
        assert_eq!(root.file("a/b/c.txt").map(|f| f.content.as_str()), Some("c"));
        assert_eq!(root.file("first.txt").map(|f| f.content.as_str()), Some("1"));
        assert!(root.file("a/c.txt").is_none());
        assert!(root.file("empty").is_none());
        assert!(root.file("missing/d.txt").is_none());
    }

    #[test]
    fn test_node_name() {
        let root = tree();
        let names: Vec<_> = root.entries.iter().map(Node::name).collect();
        assert_eq!(names, ["first.txt", "a", "empty"]);
    }
}
