use crate::proc::ProcFile;
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcTreeError {
    AlreadyOccupied,
    InvalidPath,
}

type Result<T> = core::result::Result<T, ProcTreeError>;

#[derive(Default)]
struct ProcTreeBranch {
    nodes: HashMap<String, ProcTreeNode>,
}

impl ProcTreeBranch {
    fn info(&self) -> Vec<ElementInfo> {
        self.nodes
            .iter()
            .map(|(k, v)| ElementInfo {
                name: k.clone(),
                directory: matches!(v, ProcTreeNode::Branch(_)),
            })
            .collect()
    }
}

enum ProcTreeNode {
    File(Arc<dyn ProcFile>),
    Branch(ProcTreeBranch),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementInfo {
    pub name: String,
    pub directory: bool,
}

impl Display for ElementInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name)?;
        if self.directory {
            write!(f, "/")?;
        }
        Ok(())
    }
}

fn components(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

pub struct ProcTree {
    node: ProcTreeBranch,
}

impl Default for ProcTree {
    fn default() -> Self {
        ProcTree::new()
    }
}

impl ProcTree {
    pub fn new() -> Self {
        ProcTree {
            node: ProcTreeBranch::default(),
        }
    }

    /// A path names either a file or a directory, never both.
    pub fn put(&mut self, path: &str, file: Arc<dyn ProcFile>) -> Result<()> {
        let parts = components(path);
        let (last, parts) = parts.split_last().ok_or(ProcTreeError::InvalidPath)?;
        let mut current = &mut self.node;
        for part in parts {
            let node = current
                .nodes
                .entry((*part).to_owned())
                .or_insert_with(|| ProcTreeNode::Branch(ProcTreeBranch::default()));
            current = match node {
                ProcTreeNode::Branch(branch) => branch,
                ProcTreeNode::File(_) => return Err(ProcTreeError::AlreadyOccupied),
            };
        }

        match current.nodes.entry((*last).to_owned()) {
            Entry::Vacant(entry) => {
                entry.insert(ProcTreeNode::File(file));
                Ok(())
            }
            Entry::Occupied(_) => Err(ProcTreeError::AlreadyOccupied),
        }
    }

    pub fn get(&self, path: &str) -> Option<Arc<dyn ProcFile>> {
        let parts = components(path);
        let (last, parts) = parts.split_last()?;
        let mut current = &self.node;
        for part in parts {
            match current.nodes.get(*part)? {
                ProcTreeNode::Branch(branch) => current = branch,
                ProcTreeNode::File(_) => return None,
            }
        }
        match current.nodes.get(*last)? {
            ProcTreeNode::Branch(_) => None,
            ProcTreeNode::File(file) => Some(file.clone()),
        }
    }

    /// Detaches the file at `path`. Branches left with nothing in them are
    /// removed as well.
    pub fn remove(&mut self, path: &str) -> Option<Arc<dyn ProcFile>> {
        let parts = components(path);
        if parts.is_empty() {
            return None;
        }
        remove_from(&mut self.node, &parts)
    }

    pub fn list(&self, path: &str) -> Vec<ElementInfo> {
        let parts = components(path);
        let Some((last, parts)) = parts.split_last() else {
            return self.node.info();
        };
        let mut current = &self.node;
        for part in parts {
            match current.nodes.get(*part) {
                Some(ProcTreeNode::Branch(branch)) => current = branch,
                _ => return vec![],
            }
        }
        match current.nodes.get(*last) {
            Some(ProcTreeNode::Branch(branch)) => branch.info(),
            Some(ProcTreeNode::File(_)) => vec![ElementInfo {
                name: (*last).to_owned(),
                directory: false,
            }],
            None => vec![],
        }
    }
}

fn remove_from(branch: &mut ProcTreeBranch, parts: &[&str]) -> Option<Arc<dyn ProcFile>> {
    let (first, rest) = parts.split_first()?;
    if rest.is_empty() && matches!(branch.nodes.get(*first), Some(ProcTreeNode::File(_))) {
        return match branch.nodes.remove(*first) {
            Some(ProcTreeNode::File(file)) => Some(file),
            _ => None,
        };
    }
    let removed = match branch.nodes.get_mut(*first)? {
        ProcTreeNode::Branch(child) if !rest.is_empty() => remove_from(child, rest),
        _ => None,
    };
    if let Some(ProcTreeNode::Branch(child)) = branch.nodes.get(*first) {
        if child.nodes.is_empty() {
            branch.nodes.remove(*first);
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proc::ProcError;

    struct Fixed(usize);

    impl ProcFile for Fixed {
        fn read(&self, _buf: &mut [u8]) -> core::result::Result<usize, ProcError> {
            Ok(self.0)
        }

        fn write(&self, _buf: &[u8]) -> core::result::Result<usize, ProcError> {
            Ok(self.0)
        }
    }

    fn file(tag: usize) -> Arc<dyn ProcFile> {
        Arc::new(Fixed(tag))
    }

    fn tag(file: Option<Arc<dyn ProcFile>>) -> Option<usize> {
        file.map(|f| f.read(&mut []).unwrap())
    }

    fn names(mut info: Vec<ElementInfo>) -> Vec<String> {
        info.sort_by(|a, b| a.name.cmp(&b.name));
        info.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn put_and_get() {
        let mut tree = ProcTree::new();
        tree.put("/proc/demomodule", file(1)).unwrap();
        assert_eq!(tag(tree.get("/proc/demomodule")), Some(1));
        assert_eq!(tag(tree.get("proc/demomodule")), Some(1));
        assert!(tree.get("/proc").is_none());
        assert!(tree.get("/proc/other").is_none());
        assert!(tree.get("/proc/demomodule/deeper").is_none());
    }

    #[test]
    fn rejects_duplicate_and_empty_paths() {
        let mut tree = ProcTree::new();
        tree.put("/proc/a", file(1)).unwrap();
        assert_eq!(
            tree.put("/proc/a", file(2)).err(),
            Some(ProcTreeError::AlreadyOccupied)
        );
        assert_eq!(tree.put("/", file(3)).err(), Some(ProcTreeError::InvalidPath));
        assert_eq!(tree.put("", file(3)).err(), Some(ProcTreeError::InvalidPath));
        assert_eq!(tag(tree.get("/proc/a")), Some(1));
    }

    #[test]
    fn file_and_directory_do_not_share_a_path() {
        let mut tree = ProcTree::new();
        tree.put("/dev/stack", file(1)).unwrap();
        assert_eq!(
            tree.put("/dev/stack/stats", file(2)).err(),
            Some(ProcTreeError::AlreadyOccupied)
        );
        assert_eq!(
            tree.put("/dev", file(3)).err(),
            Some(ProcTreeError::AlreadyOccupied)
        );
        assert_eq!(tag(tree.get("/dev/stack")), Some(1));
        assert!(tree.get("/dev/stack/stats").is_none());
        assert!(tree.get("/dev").is_none());
    }

    #[test]
    fn removing_a_directory_path_is_refused() {
        let mut tree = ProcTree::new();
        tree.put("/dev/stack", file(1)).unwrap();
        assert!(tree.remove("/dev").is_none());
        assert_eq!(tag(tree.get("/dev/stack")), Some(1));
    }

    #[test]
    fn remove_prunes_empty_branches() {
        let mut tree = ProcTree::new();
        tree.put("/proc/a", file(1)).unwrap();
        tree.put("/proc/b", file(2)).unwrap();
        assert_eq!(tag(tree.remove("/proc/a")), Some(1));
        assert!(tree.get("/proc/a").is_none());
        assert_eq!(names(tree.list("/")), vec!["proc/"]);
        assert_eq!(tag(tree.remove("/proc/b")), Some(2));
        assert!(tree.list("/").is_empty());
        assert!(tree.remove("/proc/b").is_none());
    }

    #[test]
    fn list_directories_and_files() {
        let mut tree = ProcTree::new();
        tree.put("/proc/demomodule", file(1)).unwrap();
        tree.put("/proc/sys/limit", file(2)).unwrap();
        tree.put("/dev/null", file(3)).unwrap();

        assert_eq!(names(tree.list("/")), vec!["dev/", "proc/"]);
        assert_eq!(names(tree.list("/proc")), vec!["demomodule", "sys/"]);
        assert_eq!(names(tree.list("/proc/demomodule")), vec!["demomodule"]);
        assert!(tree.list("/missing").is_empty());
        assert!(tree.list("/dev/null/x").is_empty());
    }
}
