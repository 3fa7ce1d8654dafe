use git2::{Repository, Signature};
use line_tracker::source::{FsSource, Git2Source, LineSource};
use line_tracker::{LineMapping, Revision, Status};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Shared git repository fixture for integration tests.
///
/// Keeps a `git2::Repository` for low-level setup (creating commits and
/// tags) and exposes [`source()`][TestRepo::source] to obtain a `Git2Source`
/// for the code under test.
#[allow(dead_code)]
pub struct TestRepo {
    pub _temp_dir: TempDir,
    pub repo: Repository,
}

#[allow(dead_code)]
impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        Self {
            _temp_dir: temp_dir,
            repo,
        }
    }

    pub fn path(&self) -> PathBuf {
        self._temp_dir.path().to_path_buf()
    }

    /// Open a `Git2Source` on this repository.
    pub fn source(&self) -> Git2Source {
        Git2Source::open(self.path()).unwrap()
    }

    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> git2::Oid {
        let repo_path = self.repo.workdir().unwrap();
        let file_path = repo_path.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&file_path, content).unwrap();

        let mut index = self.repo.index().unwrap();
        index.add_path(std::path::Path::new(path)).unwrap();
        index.write().unwrap();

        let tree_oid = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_oid).unwrap();

        let sig = Signature::now("Test User", "test@example.com").unwrap();

        let parent_commit = if let Ok(head) = self.repo.head() {
            Some(self.repo.find_commit(head.target().unwrap()).unwrap())
        } else {
            None
        };

        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub fn create_tag(&self, name: &str, target: git2::Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        self.repo
            .tag(name, commit.as_object(), &sig, "test tag", false)
            .unwrap();
    }
}

/// Load a revision from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> Revision {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    FsSource::with_base(base).load(name).unwrap()
}

/// Assert the structural guarantees every mapping must meet: one entry per
/// old line in order, fuzzy targets inside the window, no new line used
/// twice, and scores consistent with status.
#[allow(dead_code)]
pub fn assert_well_formed(mapping: &LineMapping, old: &Revision, new: &Revision, window: usize) {
    assert_eq!(mapping.len(), old.len(), "one entry per old line");

    let mut targets = HashSet::new();
    for (i, entry) in mapping.entries().iter().enumerate() {
        assert_eq!(entry.old_index, i + 1, "entries ordered without gaps");
        assert!((0.0..=1.0).contains(&entry.score));

        match (entry.status, entry.new_index) {
            (Status::Deleted, None) => assert_eq!(entry.score, 0.0),
            (Status::Deleted, Some(n)) => panic!("deleted line {} maps to {}", entry.old_index, n),
            (_, None) => panic!("line {} has no target", entry.old_index),
            (status, Some(n)) => {
                assert!(n >= 1 && n <= new.len(), "target {} out of range", n);
                assert!(targets.insert(n), "new line {} used twice", n);
                if status == Status::Unchanged {
                    assert_eq!(
                        old.line(entry.old_index).unwrap().normalized,
                        new.line(n).unwrap().normalized
                    );
                } else {
                    assert!(
                        entry.old_index.abs_diff(n) <= window,
                        "fuzzy match {} -> {} outside window",
                        entry.old_index,
                        n
                    );
                }
            }
        }
    }
}
