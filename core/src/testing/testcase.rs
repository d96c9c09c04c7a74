use std::{
    cmp::Ordering,
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::fsutil;

/// Filename suffix marking an expected-output file.
pub const ANSWER_SUFFIX: &str = ".a";

/// One testcase: `<name>` holds the input, `<name>.a` the expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testcase {
    name: String,
    input_path: PathBuf,
    answer_path: PathBuf,
}

impl Testcase {
    pub fn new(
        name: impl Into<String>,
        input_path: impl Into<PathBuf>,
        answer_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input_path: input_path.into(),
            answer_path: answer_path.into(),
        }
    }

    pub fn in_dir(name: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        let name = name.into();
        let input_path = dir.as_ref().join(&name);
        let answer_path = dir.as_ref().join(format!("{}{}", name, ANSWER_SUFFIX));
        Self {
            name,
            input_path,
            answer_path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn read_input(&self) -> anyhow::Result<Vec<u8>> {
        tokio::fs::read(&self.input_path)
            .await
            .with_context(|| format!("failed to read file {}", self.input_path.to_string_lossy()))
    }

    pub async fn read_answer(&self) -> anyhow::Result<Vec<u8>> {
        tokio::fs::read(&self.answer_path)
            .await
            .with_context(|| format!("failed to read file {}", self.answer_path.to_string_lossy()))
    }

    /// Scan `dir` once and pair inputs with their answer files.
    /// Entries ending in [`ANSWER_SUFFIX`] are answers, everything else is an
    /// input; only complete pairs of regular files become testcases.
    /// The result is sorted by [`case_cmp`].
    pub fn enumerate(dir: impl AsRef<Path>) -> fsutil::Result<Vec<Self>> {
        #[derive(Default)]
        struct Pair {
            input: bool,
            answer: bool,
        }

        let dir = dir.as_ref();
        let mut pairs: HashMap<String, Pair> = HashMap::new();
        for entry in fsutil::read_dir(dir)?.filter_map(Result::ok) {
            let Ok(ft) = entry.file_type() else {
                continue;
            };
            if !ft.is_file() {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().into_owned();
            match filename.strip_suffix(ANSWER_SUFFIX) {
                Some(base) => pairs.entry(base.to_owned()).or_default().answer = true,
                None => pairs.entry(filename).or_default().input = true,
            }
        }

        let mut res: Vec<Self> = pairs
            .into_iter()
            .filter(|(_, p)| p.input && p.answer)
            .map(|(name, _)| Self::in_dir(name, dir))
            .collect();
        res.sort_by(|a, b| case_cmp(&a.name, &b.name));
        Ok(res)
    }
}

/// Order case names numerically when both parse as integers
/// ("2" before "10"), lexicographically otherwise.
pub fn case_cmp(x: &str, y: &str) -> Ordering {
    match (x.parse::<i64>(), y.parse::<i64>()) {
        (Ok(ix), Ok(iy)) => ix.cmp(&iy),
        _ => x.cmp(y),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| case_cmp(a, b));
        names
    }

    #[test]
    fn numeric_names_sort_numerically() {
        assert_eq!(sorted(vec!["10", "2", "1"]), vec!["1", "2", "10"]);
    }

    #[test]
    fn non_numeric_names_sort_lexicographically() {
        assert_eq!(sorted(vec!["b", "a"]), vec!["a", "b"]);
        assert_eq!(sorted(vec!["x2", "x10"]), vec!["x10", "x2"]);
    }

    #[test]
    fn numeric_pairs_stay_numeric_among_mixed_names() {
        assert_eq!(sorted(vec!["a", "10", "2"]), vec!["2", "10", "a"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sorted(vec!["3", "1", "b", "2", "a", "10"]);
        let twice = sorted(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn enumerate_pairs_complete_cases_only() {
        let dir = tempfile::tempdir().unwrap();
        let touch = |name: &str| std::fs::write(dir.path().join(name), b"x").unwrap();
        touch("1");
        touch("1.a");
        touch("10");
        touch("10.a");
        touch("2");
        touch("2.a");
        touch("orphan-input");
        touch("orphan-answer.a");
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let cases = Testcase::enumerate(dir.path()).unwrap();
        let names: Vec<&str> = cases.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["1", "2", "10"]);
    }

    #[test]
    fn enumerate_ignores_directories_named_like_cases() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("5")).unwrap();
        std::fs::write(dir.path().join("5.a"), b"x").unwrap();

        let cases = Testcase::enumerate(dir.path()).unwrap();
        assert!(cases.is_empty());
    }

    #[test]
    fn enumerate_fails_on_unreadable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        assert!(Testcase::enumerate(&missing).is_err());
    }

    #[tokio::test]
    async fn read_input_and_answer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("7"), b"in\n").unwrap();
        std::fs::write(dir.path().join("7.a"), b"out\n").unwrap();

        let t = Testcase::in_dir("7", dir.path());
        assert_eq!(t.read_input().await.unwrap(), b"in\n");
        assert_eq!(t.read_answer().await.unwrap(), b"out\n");
    }

    #[tokio::test]
    async fn read_missing_input_is_an_error() {
        let t = Testcase::in_dir("nope", "/no/such/dir");
        assert!(t.read_input().await.is_err());
    }
}
