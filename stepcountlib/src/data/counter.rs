//! High-level counting API.
//!
//! This module provides the main entry points for counting lines and steps
//! in a single file or a whole directory tree, with glob filtering, a
//! configurable candidate encoding list and an optional worker pool.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StepcountError;
use crate::source::dispatch::{Dispatch, Dispatcher, DEFAULT_IGNORED};
use crate::source::filter::{discover_files, FilterConfig, SourceFile};
use crate::Result;

use super::encoding::{EncodingResolver, DEFAULT_ENCODINGS};
use super::scanner::scan_bytes;
use super::stats::{FileStats, LanguageStats, ScanResult, Summary};
use super::syntax::LanguageVariant;
use super::trace::Trace;

/// Decoding and dispatch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Candidate encoding labels, tried in order.
    pub encodings: Vec<String>,
    /// Extensions (with leading dot) that are skipped.
    pub ignored: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            encodings: DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect(),
            ignored: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate encodings.
    pub fn encodings<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encodings = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Add an extension to the ignore-list.
    pub fn ignore(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        if !self.ignored.contains(&extension) {
            self.ignored.push(extension);
        }
        self
    }

    pub fn resolver(&self) -> Result<EncodingResolver> {
        EncodingResolver::from_labels(&self.encodings)
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.ignored.iter().cloned())
    }
}

/// Options for counting a directory.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    pub scan: ScanConfig,
    /// Collect the per-line debug trace
    pub trace: bool,
    /// Worker threads; 1 scans sequentially
    pub jobs: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            file_filter: FilterConfig::new(),
            scan: ScanConfig::default(),
            trace: false,
            jobs: 1,
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set decoding and dispatch settings.
    pub fn scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// Enable or disable the debug trace.
    pub fn trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Set the worker count (0 is treated as 1).
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

/// Result of counting a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountResult {
    /// Per-file statistics, in walk order
    pub files: Vec<FileStats>,
    /// Totals across all files
    pub summary: Summary,
    /// Files no candidate encoding could decode, in walk order
    pub decode_errors: Vec<PathBuf>,
    /// Debug trace, when requested
    #[serde(skip)]
    pub trace: Option<String>,
}

impl CountResult {
    /// Totals per scanner variant, skipped files last.
    ///
    /// Variants without files are left out.
    pub fn by_language(&self) -> Vec<LanguageStats> {
        LanguageVariant::ALL
            .into_iter()
            .map(Some)
            .chain([None])
            .filter_map(|language| {
                let summary: Summary = self
                    .files
                    .iter()
                    .filter(|file| file.language == language)
                    .collect();
                (summary.files > 0).then_some(LanguageStats { language, summary })
            })
            .collect()
    }
}

/// Count a single file.
///
/// The file is dispatched by its extension like any discovered file.
///
/// # Example
///
/// ```rust
/// use stepcountlib::{count_file, ScanConfig};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("query.sql");
/// fs::write(&path, "-- totals\nSELECT 1;\n").unwrap();
///
/// let stats = count_file(&path, &ScanConfig::default()).unwrap();
/// assert_eq!(stats.result.lines, Some(2));
/// assert_eq!(stats.result.steps, Some(1));
/// ```
pub fn count_file(path: impl AsRef<Path>, config: &ScanConfig) -> Result<FileStats> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(StepcountError::PathNotFound(path.to_path_buf()));
    }

    let source = SourceFile::new(path.to_path_buf(), path.parent().unwrap_or(path));
    let resolver = config.resolver()?;
    let (stats, _) = scan_source(&source, &resolver, &config.dispatcher(), false)?;
    Ok(stats)
}

/// Count every file under `path`.
///
/// Files are reported in walk order whether or not a worker pool is used.
/// Read failures abort the whole count; decode failures are reported per
/// file and counting carries on.
///
/// # Example
///
/// ```rust
/// use stepcountlib::{count_directory, CountOptions, FilterConfig};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("app.py"), "x = 1\n# note\n").unwrap();
/// fs::write(dir.path().join("notes.md"), "a\nb\nc\n").unwrap();
///
/// let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
/// assert_eq!(result.summary.files, 2);
/// assert_eq!(result.summary.lines, 5);
/// assert_eq!(result.summary.steps, 1);
///
/// let filter = FilterConfig::new().exclude("**/*.md").unwrap();
/// let result = count_directory(dir.path(), &CountOptions::new().filter(filter)).unwrap();
/// assert_eq!(result.summary.files, 1);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let files = discover_files(path, &options.file_filter)?;
    let resolver = options.scan.resolver()?;
    let dispatcher = options.scan.dispatcher();

    let scan = |file: &SourceFile| scan_source(file, &resolver, &dispatcher, options.trace);

    let scanned: Vec<(FileStats, Option<Trace>)> = if options.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
            .map_err(|e| StepcountError::WorkerPool(e.to_string()))?;
        pool.install(|| files.par_iter().map(scan).collect::<Result<_>>())?
    } else {
        files.iter().map(scan).collect::<Result<_>>()?
    };

    let mut result = CountResult::default();
    let mut trace = options.trace.then(Trace::new);

    for (stats, file_trace) in scanned {
        result.summary.add_file(&stats);
        if stats.result.is_error() {
            result.decode_errors.push(stats.path.clone());
        }
        if let (Some(trace), Some(file_trace)) = (trace.as_mut(), file_trace) {
            trace.append(file_trace);
        }
        result.files.push(stats);
    }

    result.trace = trace.map(Trace::into_string);
    Ok(result)
}

fn scan_source(
    file: &SourceFile,
    resolver: &EncodingResolver,
    dispatcher: &Dispatcher,
    trace: bool,
) -> Result<(FileStats, Option<Trace>)> {
    let mut stats = FileStats {
        path: file.path.clone(),
        relative_dir: file.relative_dir.clone(),
        file_name: file.file_name.clone(),
        extension: file.extension.clone(),
        language: None,
        result: ScanResult::skipped(),
        encoding: None,
    };

    let variant = match dispatcher.select_file(file) {
        Dispatch::Scan(variant) => variant,
        Dispatch::Skip => {
            debug!(path = %file.path.display(), "skipped by ignore policy");
            return Ok((stats, None));
        }
    };

    let bytes = fs::read(&file.path).map_err(|source| StepcountError::FileRead {
        path: file.path.clone(),
        source,
    })?;

    let mut file_trace = (trace && variant.counts_steps()).then(|| {
        let mut trace = Trace::new();
        trace.header(&file.path);
        trace
    });

    let (result, encoding) = scan_bytes(&bytes, variant, resolver, file_trace.as_mut());

    if result.is_error() {
        warn!(path = %file.path.display(), "file encoding error");
    } else {
        debug!(
            path = %file.path.display(),
            language = %variant,
            lines = ?result.lines,
            steps = ?result.steps,
            encoding = encoding.unwrap_or_default(),
            "scanned"
        );
    }

    stats.language = Some(variant);
    stats.result = result;
    stats.encoding = encoding.map(str::to_string);

    Ok((stats, file_trace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::ScanStatus;
    use tempfile::tempdir;

    fn write_tree(dir: &Path) {
        fs::create_dir_all(dir.join("db")).unwrap();
        fs::create_dir_all(dir.join("src")).unwrap();

        fs::write(dir.join("app.py"), "x = 1\n# comment\n\n\"hello\"\n").unwrap();
        fs::write(dir.join("settings.ini"), "[a]\nb=1\n").unwrap();
        fs::write(dir.join("notes.md"), "1\n2\n3\n4\n5\n6\n7\n").unwrap();
        fs::write(dir.join(".editorconfig"), "root = true\n").unwrap();
        fs::write(dir.join("db/init.sql"), "-- note\nSELECT 1;\n").unwrap();
        fs::write(dir.join("src/Main.java"), "/*\n comment\n*/\nint a=1;\n").unwrap();
        fs::write(dir.join("src/broken.c"), b"int x;\xff\n").unwrap();
    }

    fn find<'a>(result: &'a CountResult, name: &str) -> &'a FileStats {
        result
            .files
            .iter()
            .find(|f| f.file_name == name)
            .unwrap()
    }

    #[test]
    fn test_count_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("app.py");
        fs::write(&path, "def f():\n    \"\"\"\n    doc\n    \"\"\"\n    return 1\n").unwrap();

        let stats = count_file(&path, &ScanConfig::default()).unwrap();

        assert_eq!(stats.language, Some(LanguageVariant::PythonLike));
        assert_eq!(stats.result, ScanResult::counted(5, Some(2)));
        assert_eq!(stats.encoding.as_deref(), Some("UTF-8"));
        assert_eq!(stats.extension, ".py");
    }

    #[test]
    fn test_count_file_is_idempotent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.c");
        fs::write(&path, "int a; /* x\ny */ int b;\n").unwrap();

        let first = count_file(&path, &ScanConfig::default()).unwrap();
        let second = count_file(&path, &ScanConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_file_missing() {
        let result = count_file("/nonexistent/a.py", &ScanConfig::default());
        assert!(matches!(result, Err(StepcountError::PathNotFound(_))));
    }

    #[test]
    fn test_count_directory() {
        let temp = tempdir().unwrap();
        write_tree(temp.path());

        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

        let names: Vec<_> = result.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                ".editorconfig",
                "app.py",
                "notes.md",
                "settings.ini",
                "init.sql",
                "broken.c",
                "Main.java",
            ]
        );

        assert_eq!(find(&result, "app.py").result, ScanResult::counted(4, Some(2)));
        assert_eq!(find(&result, "Main.java").result, ScanResult::counted(4, Some(1)));
        assert_eq!(find(&result, "init.sql").result, ScanResult::counted(2, Some(1)));
        assert_eq!(find(&result, "notes.md").result, ScanResult::counted(7, None));

        let ini = find(&result, "settings.ini");
        assert!(ini.is_skipped());
        assert_eq!(ini.result.lines, None);
        assert_eq!(ini.result.steps, None);
        assert!(find(&result, ".editorconfig").is_skipped());

        let broken = find(&result, "broken.c");
        assert_eq!(broken.result.status, ScanStatus::Error);
        assert_eq!(broken.result.lines, Some(0));
        assert_eq!(broken.result.steps, Some(0));
        assert_eq!(result.decode_errors, vec![broken.path.clone()]);

        assert_eq!(
            result.summary,
            Summary {
                files: 7,
                lines: 17,
                steps: 4,
                skipped: 2,
                errors: 1,
            }
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let temp = tempdir().unwrap();
        write_tree(temp.path());

        let sequential =
            count_directory(temp.path(), &CountOptions::new().trace(true)).unwrap();
        let parallel =
            count_directory(temp.path(), &CountOptions::new().trace(true).jobs(4)).unwrap();

        assert_eq!(sequential.files, parallel.files);
        assert_eq!(sequential.summary, parallel.summary);
        assert_eq!(sequential.trace, parallel.trace);
    }

    #[test]
    fn test_trace_covers_classified_files_only() {
        let temp = tempdir().unwrap();
        write_tree(temp.path());

        let result = count_directory(temp.path(), &CountOptions::new().trace(true)).unwrap();
        let trace = result.trace.unwrap();

        assert!(trace.contains("app.py\n|     1: [x] [=] [1]\n      2: \n"));
        assert!(trace.contains("init.sql\n      1: \n|     2: [SELECT] [1] [;]\n"));
        assert!(!trace.contains("notes.md"));
        assert!(!trace.contains("settings.ini"));
    }

    #[test]
    fn test_no_trace_unless_requested() {
        let temp = tempdir().unwrap();
        write_tree(temp.path());

        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_custom_scan_config() {
        let temp = tempdir().unwrap();
        write_tree(temp.path());

        let scan = ScanConfig::new().ignore(".md").encodings(["utf-8"]);
        let result =
            count_directory(temp.path(), &CountOptions::new().scan_config(scan)).unwrap();

        assert!(find(&result, "notes.md").is_skipped());
        assert_eq!(result.summary.skipped, 3);
    }

    #[test]
    fn test_unknown_encoding_label() {
        let temp = tempdir().unwrap();
        let scan = ScanConfig::new().encodings(["utf-8", "not-an-encoding"]);

        let result = count_directory(temp.path(), &CountOptions::new().scan_config(scan));
        assert!(matches!(result, Err(StepcountError::UnknownEncoding(_))));
    }

    #[test]
    fn test_by_language() {
        let temp = tempdir().unwrap();
        write_tree(temp.path());

        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();
        let groups = result.by_language();

        let languages: Vec<_> = groups.iter().map(|g| g.language).collect();
        assert_eq!(
            languages,
            vec![
                Some(LanguageVariant::PythonLike),
                Some(LanguageVariant::CFamily),
                Some(LanguageVariant::SqlLike),
                Some(LanguageVariant::PlainText),
                None,
            ]
        );

        let c_family = &groups[1].summary;
        assert_eq!(c_family.files, 2);
        assert_eq!(c_family.lines, 4);
        assert_eq!(c_family.steps, 1);
        assert_eq!(c_family.errors, 1);
        assert_eq!(groups[4].summary.skipped, 2);
    }

    #[test]
    fn test_options_builder() {
        let options = CountOptions::new().jobs(0).trace(true);
        assert_eq!(options.jobs, 1);
        assert!(options.trace);
        assert_eq!(options.scan, ScanConfig::default());
    }

    #[test]
    fn test_scan_config_serde() {
        let json = serde_json::to_string(&ScanConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"encodings":["utf-8","shift_jis","gb2312"],"ignored":[".dat",".ini"]}"#
        );
    }
}
