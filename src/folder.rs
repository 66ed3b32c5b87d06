use std::path::Path;

use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedExtension {
    Txt,
    Py,
    Pdf,
    Jpg,
}

impl TrackedExtension {
    pub const ALL: [TrackedExtension; 4] = [
        TrackedExtension::Txt,
        TrackedExtension::Py,
        TrackedExtension::Pdf,
        TrackedExtension::Jpg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrackedExtension::Txt => "txt",
            TrackedExtension::Py => "py",
            TrackedExtension::Pdf => "pdf",
            TrackedExtension::Jpg => "jpg",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ext| ext.as_str() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderAnalysis {
    counts: [u64; 4],
    percentages: [f64; 4],
    pub total_files_scanned: u64,
}

impl FolderAnalysis {
    fn from_counts(counts: [u64; 4], total_files_scanned: u64) -> Self {
        // Denominator is the tracked files only, not every file scanned.
        let tracked: u64 = counts.iter().sum();
        let mut percentages = [0.0; 4];
        if tracked > 0 {
            for (pct, &count) in percentages.iter_mut().zip(&counts) {
                *pct = count as f64 / tracked as f64 * 100.0;
            }
        }
        FolderAnalysis {
            counts,
            percentages,
            total_files_scanned,
        }
    }

    pub fn count(&self, ext: TrackedExtension) -> u64 {
        self.counts[ext.index()]
    }

    pub fn percent(&self, ext: TrackedExtension) -> f64 {
        self.percentages[ext.index()]
    }
}

/// Text after the last `.`, lowercased. Names without a dot yield the whole
/// lowercased name.
pub fn extension_key(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}

/// Counts files below `path` by extension. A path that is not a directory
/// yields an all-zero analysis. Unreadable entries are skipped.
pub fn analyze_folder(path: &Path) -> FolderAnalysis {
    if !path.is_dir() {
        return FolderAnalysis::default();
    }

    let mut counts = [0u64; 4];
    let mut total = 0u64;

    for entry in WalkDir::new(path).min_depth(1).into_iter().flatten() {
        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }
        total += 1;
        let name = entry.file_name().to_string_lossy();
        if let Some(ext) = TrackedExtension::from_key(&extension_key(&name)) {
            counts[ext.index()] += 1;
        }
    }

    FolderAnalysis::from_counts(counts, total)
}
