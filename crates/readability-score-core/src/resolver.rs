//! Locale to syllable-splitter resolution.
//!
//! The scorer never builds filesystem paths itself. It asks a
//! [`SyllableProvider`] for the splitter of a locale; [`DictionaryResolver`]
//! maps locales onto `hyph_<locale>.dic` files in a list of search
//! directories, and [`CachedProvider`] keeps parsed dictionaries around so
//! each one is read at most once per process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{ScoreError, ScoringResult};
use crate::hyphenation::{PatternHyphenator, SyllableSplitter};

/// Directories searched when no explicit dictionary directory is configured.
pub const DEFAULT_DICTIONARY_DIRS: &[&str] = &[
    "/usr/share/hyphen",
    "/usr/share/myspell",
    "/usr/share/myspell/dicts",
];

/// Shared, immutable syllable splitter.
pub type SharedSplitter = Arc<dyn SyllableSplitter>;

/// Capability: obtain the syllable splitter for a locale.
pub trait SyllableProvider: Send + Sync {
    /// Build or fetch the splitter for `locale`.
    ///
    /// # Errors
    ///
    /// [`ScoreError::ResourceUnavailable`] when no resource exists for the
    /// locale; IO or parse errors when one exists but cannot be loaded.
    fn splitter(&self, locale: &str) -> ScoringResult<SharedSplitter>;
}

/// Resolves locales to MySpell hyphenation dictionaries on disk.
#[derive(Debug, Clone)]
pub struct DictionaryResolver {
    search_dirs: Vec<Utf8PathBuf>,
}

impl Default for DictionaryResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DICTIONARY_DIRS.iter().map(Utf8PathBuf::from))
    }
}

impl DictionaryResolver {
    /// Create a resolver searching `dirs` in order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            search_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Directories searched, in order.
    pub fn search_dirs(&self) -> &[Utf8PathBuf] {
        &self.search_dirs
    }

    /// File names tried for `locale`, most specific first.
    ///
    /// `en-GB` also tries `hyph_en_GB.dic`, since dictionaries are named with
    /// underscores.
    pub fn file_names(locale: &str) -> Vec<String> {
        let mut names = vec![format!("hyph_{locale}.dic")];
        let underscored = locale.replace('-', "_");
        if underscored != locale {
            names.push(format!("hyph_{underscored}.dic"));
        }
        names
    }

    /// First existing dictionary file for `locale`.
    pub fn path_for(&self, locale: &str) -> ScoringResult<Utf8PathBuf> {
        if !is_valid_locale(locale) {
            return Err(self.unavailable(locale));
        }
        let names = Self::file_names(locale);
        self.search_dirs
            .iter()
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| self.unavailable(locale))
    }

    fn unavailable(&self, locale: &str) -> ScoreError {
        ScoreError::ResourceUnavailable {
            locale: locale.to_string(),
            searched: self
                .search_dirs
                .iter()
                .map(|dir| dir.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl SyllableProvider for DictionaryResolver {
    #[tracing::instrument(skip(self))]
    fn splitter(&self, locale: &str) -> ScoringResult<SharedSplitter> {
        let path = self.path_for(locale)?;
        tracing::debug!(%path, "resolved hyphenation dictionary");
        Ok(Arc::new(PatternHyphenator::from_path(&path)?))
    }
}

/// Locale identifiers are file-name fragments: no separators, no traversal.
fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '@'))
        && Utf8Path::new(locale).file_name() == Some(locale)
}

/// Read-mostly cache of splitters keyed by locale.
///
/// Concurrent readers share the read lock; a miss builds the splitter
/// without holding any lock and then publishes it. Failed lookups are not
/// cached.
pub struct CachedProvider<P> {
    inner: P,
    cache: RwLock<HashMap<String, SharedSplitter>>,
}

impl<P: std::fmt::Debug> std::fmt::Debug for CachedProvider<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.cache.read().map_or(0, |c| c.len());
        f.debug_struct("CachedProvider")
            .field("inner", &self.inner)
            .field("cached", &cached)
            .finish()
    }
}

impl<P: SyllableProvider> CachedProvider<P> {
    /// Wrap `inner` with a locale-keyed cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped provider.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of locales currently cached.
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: SyllableProvider> SyllableProvider for CachedProvider<P> {
    fn splitter(&self, locale: &str) -> ScoringResult<SharedSplitter> {
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(locale)
        {
            tracing::trace!(locale, "splitter cache hit");
            return Ok(Arc::clone(hit));
        }

        let built = self.inner.splitter(locale)?;
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // another thread may have won the race; keep the first one published
        let entry = cache.entry(locale.to_string()).or_insert(built);
        Ok(Arc::clone(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const PATTERNS: &str = "UTF-8\nhy3ph\nhe2n\nhena4\nhen5at\n1na\nn2at\n1tio\n2io\no2n\n";

    fn dict_dir(files: &[&str]) -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().unwrap();
        for name in files {
            fs::write(tmp.path().join(name), PATTERNS).unwrap();
        }
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, path)
    }

    #[test]
    fn resolves_locale_to_dictionary() {
        let (_tmp, dir) = dict_dir(&["hyph_en_GB.dic"]);
        let resolver = DictionaryResolver::new([dir.clone()]);
        assert_eq!(
            resolver.path_for("en_GB").unwrap(),
            dir.join("hyph_en_GB.dic")
        );
        let splitter = resolver.splitter("en_GB").unwrap();
        assert_eq!(splitter.syllables("hyphenation"), 3);
    }

    #[test]
    fn dashed_locale_falls_back_to_underscore() {
        let (_tmp, dir) = dict_dir(&["hyph_en_US.dic"]);
        let resolver = DictionaryResolver::new([dir.clone()]);
        assert_eq!(
            resolver.path_for("en-US").unwrap(),
            dir.join("hyph_en_US.dic")
        );
    }

    #[test]
    fn earlier_directory_wins() {
        let (_a, first) = dict_dir(&["hyph_nl.dic"]);
        let (_b, second) = dict_dir(&["hyph_nl.dic"]);
        let resolver = DictionaryResolver::new([first.clone(), second]);
        assert_eq!(resolver.path_for("nl").unwrap(), first.join("hyph_nl.dic"));
    }

    #[test]
    fn missing_locale_is_resource_unavailable() {
        let (_tmp, dir) = dict_dir(&[]);
        let resolver = DictionaryResolver::new([dir]);
        let err = resolver.splitter("xx_YY").err().unwrap();
        assert!(matches!(err, ScoreError::ResourceUnavailable { ref locale, .. } if locale == "xx_YY"));
    }

    #[test]
    fn unavailable_lists_every_searched_dir() {
        let resolver = DictionaryResolver::new([
            Utf8PathBuf::from("/first/hyph"),
            Utf8PathBuf::from("/second/hyph"),
        ]);
        let err = resolver.splitter("xx_YY").err().unwrap();
        let ScoreError::ResourceUnavailable { searched, .. } = err else {
            panic!("expected ResourceUnavailable");
        };
        assert_eq!(searched, "/first/hyph, /second/hyph");
    }

    #[test]
    fn traversal_locales_are_rejected() {
        let (_tmp, dir) = dict_dir(&["hyph_en.dic"]);
        let resolver = DictionaryResolver::new([dir]);
        for locale in ["", "../en", "en/../en", "a b"] {
            assert!(
                matches!(
                    resolver.path_for(locale),
                    Err(ScoreError::ResourceUnavailable { .. })
                ),
                "locale {locale:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_search_dirs() {
        let resolver = DictionaryResolver::default();
        assert_eq!(resolver.search_dirs().len(), DEFAULT_DICTIONARY_DIRS.len());
    }

    struct CountingProvider {
        builds: AtomicUsize,
    }

    impl SyllableProvider for CountingProvider {
        fn splitter(&self, locale: &str) -> ScoringResult<SharedSplitter> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            if locale == "missing" {
                return Err(ScoreError::ResourceUnavailable {
                    locale: locale.to_string(),
                    searched: String::new(),
                });
            }
            Ok(Arc::new(PatternHyphenator::from_patterns("1b\n")?))
        }
    }

    #[test]
    fn cache_builds_each_locale_once() {
        let cached = CachedProvider::new(CountingProvider {
            builds: AtomicUsize::new(0),
        });
        let a = cached.splitter("en").unwrap();
        let b = cached.splitter("en").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        cached.splitter("de").unwrap();
        assert_eq!(cached.inner().builds.load(Ordering::SeqCst), 2);
        assert_eq!(cached.len(), 2);
    }

    #[test]
    fn cache_does_not_remember_failures() {
        let cached = CachedProvider::new(CountingProvider {
            builds: AtomicUsize::new(0),
        });
        assert!(cached.splitter("missing").is_err());
        assert!(cached.splitter("missing").is_err());
        assert_eq!(cached.inner().builds.load(Ordering::SeqCst), 2);
        assert!(cached.is_empty());
    }

    #[test]
    fn cache_is_shareable_across_threads() {
        let cached = Arc::new(CachedProvider::new(CountingProvider {
            builds: AtomicUsize::new(0),
        }));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cached = Arc::clone(&cached);
                std::thread::spawn(move || cached.splitter("en").unwrap().syllables("abba"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert_eq!(cached.len(), 1);
    }
}
