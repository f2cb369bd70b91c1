//! The process-wide plan cache.
//!
//! Every (shape, source type) pair is compiled at most once per process.
//! The outcome, whether a usable [`Plan`] or a negative [`Diagnosis`], is
//! stored under the pair's type identities and returned for every later
//! projection of the same pair. Entries are never evicted or replaced:
//! shapes and member tables are immutable for the lifetime of the process,
//! so a computed outcome can never become stale.
//!
//! # Concurrency
//!
//! Compilation happens outside any lock. Threads racing to compile the
//! same pair may do the work twice, but only the first writer's entry is
//! kept and every caller observes that single shared entry afterwards.
//! The lock is only ever held for a lookup or an insert, never across a
//! compile, so recursive compilation of nested shapes cannot deadlock.
//!
//! One class of outcome is deliberately not cached: diagnoses that exist
//! only because the nesting depth limit was hit. Whether the limit is hit
//! depends on how deep in a shape graph the pair was reached, so caching
//! such a diagnosis would poison the pair for shallower, valid uses.

mod lock;

use core::{
    any::TypeId,
    fmt::{self, Display},
};

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use shapecast_internals::TypeInfo;
use triomphe::Arc;

use self::lock::CacheLock;
use crate::{
    compile::compile,
    diagnosis::Diagnosis,
    plan::Plan,
    shape::ShapeDescriptor,
};

/// One cached compilation outcome.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// The shape fits the source type; projections execute this plan.
    Compiled(Arc<Plan>),
    /// The shape does not fit the source type; projections fail with this
    /// diagnosis without re-checking anything.
    Incompatible(Arc<Diagnosis>),
}

impl CacheEntry {
    /// The cached plan, if the pair compiled successfully.
    pub fn plan(&self) -> Option<&Arc<Plan>> {
        match self {
            CacheEntry::Compiled(plan) => Some(plan),
            CacheEntry::Incompatible(_) => None,
        }
    }

    /// The cached diagnosis, if the pair is incompatible.
    pub fn diagnosis(&self) -> Option<&Arc<Diagnosis>> {
        match self {
            CacheEntry::Compiled(_) => None,
            CacheEntry::Incompatible(diagnosis) => Some(diagnosis),
        }
    }

    fn into_result(self) -> Result<Arc<Plan>, Arc<Diagnosis>> {
        match self {
            CacheEntry::Compiled(plan) => Ok(plan),
            CacheEntry::Incompatible(diagnosis) => Err(diagnosis),
        }
    }
}

impl Display for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheEntry::Compiled(plan) => write!(
                f,
                "Plan projecting shape {} from source type {}",
                plan.shape().shape_name(),
                plan.source().type_name()
            ),
            CacheEntry::Incompatible(diagnosis) => write!(
                f,
                "Negative entry for shape {} and source type {} ({} failed members)",
                diagnosis.shape_name(),
                diagnosis.source_type_name(),
                diagnosis.failures().len()
            ),
        }
    }
}

struct PlanMap {
    map: HashMap<(TypeId, TypeId), CacheEntry, FxBuildHasher>,
}

impl PlanMap {
    const fn new() -> Self {
        Self {
            map: HashMap::with_hasher(FxBuildHasher),
        }
    }

    fn get(&self, key: &(TypeId, TypeId)) -> Option<CacheEntry> {
        self.map.get(key).cloned()
    }

    /// Inserts `entry` unless the key is already present, and returns the
    /// entry that ends up stored. The first writer wins.
    fn insert_if_absent(&mut self, key: (TypeId, TypeId), entry: CacheEntry) -> CacheEntry {
        self.map.entry(key).or_insert(entry).clone()
    }

    fn values(&self) -> impl Iterator<Item = &CacheEntry> {
        self.map.values()
    }
}

/// Global plan cache, keyed by (shape identity, source type identity).
static PLANS: CacheLock<PlanMap> = CacheLock::new(PlanMap::new());

fn key(shape: &ShapeDescriptor, source: &TypeInfo) -> (TypeId, TypeId) {
    (shape.shape_id(), source.type_id())
}

/// Returns the cached compilation outcome for a (shape, source) pair, if
/// one has been stored.
///
/// This never triggers compilation; it only observes what earlier
/// projections have already established.
pub fn lookup(shape: &ShapeDescriptor, source: &TypeInfo) -> Option<CacheEntry> {
    PLANS.read().get().get(&key(shape, source))
}

/// Returns the plan for a (shape, source) pair, compiling and caching it
/// on first use.
pub(crate) fn get_or_compile(
    shape: &'static ShapeDescriptor,
    source: &'static TypeInfo,
) -> Result<Arc<Plan>, Arc<Diagnosis>> {
    get_or_compile_at(shape, source, 0)
}

/// Depth-carrying variant of [`get_or_compile`], used when compiling
/// nested shape declarations.
pub(crate) fn get_or_compile_at(
    shape: &'static ShapeDescriptor,
    source: &'static TypeInfo,
    depth: usize,
) -> Result<Arc<Plan>, Arc<Diagnosis>> {
    let key = key(shape, source);

    if let Some(entry) = PLANS.read().get().get(&key) {
        return entry.into_result();
    }

    // Compile with no lock held; racing threads may duplicate this work,
    // but insert_if_absent keeps a single winner.
    let entry = match compile(shape, source, depth) {
        Ok(plan) => CacheEntry::Compiled(plan),
        Err(diagnosis) => {
            if diagnosis.is_depth_limited() {
                return Err(diagnosis);
            }
            CacheEntry::Incompatible(diagnosis)
        }
    };

    PLANS.write().get().insert_if_absent(key, entry).into_result()
}

/// Calls a function for each entry currently stored in the plan cache,
/// for debugging purposes.
///
/// # Warning
///
/// This function holds the internal cache lock for reading while it runs,
/// so projecting a not-yet-cached pair from inside `f` can deadlock.
///
/// # Examples
///
/// ```
/// use shapecast::cache::debug_entries;
///
/// debug_entries(|entry| {
///     println!("cached: {entry}");
/// });
/// ```
pub fn debug_entries(mut f: impl FnMut(&dyn Display)) {
    for entry in PLANS.read().get().values() {
        f(entry);
    }
}
