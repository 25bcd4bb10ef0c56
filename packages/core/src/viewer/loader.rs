//! Fetching course snapshots into a shared session
//!
//! Every reload takes a ticket before it starts fetching. When the fetch
//! resolves, the snapshot is applied only if no newer reload has been started
//! in the meantime; older results are discarded (last write wins). The ticket
//! check and the apply happen under the same write lock.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::session::CourseSession;
use crate::error::{CourseError, Result};
use crate::models::Course;

/// Source of course trees, usually the REST client of the backend
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch the full course tree
    ///
    /// # Errors
    ///
    /// `CourseError::CourseNotFound` when the course does not exist, or
    /// `CourseError::FetchFailed` when the transport fails.
    async fn fetch_course(&self, course_id: &str) -> Result<Course>;
}

/// Reads `<dir>/<course_id>.json` files in the backend's JSON shape
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl CourseSource for JsonDirSource {
    async fn fetch_course(&self, course_id: &str) -> Result<Course> {
        let path = self.dir.join(format!("{}.json", course_id));
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CourseError::course_not_found(course_id));
            }
            Err(e) => return Err(CourseError::fetch_failed(course_id, e.to_string())),
        };
        Course::from_json(&raw)
    }
}

/// Handed out when a reload starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    sequence: u64,
    course_id: String,
}

impl ReloadTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The snapshot was applied as this session version
    Applied { version: u64 },
    /// A newer reload was started; this result was discarded
    Superseded,
}

pub struct CourseLoader {
    source: Arc<dyn CourseSource>,
    session: Arc<RwLock<CourseSession>>,
    latest_ticket: AtomicU64,
}

impl CourseLoader {
    pub fn new(source: Arc<dyn CourseSource>, session: Arc<RwLock<CourseSession>>) -> Self {
        Self {
            source,
            session,
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Shared session this loader writes into
    pub fn session(&self) -> Arc<RwLock<CourseSession>> {
        Arc::clone(&self.session)
    }

    /// Start a reload, superseding every reload started before it
    pub fn begin_reload(&self, course_id: &str) -> ReloadTicket {
        let sequence = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(course_id, sequence, "Reload started");
        ReloadTicket {
            sequence,
            course_id: course_id.to_string(),
        }
    }

    /// Finish a reload with the result of its fetch.
    ///
    /// A superseded reload is discarded even when its fetch failed, so a stale
    /// error never masks a newer snapshot.
    pub async fn complete_reload(
        &self,
        ticket: ReloadTicket,
        fetched: Result<Course>,
    ) -> Result<ReloadOutcome> {
        let mut session = self.session.write().await;

        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket.sequence != latest {
            warn!(
                course_id = %ticket.course_id,
                sequence = ticket.sequence,
                latest,
                "Discarding superseded course reload"
            );
            return Ok(ReloadOutcome::Superseded);
        }

        let course = fetched?;
        let version = session.apply_snapshot(course);
        Ok(ReloadOutcome::Applied { version })
    }

    /// Fetch a course and apply it unless a newer reload overtakes it
    pub async fn reload(&self, course_id: &str) -> Result<ReloadOutcome> {
        let ticket = self.begin_reload(course_id);
        let fetched = self.source.fetch_course(course_id).await;
        self.complete_reload(ticket, fetched).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::models::{Lesson, Module};
    use std::io::Write;

    fn course(title: &str) -> Course {
        Course::new_with_id("c1", title).with_module(
            Module::new_with_id("m1", "Module", 1).with_lesson(Lesson::new_with_id("l1", "L1", 1)),
        )
    }

    fn loader(source: impl CourseSource + 'static) -> CourseLoader {
        CourseLoader::new(
            Arc::new(source),
            Arc::new(RwLock::new(CourseSession::new(ViewerConfig::default()))),
        )
    }

    struct Fixed(Course);

    #[async_trait]
    impl CourseSource for Fixed {
        async fn fetch_course(&self, _course_id: &str) -> Result<Course> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_reload_applies_snapshot() {
        let loader = loader(Fixed(course("First")));
        let outcome = loader.reload("c1").await.unwrap();
        assert_eq!(outcome, ReloadOutcome::Applied { version: 1 });

        let session = loader.session();
        let session = session.read().await;
        assert_eq!(session.outline().len(), 1);
        assert_eq!(session.course().map(|c| c.title.as_str()), Some("First"));
    }

    #[tokio::test]
    async fn test_older_ticket_is_discarded() {
        let loader = loader(Fixed(course("unused")));
        let older = loader.begin_reload("c1");
        let newer = loader.begin_reload("c1");
        assert!(newer.sequence() > older.sequence());

        let applied = loader
            .complete_reload(newer, Ok(course("Newer")))
            .await
            .unwrap();
        assert_eq!(applied, ReloadOutcome::Applied { version: 1 });

        let discarded = loader
            .complete_reload(older, Ok(course("Older")))
            .await
            .unwrap();
        assert_eq!(discarded, ReloadOutcome::Superseded);

        let session = loader.session();
        let session = session.read().await;
        assert_eq!(session.course().map(|c| c.title.as_str()), Some("Newer"));
        assert_eq!(session.version(), 1);
    }

    #[tokio::test]
    async fn test_superseded_error_is_discarded() {
        let loader = loader(Fixed(course("unused")));
        let older = loader.begin_reload("c1");
        let _newer = loader.begin_reload("c1");
        let outcome = loader
            .complete_reload(older, Err(CourseError::fetch_failed("c1", "timeout")))
            .await
            .unwrap();
        assert_eq!(outcome, ReloadOutcome::Superseded);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_snapshot() {
        let loader = loader(Fixed(course("First")));
        loader.reload("c1").await.unwrap();

        let ticket = loader.begin_reload("c1");
        let result = loader
            .complete_reload(ticket, Err(CourseError::fetch_failed("c1", "503")))
            .await;
        assert!(matches!(result, Err(CourseError::FetchFailed { .. })));

        let session = loader.session();
        assert_eq!(session.read().await.version(), 1);
    }

    #[test]
    fn test_json_dir_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("c1.json")).unwrap();
        write!(file, "{}", serde_json::to_string(&course("From disk")).unwrap()).unwrap();

        let source = JsonDirSource::new(dir.path());
        let fetched = tokio_test::block_on(source.fetch_course("c1")).unwrap();
        assert_eq!(fetched.title, "From disk");

        let missing = tokio_test::block_on(source.fetch_course("c2"));
        assert!(matches!(missing, Err(CourseError::CourseNotFound { .. })));
    }
}
