use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Enrollment, Student};

/// EnrollmentRepository
///
/// Contract for the authoritative enrollment collection. Implementations must
/// run every check-then-act method (`insert`, `remove`, `clear`) atomically so
/// concurrent requests cannot produce duplicates or lose updates.
///
/// **Send + Sync + async_trait** keep `Arc<dyn EnrollmentRepository>` shareable
/// across Axum's task boundaries.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Every record in insertion order.
    async fn all(&self) -> Result<Vec<Enrollment>, StoreError>;

    /// Removes every record and returns how many were dropped.
    async fn clear(&self) -> Result<usize, StoreError>;

    /// Course ids of one student in insertion order.
    async fn courses_for(&self, student_id: &str) -> Result<Vec<String>, StoreError>;

    /// Appends the record unless the pair already exists.
    /// Returns true if a record was inserted, false otherwise (duplicate).
    async fn insert(&self, enrollment: Enrollment) -> Result<bool, StoreError>;

    /// Removes the matching record. Returns the student's remaining records,
    /// or `None` when no record matched.
    async fn remove(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Vec<Enrollment>>, StoreError>;
}

/// StudentDirectory
///
/// Read-only lookup of student profiles by student id.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>, StoreError>;
}

pub type EnrollmentRepositoryState = Arc<dyn EnrollmentRepository>;

pub type StudentDirectoryState = Arc<dyn StudentDirectory>;

// --- In-memory enrollment store ---

#[derive(Default)]
struct EnrollmentTable {
    rows: Vec<Enrollment>,
    index: HashSet<(String, String)>,
}

impl EnrollmentTable {
    fn push_unique(&mut self, enrollment: Enrollment) -> bool {
        let key = (enrollment.student_id.clone(), enrollment.course_id.clone());
        if !self.index.insert(key) {
            return false;
        }
        self.rows.push(enrollment);
        true
    }
}

/// InMemoryEnrollmentRepository
///
/// Ordered `Vec` for deterministic listing plus a `(studentId, courseId)` set
/// for constant-time duplicate checks. Both live behind one lock and are only
/// ever changed together.
#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    table: RwLock<EnrollmentTable>,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed records, keeping the first of any duplicate pair.
    pub fn with_enrollments(enrollments: impl IntoIterator<Item = Enrollment>) -> Self {
        let mut table = EnrollmentTable::default();
        for enrollment in enrollments {
            let (student_id, course_id) =
                (enrollment.student_id.clone(), enrollment.course_id.clone());
            if !table.push_unique(enrollment) {
                tracing::warn!(%student_id, %course_id, "skipping duplicate seed enrollment");
            }
        }
        Self {
            table: RwLock::new(table),
        }
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn all(&self) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        let mut table = self.table.write().await;
        let removed = table.rows.len();
        table.rows.clear();
        table.index.clear();
        Ok(removed)
    }

    async fn courses_for(&self, student_id: &str) -> Result<Vec<String>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|e| e.student_id == student_id)
            .map(|e| e.course_id.clone())
            .collect())
    }

    async fn insert(&self, enrollment: Enrollment) -> Result<bool, StoreError> {
        Ok(self.table.write().await.push_unique(enrollment))
    }

    async fn remove(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Vec<Enrollment>>, StoreError> {
        let mut table = self.table.write().await;

        let Some(position) = table
            .rows
            .iter()
            .position(|e| e.student_id == student_id && e.course_id == course_id)
        else {
            return Ok(None);
        };

        let removed = table.rows.remove(position);
        table.index.remove(&(removed.student_id, removed.course_id));

        let remaining = table
            .rows
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();
        Ok(Some(remaining))
    }
}

// --- In-memory student directory ---

/// InMemoryStudentDirectory
///
/// Immutable map of student profiles keyed by student id.
#[derive(Default)]
pub struct InMemoryStudentDirectory {
    students: HashMap<String, Student>,
}

impl InMemoryStudentDirectory {
    pub fn new(students: impl IntoIterator<Item = Student>) -> Self {
        Self {
            students: students
                .into_iter()
                .map(|s| (s.student_id.clone(), s))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[async_trait]
impl StudentDirectory for InMemoryStudentDirectory {
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.students.get(student_id).cloned())
    }
}
