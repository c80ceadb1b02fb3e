use anyhow::Result;
use shared::Student;
use tracing::debug;

use super::connection::MemoryConnection;
use crate::storage::traits::StudentStorage;

/// In-memory student repository
#[derive(Clone)]
pub struct StudentRepository {
    connection: MemoryConnection,
}

impl StudentRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl StudentStorage for StudentRepository {
    fn store_student(&self, student: &Student) -> Result<()> {
        self.connection.write()?.students.push(student.clone());
        debug!("Stored student {}", student.id);
        Ok(())
    }

    fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let collections = self.connection.read()?;
        Ok(collections.students.iter().find(|s| s.id == student_id).cloned())
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        Ok(self.connection.read()?.students.clone())
    }

    fn update_student(&self, student: &Student) -> Result<bool> {
        let mut collections = self.connection.write()?;
        match collections.students.iter_mut().find(|s| s.id == student.id) {
            Some(existing) => {
                *existing = student.clone();
                debug!("Updated student {}", student.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_student(&self, student_id: &str) -> Result<bool> {
        let mut collections = self.connection.write()?;
        let before = collections.students.len();
        collections.students.retain(|s| s.id != student_id);
        let deleted = collections.students.len() < before;
        if deleted {
            debug!("Deleted student {}", student_id);
        }
        Ok(deleted)
    }
}
