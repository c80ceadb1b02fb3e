//! Student management for the fee desk.
//!
//! Students are created, merged and removed here. Removing a student never
//! touches the payments that reference it; those simply become orphans.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use shared::Student;
use tracing::{debug, info, warn};

use crate::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::identity::generate_record_id;
use crate::storage::{MemoryConnection, StudentRepository, StudentStorage};

/// Years after admission at which a student counts as passed out
pub const PASSOUT_AFTER_YEARS: i32 = 4;

/// Service for managing students
#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
}

impl StudentService {
    pub fn new(connection: MemoryConnection) -> Self {
        Self {
            student_repository: StudentRepository::new(connection),
        }
    }

    /// Add a new student with a fresh ID. No validation is performed here.
    pub fn add_student(&self, command: CreateStudentCommand) -> Result<Student> {
        let student = command.into_student(generate_record_id());
        self.student_repository.store_student(&student)?;

        info!("🎓 STUDENT: Added {} (class {}-{}) with ID: {}",
              student.name, student.class, student.section, student.id);
        Ok(student)
    }

    /// Get a student by ID
    pub fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let student = self.student_repository.get_student(student_id)?;
        if student.is_none() {
            debug!("Student not found: {}", student_id);
        }
        Ok(student)
    }

    /// List all students in the order they were added
    pub fn list_students(&self) -> Result<Vec<Student>> {
        self.student_repository.list_students()
    }

    /// Merge the supplied fields into an existing student.
    ///
    /// Returns `None` (and changes nothing) when the ID is unknown.
    pub fn update_student(&self, student_id: &str, command: UpdateStudentCommand) -> Result<Option<Student>> {
        let mut student = match self.student_repository.get_student(student_id)? {
            Some(student) => student,
            None => {
                warn!("🎓 STUDENT: Update ignored, student not found: {}", student_id);
                return Ok(None);
            }
        };

        command.apply_to(&mut student);
        if !self.student_repository.update_student(&student)? {
            warn!("🎓 STUDENT: Student {} disappeared before update", student_id);
            return Ok(None);
        }

        info!("🎓 STUDENT: Updated {} with ID: {}", student.name, student.id);
        Ok(Some(student))
    }

    /// Remove a student. Returns false when the ID is unknown.
    pub fn delete_student(&self, student_id: &str) -> Result<bool> {
        let deleted = self.student_repository.delete_student(student_id)?;
        if deleted {
            info!("🎓 STUDENT: Deleted student with ID: {}", student_id);
        } else {
            warn!("🎓 STUDENT: Delete ignored, student not found: {}", student_id);
        }
        Ok(deleted)
    }

    /// Students whose name or roll number contains `term` (case-insensitive)
    /// or whose class contains it verbatim
    pub fn search_students(&self, term: &str) -> Result<Vec<Student>> {
        let students = self.student_repository.list_students()?;
        Ok(filter_by_term(students, term))
    }

    /// Students admitted at least four calendar years before `today`
    pub fn passout_students(&self, today: NaiveDate) -> Result<Vec<Student>> {
        let students = self.student_repository.list_students()?;
        Ok(students
            .into_iter()
            .filter(|s| today.year() - s.admission_date.year() >= PASSOUT_AFTER_YEARS)
            .collect())
    }

    pub fn search_passout_students(&self, term: &str, today: NaiveDate) -> Result<Vec<Student>> {
        Ok(filter_by_term(self.passout_students(today)?, term))
    }
}

/// Expected graduation year for a student
pub fn graduation_year(student: &Student) -> i32 {
    student.admission_date.year() + PASSOUT_AFTER_YEARS
}

fn filter_by_term(students: Vec<Student>, term: &str) -> Vec<Student> {
    let needle = term.to_lowercase();
    students
        .into_iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.roll_number.to_lowercase().contains(&needle)
                || s.class.contains(term)
        })
        .collect()
}
