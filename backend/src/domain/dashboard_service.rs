//! Headline figures for the dashboard and the per-student invoice cards.

use anyhow::Result;
use shared::{DashboardStats, Student, StudentDues, StudentPaymentOverview};
use std::collections::BTreeSet;
use tracing::debug;

use crate::domain::dues_service::{total_completed, DuesService};
use crate::domain::invoice::month_key;
use crate::domain::payment_service::PaymentService;
use crate::domain::student_service::StudentService;

#[derive(Clone)]
pub struct DashboardService {
    student_service: StudentService,
    payment_service: PaymentService,
    dues_service: DuesService,
    recent_limit: usize,
}

impl DashboardService {
    pub fn new(
        student_service: StudentService,
        payment_service: PaymentService,
        dues_service: DuesService,
        recent_limit: usize,
    ) -> Self {
        Self {
            student_service,
            payment_service,
            dues_service,
            recent_limit,
        }
    }

    pub fn stats(&self) -> Result<DashboardStats> {
        let students = self.student_service.list_students()?;
        let payments = self.payment_service.list_payments()?;

        let total_collected = total_completed(&payments);

        let mut total_dues = 0.0;
        let mut students_with_dues = Vec::new();
        for student in students.iter() {
            let dues = self.dues_service.get_student_dues(&student.id)?;
            total_dues += dues;
            if dues > 0.0 {
                students_with_dues.push(StudentDues {
                    student: student.clone(),
                    dues,
                });
            }
        }

        let stats = DashboardStats {
            total_students: students.len(),
            total_collected,
            total_dues,
            collection_rate: collection_rate(total_collected, total_dues),
            recent_payments: self.payment_service.recent_payments(self.recent_limit)?,
            students_with_dues,
        };

        debug!("Dashboard: {} students, collected {:.2}, dues {:.2}, rate {:?}%",
               stats.total_students, stats.total_collected, stats.total_dues, stats.collection_rate);
        Ok(stats)
    }

    /// Months with completed payments and total paid, for every student
    pub fn payment_overviews(&self) -> Result<Vec<StudentPaymentOverview>> {
        let students = self.student_service.list_students()?;
        let mut overviews = Vec::with_capacity(students.len());

        for student in students {
            overviews.push(self.overview_for(student)?);
        }

        Ok(overviews)
    }

    /// Months with completed payments and total paid for one student;
    /// `None` when the student is unknown
    pub fn payment_overview(&self, student_id: &str) -> Result<Option<StudentPaymentOverview>> {
        match self.student_service.get_student(student_id)? {
            Some(student) => Ok(Some(self.overview_for(student)?)),
            None => Ok(None),
        }
    }

    fn overview_for(&self, student: Student) -> Result<StudentPaymentOverview> {
        let completed = self.payment_service.completed_payments_for_student(&student.id)?;
        let months: BTreeSet<String> = completed.iter().map(|p| month_key(p.date)).collect();
        Ok(StudentPaymentOverview {
            student_id: student.id,
            student_name: student.name,
            months_paid: months.len(),
            total_paid: total_completed(&completed),
        })
    }
}

/// Percentage of billed fees collected, `round(collected / (collected + dues) * 100)`.
///
/// 0 before anything is collected. Overpayments make the dues negative, so
/// the rate can exceed 100 or drop below 0; it is reported as computed.
/// `None` when collected and dues cancel out and the ratio is undefined.
pub fn collection_rate(total_collected: f64, total_dues: f64) -> Option<i64> {
    if total_collected <= 0.0 {
        return Some(0);
    }
    let rate = (total_collected / (total_collected + total_dues) * 100.0).round();
    if rate.is_finite() {
        Some(rate as i64)
    } else {
        None
    }
}
