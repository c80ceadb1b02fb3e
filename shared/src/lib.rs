use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A student enrolled at the school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    /// Roll / registration number
    pub roll_number: String,
    /// Class label, matched against `FeeStructure::class`
    pub class: String,
    pub section: String,
    /// Parent or guardian name
    pub parent_name: String,
    /// Parent or guardian phone number
    pub parent_contact: String,
    pub email: String,
    pub admission_date: NaiveDate,
}

/// Billing frequency of a fee type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeFrequency {
    Monthly,
    Quarterly,
    Yearly,
    OneTime,
}

impl fmt::Display for FeeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeeFrequency::Monthly => "monthly",
            FeeFrequency::Quarterly => "quarterly",
            FeeFrequency::Yearly => "yearly",
            FeeFrequency::OneTime => "one-time",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeCategory {
    Tuition,
    Transport,
    Library,
    Sports,
    Other,
}

impl fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeeCategory::Tuition => "tuition",
            FeeCategory::Transport => "transport",
            FeeCategory::Library => "library",
            FeeCategory::Sports => "sports",
            FeeCategory::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// One line item of a fee structure. Always owned by a single `FeeStructure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeType {
    pub id: String,
    pub name: String,
    /// Non-negative amount charged per billing period
    pub amount: f64,
    pub frequency: FeeFrequency,
    pub category: FeeCategory,
}

/// A named bundle of fee types charged to one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStructure {
    pub id: String,
    pub name: String,
    /// Class label this structure applies to
    pub class: String,
    /// Fee types in the order they were added
    pub fee_types: Vec<FeeType>,
    /// Total charge as supplied at creation (not recomputed)
    pub total_amount: f64,
}

impl FeeStructure {
    /// Look up one of this structure's fee types by ID
    pub fn fee_type(&self, fee_type_id: &str) -> Option<&FeeType> {
        self.fee_types.iter().find(|ft| ft.id == fee_type_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
    Check,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Online => "online",
            PaymentMethod::Check => "check",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// A recorded fee payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    /// Student this payment was made for. May dangle after the student is deleted.
    pub student_id: String,
    /// Fee type inside whichever structure currently contains it
    pub fee_type_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    /// Receipt token in format: "<prefix><6 digits>"
    pub receipt_number: String,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

/// A student together with their current outstanding dues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDues {
    pub student: Student,
    pub dues: f64,
}

/// Headline figures for the dashboard screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    /// Sum of all completed payments
    pub total_collected: f64,
    /// Sum of dues across all students
    pub total_dues: f64,
    /// Percentage of billed fees collected, rounded to a whole number.
    /// Negative or above 100 when overpayments push the dues below zero;
    /// `None` when the collected amount exactly cancels the dues.
    pub collection_rate: Option<i64>,
    pub recent_payments: Vec<Payment>,
    pub students_with_dues: Vec<StudentDues>,
}

/// Per-student payment overview shown on the invoice cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPaymentOverview {
    pub student_id: String,
    pub student_name: String,
    pub months_paid: usize,
    pub total_paid: f64,
}
