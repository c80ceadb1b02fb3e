//! Receipt and invoice text generation.
//!
//! Everything in this module is a pure projection of records into text.
//! Nothing here reads storage or writes files; the export service does the
//! lookups and delivery.
//!
//! ## Invoice summary figures
//!
//! The invoice summary carries two dues figures that are computed
//! independently and can disagree:
//!
//! - **Outstanding Amount**: `structure total × months with payments − total paid`,
//!   floored at 0
//! - **Current Dues**: `structure total − (total paid mod structure total)`,
//!   floored at 0, with a zero total treated as 1 for the modulo
//!
//! Both are kept exactly as the printed invoices have always shown them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{FeeStructure, Payment, Student};
use std::collections::BTreeMap;

/// Printed in place of a student that no longer exists
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

const MONTH_TOTAL_INDENT: usize = 32;

/// Display options for generated documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceConfig {
    pub school_name: String,
    pub currency_symbol: String,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            school_name: "School".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Figures printed in an invoice's summary block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Number of distinct YYYY-MM months with completed payments
    pub months_with_payments: usize,
    pub total_paid: f64,
    /// `None` when the student's class has no fee structure
    pub structure_total: Option<f64>,
    /// `None` when the student's class has no fee structure
    pub outstanding: Option<f64>,
    pub current_dues: f64,
}

/// A month's worth of completed payments
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    /// "YYYY-MM"
    pub key: String,
    pub payments: Vec<&'a Payment>,
}

impl MonthGroup<'_> {
    pub fn subtotal(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

/// Formats receipts and invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceService {
    config: InvoiceConfig,
}

impl InvoiceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InvoiceConfig) -> Self {
        Self { config }
    }

    /// Fixed-layout receipt for a single payment
    pub fn format_receipt(&self, payment: &Payment, student: Option<&Student>, fee_type_name: &str) -> String {
        let (student_name, class_label) = match student {
            Some(student) => (student.name.as_str(), class_label(student)),
            None => (UNKNOWN_STUDENT, "-".to_string()),
        };

        let mut out = String::new();
        out.push_str(&format!("{} FEE RECEIPT\n", self.config.school_name.to_uppercase()));
        out.push_str(&format!("Receipt No: {}\n", payment.receipt_number));
        out.push_str(&format!("Date: {}\n", format_display_date(payment.date)));
        out.push('\n');
        out.push_str(&format!("Student: {}\n", student_name));
        out.push_str(&format!("Class: {}\n", class_label));
        out.push('\n');
        out.push_str(&format!("Fee Type: {}\n", fee_type_name));
        out.push_str(&format!("Amount: {}\n", self.money(payment.amount)));
        out.push_str(&format!("Payment Method: {}\n", payment.method.to_string().to_uppercase()));
        out.push('\n');
        out.push_str(&format!("Status: {}\n", payment.status.to_string().to_uppercase()));
        out
    }

    /// Summary figures for a student's invoice
    pub fn summarize(&self, student: &Student, payments: &[Payment], fee_structure: Option<&FeeStructure>) -> InvoiceSummary {
        let groups = group_by_month(student, payments);
        let total_paid: f64 = groups.iter().map(MonthGroup::subtotal).sum();
        summary_from(groups.len(), total_paid, fee_structure.map(|fs| fs.total_amount))
    }

    /// Full payment-history invoice for one student.
    ///
    /// `payments` may contain other students' payments; only this student's
    /// completed payments are listed. `fee_type_name` resolves a fee type ID
    /// to its display name.
    pub fn format_student_invoice(
        &self,
        student: &Student,
        payments: &[Payment],
        fee_structure: Option<&FeeStructure>,
        fee_type_name: &dyn Fn(&str) -> String,
        generated_on: NaiveDate,
    ) -> String {
        let groups = group_by_month(student, payments);
        let class_label = class_label(student);

        let mut out = String::new();
        out.push_str("STUDENT PAYMENT INVOICE\n");
        out.push_str(&format!("Generated on: {}\n", format_display_date(generated_on)));
        out.push('\n');
        out.push_str("Student Details:\n");
        out.push_str(&format!("Name: {}\n", student.name));
        out.push_str(&format!("Roll Number: {}\n", student.roll_number));
        out.push_str(&format!("Class: {}\n", class_label));
        out.push_str(&format!("Parent: {}\n", student.parent_name));
        out.push_str(&format!("Contact: {}\n", student.parent_contact));
        out.push_str(&format!("Email: {}\n", student.email));
        out.push_str(&format!("Admission Date: {}\n", format_display_date(student.admission_date)));
        out.push('\n');
        out.push_str(&format!("Fee Structure (Class {}):\n", student.class));

        if let Some(structure) = fee_structure {
            out.push_str(&format!("Structure: {}\n", structure.name));
            for fee_type in &structure.fee_types {
                out.push_str(&format!("{}: {} ({})\n", fee_type.name, self.money(fee_type.amount), fee_type.frequency));
            }
            out.push_str(&format!("Total Monthly Fee: {}\n", self.money(structure.total_amount)));
        }

        out.push('\n');
        out.push_str("PAYMENT HISTORY\n");
        out.push_str("===============\n");

        let mut total_paid = 0.0;
        if groups.is_empty() {
            let outstanding = fee_structure.map(|fs| fs.total_amount).unwrap_or(0.0);
            out.push('\n');
            out.push_str("No payments recorded yet.\n");
            out.push('\n');
            out.push_str(&format!("Outstanding Amount: {}\n", self.money(outstanding)));
        } else {
            for group in &groups {
                let heading = month_heading(&group.key);
                out.push('\n');
                out.push_str(&format!("{}\n", heading.to_uppercase()));
                out.push_str(&format!("{}\n", "-".repeat(heading.chars().count() + 10)));

                for payment in &group.payments {
                    out.push_str(&format!(
                        "{:<12} {:<20} {}{:>10} {:<10} {}\n",
                        format_display_date(payment.date),
                        fee_type_name(&payment.fee_type_id),
                        self.config.currency_symbol,
                        format_amount(payment.amount),
                        payment.method.to_string().to_uppercase(),
                        payment.receipt_number,
                    ));
                }

                let subtotal = group.subtotal();
                total_paid += subtotal;
                out.push_str(&format!(
                    "{} Month Total: {}\n",
                    " ".repeat(MONTH_TOTAL_INDENT),
                    self.money(subtotal)
                ));
            }
        }

        let summary = summary_from(groups.len(), total_paid, fee_structure.map(|fs| fs.total_amount));

        out.push('\n');
        out.push_str("SUMMARY\n");
        out.push_str("=======\n");
        out.push_str(&format!("Total Months with Payments: {}\n", summary.months_with_payments));
        out.push_str(&format!("Total Amount Paid: {}\n", self.money(summary.total_paid)));
        if let Some(outstanding) = summary.outstanding {
            out.push_str(&format!("Outstanding Amount: {}\n", self.money(outstanding)));
        }
        out.push_str(&format!("Current Dues: {}\n", self.money(summary.current_dues)));
        out.push('\n');
        out.push_str("Note: This invoice shows all payment records for this student.\n");
        if groups.is_empty() {
            out.push_str("No payments have been recorded yet.\n");
        }
        out
    }

    fn money(&self, amount: f64) -> String {
        format!("{}{}", self.config.currency_symbol, format_amount(amount))
    }
}

fn summary_from(months_with_payments: usize, total_paid: f64, structure_total: Option<f64>) -> InvoiceSummary {
    let outstanding = structure_total.map(|total| (total * months_with_payments as f64 - total_paid).max(0.0));
    let current_dues = structure_total
        .map(|total| {
            let divisor = if total == 0.0 { 1.0 } else { total };
            (total - total_paid % divisor).max(0.0)
        })
        .unwrap_or(0.0);

    InvoiceSummary {
        months_with_payments,
        total_paid,
        structure_total,
        outstanding,
        current_dues,
    }
}

/// The student's completed payments grouped by "YYYY-MM", keys ascending.
/// Payments inside a month keep their recording order.
pub fn group_by_month<'a>(student: &Student, payments: &'a [Payment]) -> Vec<MonthGroup<'a>> {
    let mut months: BTreeMap<String, Vec<&'a Payment>> = BTreeMap::new();
    for payment in payments
        .iter()
        .filter(|p| p.student_id == student.id && p.is_completed())
    {
        months.entry(month_key(payment.date)).or_default().push(payment);
    }

    months
        .into_iter()
        .map(|(key, payments)| MonthGroup { key, payments })
        .collect()
}

/// "YYYY-MM" grouping key for a date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// "January 2024" for the key "2024-01"; unparseable keys are returned as-is
pub fn month_heading(key: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d") {
        Ok(date) => date.format("%B %Y").to_string(),
        Err(_) => key.to_string(),
    }
}

/// US-style short date without zero padding, e.g. "1/15/2024"
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Amount with thousands separators; whole amounts print without decimals,
/// others with up to two, e.g. "12,000", "1,250.5", "99.99"
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{}{}", sign, grouped),
        f if f % 10 == 0 => format!("{}{}.{}", sign, grouped, f / 10),
        f => format!("{}{}.{:02}", sign, grouped, f),
    }
}

/// "10-A" style class and section label
pub fn class_label(student: &Student) -> String {
    if student.section.is_empty() {
        student.class.clone()
    } else {
        format!("{}-{}", student.class, student.section)
    }
}

/// Export file name for a receipt: "receipt-<receipt number>.txt"
pub fn receipt_file_name(receipt_number: &str) -> String {
    format!("receipt-{}.txt", file_name_part(receipt_number))
}

/// Export file name for an invoice: "invoice-<name>-<YYYY-MM-DD>.txt"
pub fn invoice_file_name(student_name: &str, generated_on: NaiveDate) -> String {
    format!("invoice-{}-{}.txt", file_name_part(student_name), generated_on.format("%Y-%m-%d"))
}

/// Every run of whitespace, path separators or characters that are not
/// allowed in file names becomes a single dash
fn file_name_part(raw: &str) -> String {
    let mut part = String::with_capacity(raw.len());
    let mut in_separator = false;
    for c in raw.chars() {
        let is_separator = c.is_whitespace()
            || c.is_control()
            || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        if is_separator {
            if !in_separator {
                part.push('-');
            }
            in_separator = true;
        } else {
            part.push(c);
            in_separator = false;
        }
    }
    part
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_utils::{date, fee_type, payment, student};
    use shared::{PaymentMethod, PaymentStatus};

    fn structure(total: f64) -> FeeStructure {
        FeeStructure {
            id: "fs1".to_string(),
            name: "Class 10 Fee Structure".to_string(),
            class: "10".to_string(),
            fee_types: vec![fee_type("Tuition Fee", 5000.0), fee_type("Transport Fee", 2000.0)],
            total_amount: total,
        }
    }

    fn names(id: &str) -> String {
        match id {
            "ft-tuition" => "Tuition Fee".to_string(),
            _ => "Unknown Fee".to_string(),
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(500.0), "500");
        assert_eq!(format_amount(7000.0), "7,000");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(1250.5), "1,250.5");
        assert_eq!(format_amount(99.99), "99.99");
        assert_eq!(format_amount(-5000.0), "-5,000");
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(month_key(date(2024, 1, 15)), "2024-01");
        assert_eq!(month_heading("2024-01"), "January 2024");
        assert_eq!(month_heading("garbage"), "garbage");
        assert_eq!(format_display_date(date(2024, 1, 5)), "1/5/2024");
    }

    #[test]
    fn test_group_by_month_merges_same_month_and_sorts() {
        let john = student("s1", "John Doe", "10");
        let payments = vec![
            payment("p3", "s1", 300.0, date(2024, 2, 1)),
            payment("p1", "s1", 100.0, date(2024, 1, 15)),
            payment("other", "s2", 999.0, date(2023, 12, 1)),
            payment("p2", "s1", 200.0, date(2024, 1, 28)),
        ];

        let groups = group_by_month(&john, &payments);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02"]);
        assert_eq!(groups[0].subtotal(), 300.0);
        let january: Vec<&str> = groups[0].payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(january, vec!["p1", "p2"]);
        assert_eq!(groups[1].subtotal(), 300.0);
    }

    #[test]
    fn test_group_by_month_skips_incomplete_payments() {
        let john = student("s1", "John Doe", "10");
        let mut pending = payment("p1", "s1", 100.0, date(2024, 1, 15));
        pending.status = PaymentStatus::Pending;
        let mut failed = payment("p2", "s1", 100.0, date(2024, 3, 15));
        failed.status = PaymentStatus::Failed;

        assert!(group_by_month(&john, &[pending, failed]).is_empty());
    }

    #[test]
    fn test_summary_formulas_can_disagree() {
        let service = InvoiceService::new();
        let john = student("s1", "John Doe", "10");
        let fs = structure(7000.0);

        // One month, 12000 paid
        let one_month = vec![
            payment("p1", "s1", 5000.0, date(2024, 1, 5)),
            payment("p2", "s1", 7000.0, date(2024, 1, 20)),
        ];
        let summary = service.summarize(&john, &one_month, Some(&fs));
        assert_eq!(summary.months_with_payments, 1);
        assert_eq!(summary.total_paid, 12000.0);
        assert_eq!(summary.outstanding, Some(0.0));
        assert_eq!(summary.current_dues, 2000.0);

        // Two months, 12000 paid
        let two_months = vec![
            payment("p1", "s1", 5000.0, date(2024, 1, 5)),
            payment("p2", "s1", 7000.0, date(2024, 2, 20)),
        ];
        let summary = service.summarize(&john, &two_months, Some(&fs));
        assert_eq!(summary.months_with_payments, 2);
        assert_eq!(summary.outstanding, Some(2000.0));
        assert_eq!(summary.current_dues, 2000.0);

        // Three months, 12000 paid
        let three_months = vec![
            payment("p1", "s1", 5000.0, date(2024, 1, 5)),
            payment("p2", "s1", 4000.0, date(2024, 2, 20)),
            payment("p3", "s1", 3000.0, date(2024, 3, 2)),
        ];
        let summary = service.summarize(&john, &three_months, Some(&fs));
        assert_eq!(summary.outstanding, Some(9000.0));
        assert_eq!(summary.current_dues, 2000.0);
    }

    #[test]
    fn test_summary_exact_multiple_and_zero_total() {
        let service = InvoiceService::new();
        let john = student("s1", "John Doe", "10");

        let paid_in_full = vec![payment("p1", "s1", 7000.0, date(2024, 1, 5))];
        let summary = service.summarize(&john, &paid_in_full, Some(&structure(7000.0)));
        assert_eq!(summary.outstanding, Some(0.0));
        assert_eq!(summary.current_dues, 7000.0);

        let summary = service.summarize(&john, &paid_in_full, Some(&structure(0.0)));
        assert_eq!(summary.outstanding, Some(0.0));
        assert_eq!(summary.current_dues, 0.0);
    }

    #[test]
    fn test_summary_without_structure() {
        let service = InvoiceService::new();
        let john = student("s1", "John Doe", "10");
        let payments = vec![payment("p1", "s1", 500.0, date(2024, 1, 5))];

        let summary = service.summarize(&john, &payments, None);
        assert_eq!(summary.structure_total, None);
        assert_eq!(summary.outstanding, None);
        assert_eq!(summary.current_dues, 0.0);
        assert_eq!(summary.total_paid, 500.0);
    }

    #[test]
    fn test_format_receipt() {
        let service = InvoiceService::new();
        let john = student("s1", "John Doe", "10");
        let mut p = payment("p1", "s1", 5000.0, date(2024, 1, 15));
        p.receipt_number = "RCP001".to_string();
        p.method = PaymentMethod::Online;

        let receipt = service.format_receipt(&p, Some(&john), "Tuition Fee");

        let expected = "SCHOOL FEE RECEIPT\n\
                        Receipt No: RCP001\n\
                        Date: 1/15/2024\n\
                        \n\
                        Student: John Doe\n\
                        Class: 10-A\n\
                        \n\
                        Fee Type: Tuition Fee\n\
                        Amount: ₹5,000\n\
                        Payment Method: ONLINE\n\
                        \n\
                        Status: COMPLETED\n";
        assert_eq!(receipt, expected);
        assert_eq!(receipt, service.format_receipt(&p, Some(&john), "Tuition Fee"));
    }

    #[test]
    fn test_format_receipt_for_orphaned_payment() {
        let service = InvoiceService::with_config(InvoiceConfig {
            school_name: "Green Valley".to_string(),
            currency_symbol: "$".to_string(),
        });
        let p = payment("p1", "gone", 12.5, date(2024, 1, 15));

        let receipt = service.format_receipt(&p, None, "Unknown Fee");
        assert!(receipt.starts_with("GREEN VALLEY FEE RECEIPT\n"));
        assert!(receipt.contains("Student: Unknown Student\n"));
        assert!(receipt.contains("Amount: $12.5\n"));
    }

    #[test]
    fn test_format_student_invoice_layout() {
        let service = InvoiceService::new();
        let john = student("s1", "John Doe", "10");
        let fs = structure(7000.0);
        let mut first = payment("p1", "s1", 5000.0, date(2024, 1, 15));
        first.fee_type_id = "ft-tuition".to_string();
        first.method = PaymentMethod::Online;
        first.receipt_number = "RCP000001".to_string();
        let mut second = payment("p2", "s1", 1500.0, date(2024, 1, 28));
        second.receipt_number = "RCP000002".to_string();
        let mut third = payment("p3", "s1", 7000.0, date(2024, 2, 1));
        third.receipt_number = "RCP000003".to_string();

        let invoice = service.format_student_invoice(
            &john,
            &[third, first, second],
            Some(&fs),
            &names,
            date(2024, 3, 1),
        );

        assert!(invoice.starts_with("STUDENT PAYMENT INVOICE\nGenerated on: 3/1/2024\n"));
        assert!(invoice.contains("Structure: Class 10 Fee Structure\n"));
        assert!(invoice.contains("Tuition Fee: ₹5,000 (monthly)\n"));
        assert!(invoice.contains("Total Monthly Fee: ₹7,000\n"));

        let january = invoice.find("JANUARY 2024\n----------------------\n").expect("january header");
        let february = invoice.find("FEBRUARY 2024\n-----------------------\n").expect("february header");
        assert!(january < february);

        let line = format!(
            "{:<12} {:<20} ₹{:>10} {:<10} {}\n",
            "1/15/2024", "Tuition Fee", "5,000", "ONLINE", "RCP000001"
        );
        assert!(invoice.contains(&line), "missing payment line in:\n{}", invoice);
        assert!(invoice.contains(&format!("{} Month Total: ₹6,500\n", " ".repeat(32))));
        assert!(invoice.contains(&format!("{} Month Total: ₹7,000\n", " ".repeat(32))));

        assert!(invoice.contains("Total Months with Payments: 2\n"));
        assert!(invoice.contains("Total Amount Paid: ₹13,500\n"));
        assert!(invoice.contains("Outstanding Amount: ₹500\n"));
        assert!(invoice.contains("Current Dues: ₹500\n"));
        assert!(!invoice.contains("No payments have been recorded yet."));
    }

    #[test]
    fn test_format_student_invoice_without_payments() {
        let service = InvoiceService::new();
        let john = student("s1", "John Doe", "10");

        let invoice = service.format_student_invoice(&john, &[], Some(&structure(7000.0)), &names, date(2024, 3, 1));
        assert!(invoice.contains("No payments recorded yet.\n\nOutstanding Amount: ₹7,000\n"));
        assert!(invoice.contains("Total Months with Payments: 0\n"));
        assert!(invoice.contains("Outstanding Amount: ₹0\n"));
        assert!(invoice.contains("Current Dues: ₹7,000\n"));
        assert!(invoice.ends_with("No payments have been recorded yet.\n"));

        let no_structure = service.format_student_invoice(&john, &[], None, &names, date(2024, 3, 1));
        assert!(no_structure.contains("Outstanding Amount: ₹0\n"));
        assert!(no_structure.contains("Current Dues: ₹0\n"));
        assert!(!no_structure.contains("Structure:"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(receipt_file_name("RCP123456"), "receipt-RCP123456.txt");
        assert_eq!(invoice_file_name("John Doe", date(2024, 3, 1)), "invoice-John-Doe-2024-03-01.txt");
        assert_eq!(
            invoice_file_name("Mary  Ann\tLee", date(2024, 3, 1)),
            "invoice-Mary-Ann-Lee-2024-03-01.txt"
        );
    }

    #[test]
    fn test_file_names_never_contain_path_separators() {
        assert_eq!(invoice_file_name("Ali/Khan", date(2024, 3, 1)), "invoice-Ali-Khan-2024-03-01.txt");
        assert_eq!(invoice_file_name("Ali / Khan", date(2024, 3, 1)), "invoice-Ali-Khan-2024-03-01.txt");
        assert_eq!(
            invoice_file_name("../../escaped", date(2024, 3, 1)),
            "invoice-..-..-escaped-2024-03-01.txt"
        );
        assert_eq!(
            invoice_file_name("C:\\Temp\\O'Neil?", date(2024, 3, 1)),
            "invoice-C-Temp-O'Neil--2024-03-01.txt"
        );
        assert_eq!(receipt_file_name("RCP/001"), "receipt-RCP-001.txt");
    }
}
