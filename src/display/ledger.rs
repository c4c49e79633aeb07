//! Display formatting for expenses, cash, teachers and payments

use super::render_table;
use crate::dates;
use crate::models::{CashEntry, Expense, Money, Teacher, TeachingLoadEntry, TuitionPayment};

pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.label.clone(),
                e.amount.to_string(),
                dates::format(e.due_date),
            ]
        })
        .collect();

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let mut output = render_table(&["Id", "Expense", "Amount", "Due"], &rows, &[2]);
    output.push_str(&format!("Total: {}\n", total));
    output
}

/// The standard labels, numbered for `expense standard <n>`
pub fn format_standard_expenses(labels: &[String]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{:>2}. {}\n", i + 1, label))
        .collect()
}

pub fn format_cash_entries(entries: &[CashEntry]) -> String {
    if entries.is_empty() {
        return "No cash entries recorded.".to_string();
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                dates::format(e.date),
                e.kind.to_string(),
                e.amount.to_string(),
            ]
        })
        .collect();

    render_table(&["Id", "Date", "Kind", "Amount"], &rows, &[3])
}

pub fn format_teacher_list(teachers: &[Teacher]) -> String {
    if teachers.is_empty() {
        return "No teachers registered.".to_string();
    }

    teachers.iter().map(|t| format!("- {}\n", t.name)).collect()
}

pub fn format_load_entries(entries: &[TeachingLoadEntry]) -> String {
    if entries.is_empty() {
        return "No classes recorded.".to_string();
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.teacher.clone(),
                dates::format(e.date),
                e.classes.to_string(),
            ]
        })
        .collect();

    render_table(&["Id", "Teacher", "Date", "Classes"], &rows, &[3])
}

pub fn format_payment_list(payments: &[&TuitionPayment]) -> String {
    if payments.is_empty() {
        return "No tuition payments recorded.".to_string();
    }

    let rows: Vec<Vec<String>> = payments
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.student.clone(),
                dates::format(p.due_date),
                dates::format(p.paid_on),
                p.amount.to_string(),
                p.method.to_string(),
                if p.is_late() { "late".into() } else { String::new() },
            ]
        })
        .collect();

    render_table(
        &["Id", "Student", "Due", "Paid", "Amount", "Method", ""],
        &rows,
        &[4],
    )
}
