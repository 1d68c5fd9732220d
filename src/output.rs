use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color,
    ContentArrangement, Table,
};

use answergrade::grader::{Consistency, ShiftedGrade};
use answergrade::task::Task;
use answergrade::GradingResult;

/// One graded record, ready for display.
pub struct GradeRow {
    pub custom_id: String,
    pub result: GradingResult,
}

fn verdict_cell(correct: bool) -> Cell {
    if correct {
        Cell::new("correct").fg(Color::Green)
    } else {
        Cell::new("incorrect").fg(Color::Red)
    }
}

fn consistency_cell(c: Consistency) -> Cell {
    let color = match c {
        Consistency::ConsistentCorrect => Color::Green,
        Consistency::ConsistentIncorrect => Color::Red,
        Consistency::OriginalOnly | Consistency::ShiftedOnly => Color::Yellow,
    };
    Cell::new(c).fg(color)
}

fn extracted_cell(extracted: Option<&str>) -> Cell {
    match extracted {
        Some(s) => Cell::new(s),
        None => Cell::new("(none)").add_attribute(Attribute::Dim),
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !yansi::is_enabled() {
        table.force_no_tty();
    }
    table
}

/// Table of per-record verdicts.
pub fn grades_table(rows: &[GradeRow]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["CUSTOM_ID", "TASK", "EXTRACTED", "VERDICT"]));
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.custom_id),
            Cell::new(row.result.task),
            extracted_cell(row.result.extracted_answer.as_deref()),
            verdict_cell(row.result.is_correct),
        ]);
    }
    table
}

/// Table of original/shifted pairs.
pub fn shifted_table(rows: &[(usize, ShiftedGrade)]) -> Table {
    let mut table = new_table();
    table.set_header(header(&[
        "INDEX",
        "ORIGINAL",
        "VERDICT",
        "SHIFTED",
        "VERDICT",
        "CONSISTENCY",
    ]));
    for (index, grade) in rows {
        table.add_row(vec![
            Cell::new(index),
            extracted_cell(grade.original.extracted_answer.as_deref()),
            verdict_cell(grade.original.is_correct),
            extracted_cell(grade.shifted.extracted_answer.as_deref()),
            verdict_cell(grade.shifted.is_correct),
            consistency_cell(grade.consistency),
        ]);
    }
    table
}

/// Table of supported task tags.
pub fn tasks_table() -> Table {
    let mut table = new_table();
    table.set_header(header(&["TASK", "STRATEGY"]));
    for task in Task::ALL {
        table.add_row(vec![Cell::new(task), Cell::new(task.strategy())]);
    }
    table
}

/// Table of record counts per task tag.
pub fn task_counts_table(counts: &[(String, usize)]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["TASK", "RECORDS"]));
    for (task, n) in counts {
        table.add_row(vec![Cell::new(task), Cell::new(n)]);
    }
    table
}
