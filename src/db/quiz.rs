//! Quiz bank storage and answer logging

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::{QuizAnswer, QuizQuestion};

pub fn insert_question(conn: &Connection, question: &QuizQuestion) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO quiz_questions (subject_id, stem, choice_a, choice_b, choice_c, choice_d,
                                correct_index, explanation)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    "#,
        params![
            question.subject_id,
            question.stem,
            question.choices[0],
            question.choices[1],
            question.choices[2],
            question.choices[3],
            question.correct_index as i64,
            question.explanation,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_questions(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM quiz_questions", [], |row| row.get(0))
}

pub fn get_question_by_id(conn: &Connection, id: i64) -> Result<Option<QuizQuestion>> {
    let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_QUESTION))?;
    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_question(row)?))
    } else {
        Ok(None)
    }
}

/// Fetch one question by stable offset; the handler picks a random offset
/// within `count_questions`.
pub fn get_question_by_offset(conn: &Connection, offset: i64) -> Result<Option<QuizQuestion>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id LIMIT 1 OFFSET ?1", SELECT_QUESTION))?;
    let mut rows = stmt.query(params![offset])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_question(row)?))
    } else {
        Ok(None)
    }
}

pub fn insert_answer(conn: &Connection, answer: &QuizAnswer) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO quiz_answers (question_id, selected_index, is_correct, answered_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
        params![
            answer.question_id,
            answer.selected_index as i64,
            if answer.is_correct { 1 } else { 0 },
            answer.answered_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_answers_since(conn: &Connection, since: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM quiz_answers WHERE answered_at >= ?1",
        params![since.to_rfc3339()],
        |row| row.get(0),
    )
}

const SELECT_QUESTION: &str = r#"
    SELECT id, subject_id, stem, choice_a, choice_b, choice_c, choice_d, correct_index, explanation
    FROM quiz_questions
"#;

fn row_to_question(row: &rusqlite::Row) -> Result<QuizQuestion> {
    Ok(QuizQuestion {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        stem: row.get(2)?,
        choices: [row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?],
        correct_index: row.get::<_, i64>(7)? as usize,
        explanation: row.get(8)?,
    })
}

/// Seed the starter question bank on an empty database. Starter questions
/// belong to no subject; user-generated questions attach to one.
pub fn seed_starter_bank(conn: &Connection) -> Result<()> {
    if count_questions(conn)? > 0 {
        return Ok(());
    }

    let starter: &[(&str, [&str; 4], usize, &str)] = &[
        (
            "A 24-year-old develops stridor and hypotension minutes after a bee sting. First-line treatment?",
            ["IV hydrocortisone", "IM adrenaline", "Nebulized salbutamol", "IV chlorphenamine"],
            1,
            "Anaphylaxis is treated with intramuscular adrenaline before any adjunct.",
        ),
        (
            "Most common causative organism of community-acquired pneumonia?",
            ["Streptococcus pneumoniae", "Klebsiella pneumoniae", "Mycoplasma pneumoniae", "Staphylococcus aureus"],
            0,
            "Pneumococcus remains the leading cause across age groups.",
        ),
        (
            "Which electrolyte abnormality is classically associated with prolonged QT interval?",
            ["Hyperkalemia", "Hypernatremia", "Hypocalcemia", "Hypermagnesemia"],
            2,
            "Hypocalcemia prolongs the QT interval; hypercalcemia shortens it.",
        ),
        (
            "First-line pharmacotherapy for newly diagnosed type 2 diabetes mellitus?",
            ["Gliclazide", "Insulin glargine", "Sitagliptin", "Metformin"],
            3,
            "Metformin is first line unless contraindicated by renal impairment.",
        ),
        (
            "A positive Murphy's sign most strongly suggests which diagnosis?",
            ["Acute cholecystitis", "Acute appendicitis", "Acute pancreatitis", "Renal colic"],
            0,
            "Inspiratory arrest on right upper quadrant palpation points to cholecystitis.",
        ),
        (
            "Which nerve is most at risk during surgical neck dissection of the posterior triangle?",
            ["Vagus nerve", "Spinal accessory nerve", "Phrenic nerve", "Hypoglossal nerve"],
            1,
            "The spinal accessory nerve crosses the posterior triangle superficially.",
        ),
    ];

    for (stem, choices, correct_index, explanation) in starter {
        insert_question(
            conn,
            &QuizQuestion {
                id: 0,
                subject_id: None,
                stem: stem.to_string(),
                choices: choices.map(String::from),
                correct_index: *correct_index,
                explanation: Some(explanation.to_string()),
            },
        )?;
    }
    Ok(())
}
