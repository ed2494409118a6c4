use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct QuizCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A quiz question. `correct_answer` is a zero-based index into `options`.
#[derive(Debug, Clone, FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub category_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// `None` when `selected` is not one of the options
    pub fn is_correct(&self, selected: i32) -> Option<bool> {
        let in_range = usize::try_from(selected)
            .map(|index| index < self.options.len())
            .unwrap_or(false);
        in_range.then_some(selected == self.correct_answer)
    }
}

/// Per-category counts for one user
#[derive(Debug, Clone, FromRow)]
pub struct CategoryProgressRow {
    pub category_id: Uuid,
    pub name: String,
    pub total: i64,
    pub completed: i64,
    pub correct: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> Quiz {
        Quiz {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            question: "Which bin takes glass bottles?".to_string(),
            options: vec!["Green".into(), "Blue".into(), "Red".into()],
            correct_answer: 1,
            explanation: Some("Blue bins collect glass.".to_string()),
            points: 10,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_correct() {
        let q = quiz();
        assert_eq!(q.is_correct(1), Some(true));
        assert_eq!(q.is_correct(0), Some(false));
        assert_eq!(q.is_correct(2), Some(false));
    }

    #[test]
    fn test_out_of_range_selection() {
        let q = quiz();
        assert_eq!(q.is_correct(3), None);
        assert_eq!(q.is_correct(-1), None);
    }
}
