use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::education::models::{CategoryProgressRow, Quiz, QuizCategory};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizCategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
}

impl From<QuizCategory> for QuizCategoryResponseDto {
    fn from(c: QuizCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            icon: c.icon,
            display_order: c.display_order,
        }
    }
}

/// Public view of a question. The answer and explanation are withheld.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizQuestionDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub points: i32,
}

impl From<Quiz> for QuizQuestionDto {
    fn from(q: Quiz) -> Self {
        Self {
            id: q.id,
            category_id: q.category_id,
            question: q.question,
            options: q.options,
            points: q.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitAnswerDto {
    /// Zero-based index into the question's options
    #[schema(example = 1)]
    pub selected_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerResultDto {
    pub correct: bool,
    pub correct_index: i32,
    pub explanation: Option<String>,
    /// False when the question had already been answered; the first answer stands
    pub recorded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryProgressDto {
    pub category_id: Uuid,
    pub name: String,
    pub total: i64,
    pub completed: i64,
    pub correct: i64,
    /// completed / total, 0 for an empty category
    pub ratio: f64,
}

impl CategoryProgressDto {
    pub fn compute(row: CategoryProgressRow) -> Self {
        let completed = row.completed.clamp(0, row.total.max(0));
        let ratio = if row.total > 0 {
            completed as f64 / row.total as f64
        } else {
            0.0
        };

        Self {
            category_id: row.category_id,
            name: row.name,
            total: row.total,
            completed,
            correct: row.correct.min(completed),
            ratio,
        }
    }
}
