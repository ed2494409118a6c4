use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::education::dtos::{
    AnswerResultDto, CategoryProgressDto, QuizCategoryResponseDto, QuizQuestionDto,
};
use crate::features::education::models::{CategoryProgressRow, Quiz, QuizCategory};

/// Service for quiz categories, questions and answers
pub struct QuizService {
    pool: PgPool,
}

impl QuizService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<QuizCategoryResponseDto>> {
        let categories = sqlx::query_as::<_, QuizCategory>(
            "SELECT * FROM quiz_categories ORDER BY display_order, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list quiz categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Questions of a category in creation order. Unknown category → 404.
    pub async fn list_questions(&self, category_id: Uuid) -> Result<Vec<QuizQuestionDto>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM quiz_categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Quiz category {} not found",
                category_id
            )));
        }

        let quizzes = sqlx::query_as::<_, Quiz>(
            "SELECT * FROM quizzes WHERE category_id = $1 ORDER BY created_at, id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list quizzes for {}: {:?}", category_id, e);
            AppError::Database(e)
        })?;

        Ok(quizzes.into_iter().map(Into::into).collect())
    }

    /// Score an answer and record it once. Later answers are scored but not stored.
    pub async fn answer(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        selected_index: i32,
    ) -> Result<AnswerResultDto> {
        let quiz = sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))?;

        let correct = quiz.is_correct(selected_index).ok_or_else(|| {
            AppError::Validation(format!(
                "selected_index must be between 0 and {}",
                quiz.options.len().saturating_sub(1)
            ))
        })?;

        let inserted: Option<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO user_quiz_progress (user_id, quiz_id, is_correct)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, quiz_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(correct)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record quiz answer: {:?}", e);
            AppError::Database(e)
        })?;

        if inserted.is_none() {
            tracing::debug!("User {} already answered quiz {}", user_id, quiz_id);
        }

        Ok(AnswerResultDto {
            correct,
            correct_index: quiz.correct_answer,
            explanation: quiz.explanation,
            recorded: inserted.is_some(),
        })
    }

    /// Progress per category. Only answers to that category's questions count.
    pub async fn progress(&self, user_id: Uuid) -> Result<Vec<CategoryProgressDto>> {
        let rows = sqlx::query_as::<_, CategoryProgressRow>(
            r#"
            SELECT
                c.id AS category_id,
                c.name,
                COUNT(q.id) AS total,
                COUNT(p.id) AS completed,
                COUNT(p.id) FILTER (WHERE p.is_correct) AS correct
            FROM quiz_categories c
            LEFT JOIN quizzes q ON q.category_id = c.id
            LEFT JOIN user_quiz_progress p ON p.quiz_id = q.id AND p.user_id = $1
            GROUP BY c.id, c.name, c.display_order
            ORDER BY c.display_order, c.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute quiz progress for {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(CategoryProgressDto::compute).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert_category(pool: &PgPool, name: &str, display_order: i32) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO quiz_categories (name, display_order) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(display_order)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn insert_quiz(pool: &PgPool, category_id: Uuid, question: &str) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO quizzes (category_id, question, options, correct_answer, explanation)
            VALUES ($1, $2, $3, 1, 'Because')
            RETURNING id
            "#,
        )
        .bind(category_id)
        .bind(question)
        .bind(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn progress_rows(pool: &PgPool, user_id: Uuid, quiz_id: Uuid) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_quiz_progress WHERE user_id = $1 AND quiz_id = $2",
        )
        .bind(user_id)
        .bind(quiz_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_repeated_answer_is_recorded_once(pool: PgPool) {
        let category = insert_category(&pool, "Civics", 0).await;
        let quiz = insert_quiz(&pool, category, "Who collects garbage?").await;
        let service = QuizService::new(pool.clone());
        let user_id = Uuid::new_v4();

        let first = service.answer(user_id, quiz, 1).await.unwrap();
        assert!(first.correct);
        assert!(first.recorded);
        assert_eq!(first.correct_index, 1);
        assert_eq!(first.explanation.as_deref(), Some("Because"));

        let second = service.answer(user_id, quiz, 0).await.unwrap();
        assert!(!second.correct);
        assert!(!second.recorded);

        assert_eq!(progress_rows(&pool, user_id, quiz).await, 1);

        // The stored row keeps the first answer
        let stored: bool = sqlx::query_scalar(
            "SELECT is_correct FROM user_quiz_progress WHERE user_id = $1 AND quiz_id = $2",
        )
        .bind(user_id)
        .bind(quiz)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(stored);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_answers_leave_one_row(pool: PgPool) {
        let category = insert_category(&pool, "Civics", 0).await;
        let quiz = insert_quiz(&pool, category, "Who fixes potholes?").await;
        let service = QuizService::new(pool.clone());
        let user_id = Uuid::new_v4();

        let results =
            futures::future::join_all((0..5).map(|_| service.answer(user_id, quiz, 1))).await;

        let recorded = results
            .into_iter()
            .map(|r| r.unwrap())
            .filter(|r| r.recorded)
            .count();
        assert_eq!(recorded, 1);
        assert_eq!(progress_rows(&pool, user_id, quiz).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_answer_rejects_unknown_quiz_and_out_of_range_index(pool: PgPool) {
        let category = insert_category(&pool, "Civics", 0).await;
        let quiz = insert_quiz(&pool, category, "Which office issues permits?").await;
        let service = QuizService::new(pool.clone());
        let user_id = Uuid::new_v4();

        let unknown = service.answer(user_id, Uuid::new_v4(), 0).await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));

        let out_of_range = service.answer(user_id, quiz, 3).await;
        assert!(matches!(out_of_range, Err(AppError::Validation(_))));

        assert_eq!(progress_rows(&pool, user_id, quiz).await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_progress_counts_only_own_category_questions(pool: PgPool) {
        let traffic = insert_category(&pool, "Traffic", 0).await;
        let waste = insert_category(&pool, "Waste", 1).await;
        let empty = insert_category(&pool, "Water", 2).await;

        let t1 = insert_quiz(&pool, traffic, "Red light means?").await;
        let t2 = insert_quiz(&pool, traffic, "Zebra crossing is for?").await;
        let w1 = insert_quiz(&pool, waste, "Organic waste goes where?").await;

        let service = QuizService::new(pool.clone());
        let user_id = Uuid::new_v4();
        let other_user = Uuid::new_v4();

        service.answer(user_id, t1, 1).await.unwrap();
        service.answer(user_id, t2, 0).await.unwrap();
        service.answer(other_user, w1, 1).await.unwrap();

        let progress = service.progress(user_id).await.unwrap();
        assert_eq!(progress.len(), 3);

        let by_id = |id: Uuid| progress.iter().find(|p| p.category_id == id).unwrap();

        let t = by_id(traffic);
        assert_eq!((t.total, t.completed, t.correct), (2, 2, 1));
        assert_eq!(t.ratio, 1.0);

        let w = by_id(waste);
        assert_eq!((w.total, w.completed, w.correct), (1, 0, 0));
        assert_eq!(w.ratio, 0.0);

        let e = by_id(empty);
        assert_eq!((e.total, e.completed, e.correct), (0, 0, 0));
        assert_eq!(e.ratio, 0.0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_questions_of_unknown_category_is_not_found(pool: PgPool) {
        let service = QuizService::new(pool);
        let result = service.list_questions(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
