use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use rollbook_core::AppError;

use super::model::{Course, PlaceCourseRequest};
use super::state::{self, CourseStatus, Seats};
use crate::modules::users::model::User;

const COURSE_COLUMNS: &str =
    "id, symbol, name, credit, capacity, enrollments, status, teacher_id, created_at, updated_at";

/// Load a course row by symbol with a row lock, so concurrent seat mutations
/// on the same course serialize.
async fn lock_course_by_symbol(
    tx: &mut Transaction<'_, Postgres>,
    symbol: &str,
) -> Result<Course, AppError> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {} FROM courses WHERE symbol = $1 FOR UPDATE",
        COURSE_COLUMNS
    ))
    .bind(symbol)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| {
        error!(course.symbol = %symbol, error = %e, "Database error fetching course");
        AppError::from(e)
    })?
    .ok_or_else(|| {
        debug!(course.symbol = %symbol, "Course not found");
        AppError::not_found(anyhow::anyhow!("There is no course with this symbol"))
    })
}

/// Persist a seat-count/status change computed by the state machine. The
/// `enrollments` guard is a compare-and-swap: if another transaction slipped
/// in between read and write, no row matches and the caller re-fails cleanly
/// instead of overshooting capacity.
async fn apply_seat_change(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
    prior_enrollments: i32,
    seats: Seats,
    status: CourseStatus,
) -> Result<Course, AppError> {
    sqlx::query_as::<_, Course>(&format!(
        "UPDATE courses SET enrollments = $1, status = $2, updated_at = now()
         WHERE id = $3 AND enrollments = $4
         RETURNING {}",
        COURSE_COLUMNS
    ))
    .bind(seats.enrollments)
    .bind(status)
    .bind(course_id)
    .bind(prior_enrollments)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| {
        error!(course.id = %course_id, error = %e, "Database error updating course seats");
        AppError::from(e)
    })?
    .ok_or_else(|| {
        warn!(course.id = %course_id, "Concurrent seat change detected");
        AppError::conflict(anyhow::anyhow!("The course changed concurrently, try again"))
    })
}

async fn is_enrolled(
    tx: &mut Transaction<'_, Postgres>,
    student_id: Uuid,
    course_id: Uuid,
) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error checking enrollment");
        AppError::from(e)
    })
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(course.symbol = %dto.symbol, db.operation = "INSERT", db.table = "courses"))]
    pub async fn place_course(
        db: &PgPool,
        teacher_id: Uuid,
        dto: PlaceCourseRequest,
    ) -> Result<Course, AppError> {
        debug!(course.name = %dto.name, "Placing new course");

        if dto.enrollments > dto.capacity {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "enrollments cannot exceed capacity"
            )));
        }

        let symbol_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE symbol = $1)",
        )
        .bind(&dto.symbol)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error checking symbol uniqueness");
            AppError::from(e)
        })?;

        if symbol_taken {
            warn!(course.symbol = %dto.symbol, "Attempted to place course with existing symbol");
            return Err(AppError::conflict(anyhow::anyhow!(
                "The symbol of the course already exists"
            )));
        }

        let name_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE name = $1)",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error checking name uniqueness");
            AppError::from(e)
        })?;

        if name_taken {
            warn!(course.name = %dto.name, "Attempted to place course with existing name");
            return Err(AppError::conflict(anyhow::anyhow!(
                "The name of the course already exists"
            )));
        }

        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (symbol, name, credit, capacity, enrollments, status, teacher_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&dto.symbol)
        .bind(&dto.name)
        .bind(dto.credit)
        .bind(dto.capacity)
        .bind(dto.enrollments)
        .bind(dto.status)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Concurrent placement with the same symbol/name loses here.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "The symbol or name of the course already exists"
                ));
            }
            error!(error = %e, "Database error creating course");
            AppError::from(e)
        })?;

        info!(course.id = %course.id, course.symbol = %course.symbol, "Course placed successfully");

        Ok(course)
    }

    #[instrument(skip(db), fields(course.symbol = %symbol, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_status(
        db: &PgPool,
        teacher_id: Uuid,
        symbol: &str,
        requested: CourseStatus,
    ) -> Result<Course, AppError> {
        debug!(status = %requested, "Updating course status");

        let mut tx = db.begin().await.map_err(AppError::from)?;

        let course = lock_course_by_symbol(&mut tx, symbol).await?;

        if course.teacher_id != teacher_id {
            warn!(course.id = %course.id, "Status update by non-owning teacher rejected");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You have to be the teacher of the course to update it"
            )));
        }

        let seats = Seats {
            enrollments: course.enrollments,
            capacity: course.capacity,
        };
        let next = state::change_status(requested, seats).map_err(AppError::conflict)?;

        let updated = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET status = $1, updated_at = now() WHERE id = $2 RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(next)
        .bind(course.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!(course.id = %course.id, error = %e, "Database error updating status");
            AppError::from(e)
        })?;

        tx.commit().await.map_err(AppError::from)?;

        info!(course.id = %updated.id, status = %updated.status, "Course status updated");

        Ok(updated)
    }

    #[instrument(skip(db), fields(course.symbol = %symbol, student.id = %student_id, db.operation = "UPDATE", db.table = "courses,enrollments"))]
    pub async fn enroll(db: &PgPool, student_id: Uuid, symbol: &str) -> Result<Course, AppError> {
        debug!("Enrolling student");

        let mut tx = db.begin().await.map_err(AppError::from)?;

        let course = lock_course_by_symbol(&mut tx, symbol).await?;

        if is_enrolled(&mut tx, student_id, course.id).await? {
            return Err(AppError::conflict(anyhow::anyhow!(
                "The student is already enrolled"
            )));
        }

        let seats = Seats {
            enrollments: course.enrollments,
            capacity: course.capacity,
        };
        let (next_seats, next_status) =
            state::enroll(course.status, seats).map_err(AppError::conflict)?;

        sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)")
            .bind(student_id)
            .bind(course.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error inserting enrollment");
                AppError::from(e)
            })?;

        let updated =
            apply_seat_change(&mut tx, course.id, course.enrollments, next_seats, next_status)
                .await?;

        tx.commit().await.map_err(AppError::from)?;

        info!(
            course.id = %updated.id,
            enrollments = %updated.enrollments,
            status = %updated.status,
            "Student enrolled"
        );

        Ok(updated)
    }

    #[instrument(skip(db), fields(course.symbol = %symbol, student.id = %student_id, db.operation = "UPDATE", db.table = "courses,enrollments"))]
    pub async fn unenroll(db: &PgPool, student_id: Uuid, symbol: &str) -> Result<Course, AppError> {
        debug!("Unenrolling student");

        let mut tx = db.begin().await.map_err(AppError::from)?;

        let course = lock_course_by_symbol(&mut tx, symbol).await?;

        if !is_enrolled(&mut tx, student_id, course.id).await? {
            return Err(AppError::conflict(anyhow::anyhow!(
                "The student is not enrolled"
            )));
        }

        let seats = Seats {
            enrollments: course.enrollments,
            capacity: course.capacity,
        };
        let (next_seats, next_status) =
            state::unenroll(course.status, seats).map_err(AppError::conflict)?;

        sqlx::query("DELETE FROM enrollments WHERE student_id = $1 AND course_id = $2")
            .bind(student_id)
            .bind(course.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting enrollment");
                AppError::from(e)
            })?;

        let updated =
            apply_seat_change(&mut tx, course.id, course.enrollments, next_seats, next_status)
                .await?;

        tx.commit().await.map_err(AppError::from)?;

        info!(
            course.id = %updated.id,
            enrollments = %updated.enrollments,
            status = %updated.status,
            "Student unenrolled"
        );

        Ok(updated)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_all_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        debug!("Fetching all courses");

        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses ORDER BY created_at DESC",
            COURSE_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching courses");
            AppError::from(e)
        })
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course_by_id(db: &PgPool, course_id: Uuid) -> Result<Course, AppError> {
        debug!("Fetching course by id");

        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching course");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!("Course not found");
            AppError::not_found(anyhow::anyhow!("There is no course with this Id"))
        })
    }

    #[instrument(skip(db), fields(course.symbol = %symbol, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course_by_symbol(db: &PgPool, symbol: &str) -> Result<Course, AppError> {
        debug!("Fetching course by symbol");

        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE symbol = $1",
            COURSE_COLUMNS
        ))
        .bind(symbol)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching course");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!("Course not found");
            AppError::not_found(anyhow::anyhow!("There is no course with this symbol"))
        })
    }

    #[instrument(skip(db), fields(teacher.id = %teacher_id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses_of_teacher(
        db: &PgPool,
        teacher_id: Uuid,
    ) -> Result<Vec<Course>, AppError> {
        debug!("Fetching courses of teacher");

        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE teacher_id = $1 ORDER BY created_at DESC",
            COURSE_COLUMNS
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching teacher courses");
            AppError::from(e)
        })
    }

    #[instrument(skip(db), fields(student.id = %student_id, db.operation = "SELECT", db.table = "courses,enrollments"))]
    pub async fn get_courses_of_student(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Course>, AppError> {
        debug!("Fetching courses of student");

        sqlx::query_as::<_, Course>(
            "SELECT c.id, c.symbol, c.name, c.credit, c.capacity, c.enrollments, c.status,
                    c.teacher_id, c.created_at, c.updated_at
             FROM courses c
             INNER JOIN enrollments e ON e.course_id = c.id
             WHERE e.student_id = $1
             ORDER BY e.enrolled_at DESC",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching student courses");
            AppError::from(e)
        })
    }

    #[instrument(skip(db), fields(course.symbol = %symbol, db.operation = "SELECT", db.table = "users,enrollments"))]
    pub async fn get_students_of_course(
        db: &PgPool,
        teacher_id: Uuid,
        symbol: &str,
    ) -> Result<Vec<User>, AppError> {
        debug!("Fetching students of course");

        let course = Self::get_course_by_symbol(db, symbol).await?;

        if course.teacher_id != teacher_id {
            warn!(course.id = %course.id, "Roster requested by non-owning teacher rejected");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You have to be the teacher of the course to carry out this request"
            )));
        }

        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.role, u.created_at, u.updated_at
             FROM users u
             INNER JOIN enrollments e ON e.student_id = u.id
             WHERE e.course_id = $1
             ORDER BY e.enrolled_at",
        )
        .bind(course.id)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching course students");
            AppError::from(e)
        })
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete_course(
        db: &PgPool,
        teacher_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        debug!("Deleting course");

        let course = Self::get_course_by_id(db, course_id).await?;

        if course.teacher_id != teacher_id {
            warn!("Deletion by non-owning teacher rejected");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You have to be the teacher of the course to delete it"
            )));
        }

        // Enrollments go with the course (ON DELETE CASCADE).
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error deleting course");
                AppError::from(e)
            })?;

        info!("Course deleted successfully");

        Ok(())
    }
}
