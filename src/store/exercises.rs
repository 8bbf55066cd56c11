//! Exercise catalog persistence

use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{Exercise, ExerciseId, MuscleGroup, NewExercise};

/// Built-in catalog: (English, Chinese, group, YouTube id, Bilibili id)
const DEFAULT_EXERCISES: &[(&str, &str, MuscleGroup, &str, &str)] = &[
    ("Barbell Bench Press", "杠铃卧推", MuscleGroup::Chest, "rT7DgCr-3pg", "BV1xx411c7SZ"),
    ("Dumbbell Flyes", "哑铃飞鸟", MuscleGroup::Chest, "eozdVDA78K0", "BV1yW411q7Ls"),
    ("Push-ups", "俯卧撑", MuscleGroup::Chest, "IODxDxX7oi4", "BV1Ws411e7vJ"),
    ("Incline Dumbbell Press", "上斜哑铃卧推", MuscleGroup::Chest, "8iPEnn-ltC8", "BV1Es411e7Mk"),
    ("Cable Crossover", "绳索夹胸", MuscleGroup::Chest, "taI4XduLpTk", "BV1Hs411e7sK"),
    ("Deadlift", "硬拉", MuscleGroup::Back, "op9kVnSso6Q", "BV1Ws411e7eB"),
    ("Pull-ups", "引体向上", MuscleGroup::Back, "eGo4IYlbE5g", "BV1Hs411e7cM"),
    ("Barbell Row", "杠铃划船", MuscleGroup::Back, "FWJR5Ve8bnQ", "BV1Es411e7dP"),
    ("Lat Pulldown", "高位下拉", MuscleGroup::Back, "CAwf7n6Luuc", "BV1Ws411e7fQ"),
    ("Seated Cable Row", "坐姿划船", MuscleGroup::Back, "xQNrFHEMhI4", "BV1Hs411e7gR"),
    ("Overhead Press", "肩推", MuscleGroup::Shoulders, "QAQ64hK4Xns", "BV1Es411e7hS"),
    ("Lateral Raises", "侧平举", MuscleGroup::Shoulders, "3VcKaXpzqRo", "BV1Ws411e7iT"),
    ("Front Raises", "前平举", MuscleGroup::Shoulders, "SVT4-H2aXjg", "BV1Hs411e7jU"),
    ("Face Pulls", "面拉", MuscleGroup::Shoulders, "rep-qVOkqgk", "BV1Es411e7kV"),
    ("Barbell Curl", "杠铃弯举", MuscleGroup::Biceps, "kwG2ipFRgfo", "BV1Ws411e7lW"),
    ("Hammer Curl", "锤式弯举", MuscleGroup::Biceps, "zC3nLlEvin4", "BV1Hs411e7mX"),
    ("Preacher Curl", "牧师凳弯举", MuscleGroup::Biceps, "fIWP-FRFNU0", "BV1Es411e7nY"),
    ("Tricep Dips", "双杠臂屈伸", MuscleGroup::Triceps, "6kALZikXxLc", "BV1Ws411e7oZ"),
    ("Overhead Tricep Extension", "过头臂屈伸", MuscleGroup::Triceps, "YbX7Wd8jQ-Q", "BV1Hs411e7p1"),
    ("Tricep Pushdown", "绳索下压", MuscleGroup::Triceps, "2-LAMcpzODU", "BV1Es411e7q2"),
    ("Barbell Squat", "杠铃深蹲", MuscleGroup::Legs, "ultWZbUMPL8", "BV1Ws411e7r3"),
    ("Leg Press", "腿举", MuscleGroup::Legs, "IZxyjW7MPJQ", "BV1Hs411e7s4"),
    ("Walking Lunges", "行走弓步", MuscleGroup::Legs, "L8fvypPrzzs", "BV1Es411e7t5"),
    ("Leg Curl", "腿弯举", MuscleGroup::Legs, "ELOCsoDSmrg", "BV1Ws411e7u6"),
    ("Leg Extension", "腿屈伸", MuscleGroup::Legs, "YyvSfVjQeL0", "BV1Hs411e7v7"),
    ("Calf Raises", "提踵", MuscleGroup::Legs, "gwLzBJYoWlI", "BV1Es411e7w8"),
    ("Plank", "平板支撑", MuscleGroup::Core, "ASdvN_XEl_c", "BV1Ws411e7x9"),
    ("Crunches", "卷腹", MuscleGroup::Core, "Xyd_fa5zoEU", "BV1Hs411e7y0"),
    ("Russian Twist", "俄罗斯转体", MuscleGroup::Core, "wkD8rjkodUI", "BV1Es411e7z1"),
    ("Hanging Leg Raises", "悬垂举腿", MuscleGroup::Core, "Pr1ieGZ5atk", "BV1Ws411e7A2"),
];

fn exercise_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Exercise> {
    let group: String = row.get("muscle_group");
    let muscle_group = group.parse::<MuscleGroup>().map_err(AppError::Invalid)?;

    Ok(Exercise {
        id: row.get("id"),
        name_english: row.get("name_english"),
        name_chinese: row.get("name_chinese"),
        muscle_group,
        is_custom: row.get("is_custom"),
        video_youtube: row.get("video_youtube"),
        video_bilibili: row.get("video_bilibili"),
        default_sets: row.get::<Option<i64>, _>("default_sets").map(|v| v as u32),
        default_reps: row.get::<Option<i64>, _>("default_reps").map(|v| v as u32),
        default_rest_seconds: row.get::<Option<i64>, _>("default_rest_seconds").map(|v| v as u32),
    })
}

pub async fn insert_exercise(pool: &SqlitePool, exercise: &NewExercise) -> AppResult<ExerciseId> {
    let result = sqlx::query(
        r#"
        INSERT INTO exercises (
            name_english, name_chinese, muscle_group, is_custom,
            video_youtube, video_bilibili,
            default_sets, default_reps, default_rest_seconds
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&exercise.name_english)
    .bind(&exercise.name_chinese)
    .bind(exercise.muscle_group.as_str())
    .bind(exercise.is_custom)
    .bind(&exercise.video_youtube)
    .bind(&exercise.video_bilibili)
    .bind(exercise.default_sets.map(i64::from))
    .bind(exercise.default_reps.map(i64::from))
    .bind(exercise.default_rest_seconds.map(i64::from))
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    debug!(id, name = %exercise.name_english, "Inserted exercise");
    Ok(id)
}

/// All exercises, grouped by muscle group then name
pub async fn list_exercises(pool: &SqlitePool) -> AppResult<Vec<Exercise>> {
    let rows = sqlx::query(
        r#"
        SELECT
            id, name_english, name_chinese, muscle_group, is_custom,
            video_youtube, video_bilibili,
            default_sets, default_reps, default_rest_seconds
        FROM exercises
        ORDER BY muscle_group, name_english
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(exercise_from_row).collect()
}

pub async fn load_exercise(pool: &SqlitePool, id: ExerciseId) -> AppResult<Exercise> {
    let row = sqlx::query(
        r#"
        SELECT
            id, name_english, name_chinese, muscle_group, is_custom,
            video_youtube, video_bilibili,
            default_sets, default_reps, default_rest_seconds
        FROM exercises
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Exercise {}", id)))?;

    exercise_from_row(&row)
}

/// Insert the built-in catalog, skipping names already present.
/// Returns how many exercises were added.
pub async fn seed_default_exercises(pool: &SqlitePool) -> AppResult<u64> {
    let mut added = 0;

    for (english, chinese, group, youtube, bilibili) in DEFAULT_EXERCISES {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO exercises (
                name_english, name_chinese, muscle_group, is_custom,
                video_youtube, video_bilibili
            )
            VALUES (?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(*english)
        .bind(*chinese)
        .bind(group.as_str())
        .bind(*youtube)
        .bind(*bilibili)
        .execute(pool)
        .await?;

        added += result.rows_affected();
    }

    if added > 0 {
        info!(added, "Seeded default exercises");
    }
    Ok(added)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
