use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Неверный номер месяца: {0}")]
    InvalidMonth(u8),

    #[error("Год вне допустимого диапазона: {0}")]
    YearOutOfRange(i32),

    #[error("Неверный день: {0}")]
    InvalidDayKey(String),

    #[error("Повторяющийся идентификатор задачи: {0}")]
    DuplicateTaskId(String),

    #[error("Текст задачи не может быть пустым")]
    EmptyTaskText,
}
