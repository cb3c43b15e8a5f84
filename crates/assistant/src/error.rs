use thiserror::Error;

/// Why a model reply could not be turned into a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("Не удалось распарсить JSON из ответа")]
    NoJsonObject,

    #[error("Неверная структура ответа от API")]
    InvalidStructure(String),
}

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Gemini API ключ не настроен на сервере")]
    MissingApiKey,

    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Пустой ответ от Gemini API")]
    EmptyReply,

    #[error("{0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Reply(#[from] ReplyError),

    #[error("Ошибка API Gemini")]
    ChatUnavailable,

    #[error("Не удалось получить ответ от AI")]
    NoAnswer,
}

impl AssistantError {
    /// HTTP status the failure should be reported with.
    pub fn status(&self) -> u16 {
        match self {
            AssistantError::Upstream { status, .. } if (400..600).contains(status) => *status,
            _ => 500,
        }
    }
}
