use std::sync::Mutex;

use async_trait::async_trait;
use smartmama_assistant::{
    AssistantError, ChatMessage, ChatRequest, LanguageModel, PlanRequest, ReplyError, Role, ask,
    generate_plan,
};
use smartmama_plan::{Mode, Plan};

enum Script {
    Reply(&'static str),
    Upstream(u16, &'static str),
    Empty,
}

struct ScriptedModel {
    script: Script,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl ScriptedModel {
    fn new(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> (String, u32) {
        self.prompts.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, AssistantError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_owned(), max_output_tokens));

        match self.script {
            Script::Reply(text) => Ok(text.to_owned()),
            Script::Upstream(status, message) => Err(AssistantError::Upstream {
                status,
                message: message.to_owned(),
            }),
            Script::Empty => Err(AssistantError::EmptyReply),
        }
    }
}

fn pregnancy_request() -> PlanRequest {
    PlanRequest {
        mode: Mode::Pregnancy,
        period: "20".to_owned(),
        goals: None,
    }
}

const FENCED_REPLY: &str = "Вот ваш план:\n```json\n{\"summary\":\"Неделя 20\",\"weeklyPlan\":[{\"period\":\"Неделя 20\",\"goals\":[\"УЗИ\"],\"activities\":[\"Прогулка\"],\"tips\":[]}],\"checklists\":[{\"title\":\"Анализы\",\"items\":[{\"text\":\"Кровь\",\"done\":false}]}],\"warnings\":[]}\n```";

#[tokio::test]
async fn test_generate_plan_from_fenced_reply() {
    let model = ScriptedModel::new(Script::Reply(FENCED_REPLY));

    let plan = generate_plan(&model, &pregnancy_request(), 2000)
        .await
        .unwrap();

    assert_eq!(plan.summary, "Неделя 20");
    assert_eq!(plan.period_blocks[0].activities, ["Прогулка"]);
    assert_eq!(plan.checklists[0].items[0].text, "Кровь");

    let (prompt, tokens) = model.last_prompt();
    assert_eq!(tokens, 2000);
    assert!(prompt.contains("Срок: 20 недель"));
}

#[tokio::test]
async fn test_generate_plan_rejects_incomplete_reply() {
    let model = ScriptedModel::new(Script::Reply(r#"Держите: {"summary": "Без блоков"}"#));

    let err = generate_plan(&model, &pregnancy_request(), 2000)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssistantError::Reply(ReplyError::InvalidStructure(_))
    ));
    assert_eq!(err.to_string(), "Неверная структура ответа от API");
}

#[tokio::test]
async fn test_generate_plan_rejects_prose() {
    let model = ScriptedModel::new(Script::Reply("Уточните, пожалуйста, срок."));

    let err = generate_plan(&model, &pregnancy_request(), 2000)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Не удалось распарсить JSON из ответа");
}

#[tokio::test]
async fn test_generate_plan_keeps_upstream_status() {
    let model = ScriptedModel::new(Script::Upstream(429, "Resource exhausted"));

    let err = generate_plan(&model, &pregnancy_request(), 2000)
        .await
        .unwrap_err();

    assert_eq!(err.status(), 429);
    assert_eq!(err.to_string(), "Resource exhausted");
}

#[tokio::test]
async fn test_ask_grounds_prompt_in_plan() {
    let model = ScriptedModel::new(Script::Reply("Принимайте фолиевую кислоту."));
    let plan: Plan = serde_json::from_str(
        r#"{"summary":"Резюме","weeklyPlan":[{"period":"Неделя 12","goals":["Скрининг"]}]}"#,
    )
    .unwrap();

    let answer = ask(
        &model,
        &ChatRequest {
            message: "Какие витамины?".to_owned(),
            history: vec![ChatMessage {
                role: Role::User,
                content: "Здравствуйте".to_owned(),
            }],
            plan: Some(plan),
            mode: Some(Mode::Pregnancy),
            period: Some("12".to_owned()),
        },
        1000,
    )
    .await
    .unwrap();

    assert_eq!(answer, "Принимайте фолиевую кислоту.");

    let (prompt, tokens) = model.last_prompt();
    assert_eq!(tokens, 1000);
    assert!(prompt.contains("Неделя 12:\nЦели: Скрининг"));
    assert!(prompt.contains("Пациент: Здравствуйте"));
}

#[tokio::test]
async fn test_ask_hides_upstream_details() {
    let model = ScriptedModel::new(Script::Upstream(403, "API key not valid"));
    let request = ChatRequest {
        message: "Вопрос".to_owned(),
        ..Default::default()
    };

    let err = ask(&model, &request, 1000).await.unwrap_err();

    assert!(matches!(err, AssistantError::ChatUnavailable));
    assert_eq!(err.status(), 500);
}

#[tokio::test]
async fn test_ask_without_answer() {
    for script in [Script::Empty, Script::Reply("   ")] {
        let model = ScriptedModel::new(script);
        let request = ChatRequest {
            message: "Вопрос".to_owned(),
            ..Default::default()
        };

        let err = ask(&model, &request, 1000).await.unwrap_err();

        assert_eq!(err.to_string(), "Не удалось получить ответ от AI");
    }
}
