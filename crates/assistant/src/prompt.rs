use std::fmt::Write as _;

use smartmama_plan::{Mode, Plan};

use crate::{ChatMessage, Role};

pub const DEFAULT_GOALS: &str = "Общее развитие и здоровье";

pub const PLAN_SYSTEM_PROMPT: &str = r#"Ты — профессиональный медицинско-педагогический ассистент для беременных и родителей детей 0–36 месяцев. Отвечай как эксперт на основе доказательной медицины и общих руководств, но не ставь диагнозы. Формат ответа — строгий JSON:
{
  "summary": "короткое резюме на русском",
  "weeklyPlan": [{"period":"строка","goals":[],"activities":[],"tips":[]}],
  "checklists":[{"title":"...","items":[{"text":"...","done":false}]}],
  "warnings":["..."]
}
Пиши на русском. Если данных мало — запрашивай уточнение."#;

const CHAT_SYSTEM_PROMPT: &str = r#"Ты - опытный врач-гинеколог и специалист по беременности и развитию детей. Твоя задача - давать профессиональные, заботливые и понятные ответы на вопросы беременных женщин и молодых мам.

Важные правила:
- Всегда будь доброжелательным и поддерживающим
- Давай конкретные, практичные советы
- Если вопрос требует срочной медицинской помощи, обязательно рекомендуй обратиться к врачу
- Используй простой, понятный язык без сложных медицинских терминов
- Будь кратким, но информативным
- Отвечай на русском языке
- Если у пациента есть персональный план, используй его для более точных рекомендаций
- Если пациент спрашивает о конкретной неделе/месяце из плана, дай детальный ответ на основе этого плана

Помощь по использованию приложения Smart Mama:
- Чтобы создать план: заполните форму слева (выберите режим, укажите срок и цель), затем нажмите "Сгенерировать план"
- Режим "Беременность": для планирования по неделям беременности (1-42 недели)
- Режим "Ребёнок": для планирования развития ребёнка по месяцам (0-36 месяцев)
- Календарь: переключитесь на вид календаря, чтобы видеть план в календарном формате
- Можете задавать вопросы о любой неделе/месяце из вашего плана"#;

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Pregnancy => "беременность",
        Mode::Child => "ребёнок 0-36 мес",
    }
}

/// Genitive unit used after a period number.
fn period_unit(mode: Mode) -> &'static str {
    match mode {
        Mode::Pregnancy => "недель",
        Mode::Child => "месяцев",
    }
}

fn block_unit(mode: Mode) -> &'static str {
    match mode {
        Mode::Pregnancy => "неделям",
        Mode::Child => "месяцам",
    }
}

pub fn plan_prompt(mode: Mode, period: &str, goals: Option<&str>) -> String {
    let goals = goals
        .map(str::trim)
        .filter(|goals| !goals.is_empty())
        .unwrap_or(DEFAULT_GOALS);

    format!(
        "{PLAN_SYSTEM_PROMPT}\n\nРежим: {}. Срок: {} {}. Цели: {goals}. Сгенерируй JSON по схеме выше. \
         Если режим={mode} — минимум 4 блока по {}. Пиши на русском.",
        mode_label(mode),
        period.trim(),
        period_unit(mode),
        block_unit(mode),
    )
}

/// Plan summary handed to the chat model so answers can refer to the user's plan.
pub fn plan_context(plan: &Plan, mode: Option<Mode>, period: Option<&str>) -> String {
    let plan_type = match mode {
        Some(Mode::Pregnancy) => "беременности",
        _ => "развития ребёнка",
    };

    let period_text = match (period.map(str::trim).filter(|p| !p.is_empty()), mode) {
        (Some(period), Some(mode)) => {
            format!(" (текущий период: {period} {})", period_unit(mode))
        }
        (Some(period), None) => format!(" (текущий период: {period})"),
        _ => String::new(),
    };

    let mut context = format!("\n\nУ пациента есть персональный план {plan_type}{period_text}:\n\n");
    let _ = write!(context, "Резюме плана: {}\n\n", plan.summary);
    context.push_str("Детальный план по периодам:\n");

    for block in &plan.period_blocks {
        let _ = writeln!(context, "\n{}:", block.period);
        if !block.goals.is_empty() {
            let _ = writeln!(context, "Цели: {}", block.goals.join(", "));
        }
        if !block.activities.is_empty() {
            let _ = writeln!(context, "Активности: {}", block.activities.join(", "));
        }
        if !block.tips.is_empty() {
            let _ = writeln!(context, "Советы: {}", block.tips.join(", "));
        }
    }

    if !plan.warnings.is_empty() {
        let _ = writeln!(
            context,
            "\n\nВажные предупреждения: {}",
            plan.warnings.join("; ")
        );
    }

    context
}

pub fn history_transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|message| {
            let speaker = match message.role {
                Role::User => "Пациент",
                Role::Assistant => "Врач",
            };
            format!("{speaker}: {}", message.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn chat_prompt(
    message: &str,
    history: &[ChatMessage],
    plan: Option<&Plan>,
    mode: Option<Mode>,
    period: Option<&str>,
) -> String {
    let context = plan
        .map(|plan| plan_context(plan, mode, period))
        .unwrap_or_default();

    let transcript = history_transcript(history);
    let history_section = if transcript.is_empty() {
        String::new()
    } else {
        format!("\nИстория разговора:\n{transcript}\n")
    };

    format!(
        "{CHAT_SYSTEM_PROMPT}\n{context}\n{history_section}\n\nНовый вопрос пациента: {}",
        message.trim()
    )
}
