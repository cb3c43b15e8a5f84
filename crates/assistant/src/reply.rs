//! Turning free-form model replies into a [`Plan`].
//!
//! Models answer with raw JSON, JSON inside a markdown code fence, or JSON surrounded by
//! prose. Each shape has its own strategy; [`extract_json`] tries them in order.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use smartmama_plan::Plan;

use crate::ReplyError;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*\})\s*```").expect("valid fenced block regex")
});

static EMBEDDED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid embedded object regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    Fenced,
    Embedded,
}

impl Strategy {
    pub const CHAIN: [Strategy; 3] = [Strategy::Direct, Strategy::Fenced, Strategy::Embedded];

    pub fn apply(&self, text: &str) -> Option<Value> {
        match self {
            Strategy::Direct => parse_direct(text),
            Strategy::Fenced => parse_fenced(text),
            Strategy::Embedded => parse_embedded(text),
        }
    }
}

/// The whole reply is JSON.
pub fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

/// JSON object inside a ```json fenced block.
pub fn parse_fenced(text: &str) -> Option<Value> {
    let captures = FENCED_BLOCK.captures(text)?;

    serde_json::from_str(captures.get(1)?.as_str()).ok()
}

/// Span from the first `{` to the last `}`.
pub fn parse_embedded(text: &str) -> Option<Value> {
    let found = EMBEDDED_OBJECT.find(text)?;

    serde_json::from_str(found.as_str()).ok()
}

pub fn extract_json(text: &str) -> Result<(Strategy, Value), ReplyError> {
    Strategy::CHAIN
        .iter()
        .find_map(|strategy| strategy.apply(text).map(|value| (*strategy, value)))
        .ok_or(ReplyError::NoJsonObject)
}

/// Checks the fields a plan cannot do without, then reads the rest leniently.
pub fn plan_from_value(value: Value) -> Result<Plan, ReplyError> {
    let Some(object) = value.as_object() else {
        return Err(ReplyError::InvalidStructure("reply is not an object".to_owned()));
    };

    let has_summary = object
        .get("summary")
        .and_then(Value::as_str)
        .is_some_and(|summary| !summary.is_empty());
    if !has_summary {
        return Err(ReplyError::InvalidStructure("missing summary".to_owned()));
    }

    let has_blocks = object
        .get("weeklyPlan")
        .or_else(|| object.get("periodBlocks"))
        .is_some_and(Value::is_array);
    if !has_blocks {
        return Err(ReplyError::InvalidStructure(
            "weeklyPlan is not an array".to_owned(),
        ));
    }

    serde_json::from_value(value).map_err(|err| ReplyError::InvalidStructure(err.to_string()))
}

pub fn parse_plan(text: &str) -> Result<Plan, ReplyError> {
    let (strategy, value) = extract_json(text)?;

    tracing::debug!(?strategy, "model reply parsed");

    plan_from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{"summary":"Кратко","weeklyPlan":[{"period":"Неделя 1","goals":["A"],"activities":[],"tips":[]}],"checklists":[],"warnings":[]}"#;

    #[test]
    fn test_direct_strategy() {
        assert!(parse_direct(PLAN).is_some());
        assert!(parse_direct(&format!("Вот план: {PLAN}")).is_none());
    }

    #[test]
    fn test_fenced_strategy() {
        let fenced = format!("Ваш план:\n```json\n{PLAN}\n```\nУдачи!");
        assert!(parse_direct(&fenced).is_none());
        assert!(parse_fenced(&fenced).is_some());

        let bare_fence = format!("```\n{PLAN}\n```");
        assert!(parse_fenced(&bare_fence).is_some());
    }

    #[test]
    fn test_embedded_strategy() {
        let prose = format!("Конечно! {PLAN} Надеюсь, это поможет.");
        assert!(parse_fenced(&prose).is_none());
        assert!(parse_embedded(&prose).is_some());
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(extract_json(PLAN).unwrap().0, Strategy::Direct);
        assert_eq!(
            extract_json(&format!("```json\n{PLAN}\n```")).unwrap().0,
            Strategy::Fenced
        );
        assert_eq!(
            extract_json(&format!("План: {PLAN}.")).unwrap().0,
            Strategy::Embedded
        );
    }

    #[test]
    fn test_no_json_is_typed_failure() {
        assert_eq!(
            extract_json("Извините, не могу помочь").unwrap_err(),
            ReplyError::NoJsonObject
        );
        assert_eq!(
            extract_json("{ not json }").unwrap_err(),
            ReplyError::NoJsonObject
        );
    }

    #[test]
    fn test_missing_required_fields_fail() {
        for reply in [
            r#"{"weeklyPlan": []}"#,
            r#"{"summary": "", "weeklyPlan": []}"#,
            r#"{"summary": "s"}"#,
            r#"{"summary": "s", "weeklyPlan": {"period": "p"}}"#,
            r#"[1, 2]"#,
        ] {
            assert!(
                matches!(parse_plan(reply), Err(ReplyError::InvalidStructure(_))),
                "{reply} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_plan() {
        let plan = parse_plan(&format!("```json\n{PLAN}\n```")).unwrap();

        assert_eq!(plan.summary, "Кратко");
        assert_eq!(plan.period_blocks[0].goals, ["A"]);
    }
}
