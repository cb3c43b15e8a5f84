//! Built-in plans shown when the user asks for an example instead of a generated plan.

use crate::{Checklist, ChecklistItem, Mode, PeriodBlock, Plan};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn block(period: &str, goals: &[&str], activities: &[&str], tips: &[&str]) -> PeriodBlock {
    PeriodBlock {
        period: period.to_owned(),
        goals: strings(goals),
        activities: strings(activities),
        tips: strings(tips),
    }
}

fn checklist(title: &str, items: &[&str]) -> Checklist {
    Checklist {
        title: title.to_owned(),
        items: items
            .iter()
            .map(|text| ChecklistItem {
                text: (*text).to_owned(),
                done: false,
            })
            .collect(),
    }
}

pub fn demo_plan(mode: Mode) -> Plan {
    match mode {
        Mode::Pregnancy => pregnancy(),
        Mode::Child => child(),
    }
}

fn pregnancy() -> Plan {
    Plan {
        summary: "Второй триместр: время второго скрининга, активного роста малыша и \
                  подготовки к родам."
            .to_owned(),
        period_blocks: vec![
            block(
                "Неделя 20",
                &["Пройти второй скрининг (УЗИ)", "Сдать общий анализ крови"],
                &["Прогулка 30 минут", "Дыхательная гимнастика"],
                &["Пейте 1,5–2 литра воды в день", "Спите на левом боку"],
            ),
            block(
                "Неделя 21",
                &["Начать курс для будущих родителей"],
                &["Йога для беременных", "Плавание"],
                &["Следите за прибавкой веса", "Носите удобную обувь"],
            ),
            block(
                "Неделя 22",
                &["Контроль давления и отёков"],
                &["Лёгкая растяжка", "Чтение о развитии малыша"],
                &["Ограничьте соль", "Поднимайте ноги во время отдыха"],
            ),
            block(
                "Неделя 23",
                &["Обсудить с врачом план родов"],
                &["Прогулка на свежем воздухе", "Упражнения Кегеля"],
                &["Отслеживайте шевеления малыша", "Включите в рацион железо"],
            ),
        ],
        checklists: vec![
            checklist(
                "Анализы и обследования",
                &["Второй скрининг", "Общий анализ крови", "Анализ мочи"],
            ),
            checklist(
                "Подготовка к родам",
                &["Выбрать роддом", "Собрать сумку в роддом", "Курсы для родителей"],
            ),
        ],
        warnings: strings(&[
            "Кровянистые выделения — срочно обратитесь к врачу",
            "Сильные головные боли и отёки — повод измерить давление и позвонить врачу",
        ]),
    }
}

fn child() -> Plan {
    Plan {
        summary: "Ребёнок 6 месяцев: введение прикорма, развитие моторики и первые попытки \
                  сидеть."
            .to_owned(),
        period_blocks: vec![
            block(
                "Месяц 6",
                &["Ввести первый прикорм (овощное пюре)", "Плановый осмотр педиатра"],
                &["Игры на животике", "Чтение книжек с картинками"],
                &["Вводите по одному продукту в 5–7 дней", "Следите за реакцией кожи"],
            ),
            block(
                "Месяц 7",
                &["Поддерживать попытки сидеть"],
                &["Игры с погремушками", "Пальчиковые игры"],
                &["Не усаживайте ребёнка насильно", "Уберите мелкие предметы"],
            ),
            block(
                "Месяц 8",
                &["Ввести кашу без молока"],
                &["Ползание за игрушкой", "Игра в прятки"],
                &["Обезопасьте розетки", "Предлагайте воду из чашки"],
            ),
            block(
                "Месяц 9",
                &["Развивать мелкую моторику"],
                &["Сортер и кубики", "Совместное пение"],
                &["Хвалите за новые навыки", "Соблюдайте режим сна"],
            ),
        ],
        checklists: vec![
            checklist(
                "Прикорм",
                &["Кабачок", "Брокколи", "Цветная капуста", "Гречневая каша"],
            ),
            checklist("Безопасность дома", &["Заглушки на розетки", "Ворота на лестницу"]),
        ],
        warnings: strings(&[
            "Высокая температура выше 38,5 °C — обратитесь к педиатру",
            "Сыпь или отёк после нового продукта — прекратите прикорм и проконсультируйтесь с врачом",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_plans_cover_four_periods() {
        for mode in [Mode::Pregnancy, Mode::Child] {
            let plan = demo_plan(mode);

            assert!(!plan.summary.is_empty());
            assert!(plan.period_blocks.len() >= 4);
            assert!(plan.period_blocks.iter().all(|b| !b.goals.is_empty()));
        }
    }
}
