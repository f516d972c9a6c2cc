//! Locale and question-type keyed prompt catalogue.
//!
//! Each supported (locale, question type) pair has a system turn, a
//! user-prompt template, and a worked example. The example output uses
//! the same key names the response parser validates against, so the
//! model is shown the exact shape it must return.

use llm_client::Turn;

use crate::error::{QuizError, Result};
use crate::locale::Locale;
use crate::question::QuestionType;

const SYSTEM_EN: &str = "You are a helpful assistant to a teacher, who creates \
                         test questions for students in json format.";

const SYSTEM_HU: &str = "Segítőkész asszisztens vagy egy tanárnak, aki \
                         tesztkérdéseket készít a diákok számára json formátumban.";

const TEMPLATE_EN: &str = "\nCreate a {} question based on the context.\n\
                           Example:\n<context>{}</context>\n<output>{}</output>\n\
                           Task:\n<context>{}</context>\n";

const TEMPLATE_HU: &str = "\nÍrj egy {} kérdést a kontextus alapján.\n\
                           Példa:\n<context>{}</context>\n<output>{}</output>\n\
                           Feladat:\n<context>{}</context>\n";

const EXAMPLE_CONTEXT_EN: &str = "\nThe Nobel Prize in Literature (here meaning for literature; Swedish: Nobelpriset i litteratur) is a Swedish literature prize that is awarded annually, since 1901, to an author from any country who has, in the words of the will of Swedish industrialist Alfred Nobel, \"in the field of literature, produced the most outstanding work in an idealistic direction\"\n";

const EXAMPLE_CONTEXT_HU: &str = "Nobel-díjat a svéd kémikus és feltaláló Alfred Nobel alapította. Nobel 1895 november 27-én kelt végrendeletében rendelkezett úgy, hogy vagyonának kamataiból évről évre részesedjenek a fizika, kémia, fiziológia és orvostudomány, továbbá az irodalom legjobbjai és az a személy, aki a békéért tett erőfeszítéseivel a díjat kiérdemli.";

const BOOLEAN_EXAMPLE_EN: &str = r#"
{
    "question":"The Nobel Prize in Literature is awarded annually to authors only from Sweden.",
    "solution":false
}"#;

const SINGLE_EXAMPLE_EN: &str = r#"
{
    "question": "Which of the following statements are true about the Nobel Prize in Literature?",
    "answers": [
        "It is awarded to an author from Sweden.",
        "It is awarded to an author from any country for producing outstanding work in an idealistic direction.",
        "It is awarded to the best-selling author of the year.",
        "It is awarded to an author for writing about Swedish history."
    ],
    "solution": "B"
}"#;

const MULTI_EXAMPLE_EN: &str = r#"
{
    "question": "Which of the following statements are true about the Nobel Prize in Literature?",
    "answers": [
        "It is awarded annually.",
        "It is only awarded to Swedish authors.",
        "It has been awarded since 1901.",
        "It is given for outstanding work in the field of literature."
    ],
    "solution": ["A", "C", "D"]
}"#;

const BOOLEAN_EXAMPLE_HU: &str = r#"
{
    "question":"Nobel-díjat csak a svéd kémikusok és feltalálók kaphatnak meg.",
    "solution":false
}"#;

const SINGLE_EXAMPLE_HU: &str = r#"
{
    "question": "Mi volt Alfred Nobel végrendeletének célja a Nobel-díjjal kapcsolatban?",
    "answers": [
        "Csak svéd tudósoknak adják át.",
        "A fizika, kémia, fiziológia, orvostudomány, irodalom legjobbjait és a békéért küzdő személyt jutalmazzák.",
        "Csak irodalmi teljesítményért ítélik oda.",
        "A legújabb találmányokat jutalmazzák."
    ],
    "solution": "B"
}"#;

const MULTI_EXAMPLE_HU: &str = r#"
{
    "question": "Mely állítások igazak a Nobel-díjjal kapcsolatban?",
    "answers": [
        "Alfred Nobel alapította a díjat.",
        "A díjat csak fizikai teljesítményért ítélik oda.",
        "A végrendeletében rendelkezett a díj alapításáról.",
        "A békéért tett erőfeszítéseket is jutalmazzák."
    ],
    "solution": ["A", "C", "D"]
}"#;

/// One entry of the prompt catalogue.
struct PromptCell {
    locale: Locale,
    question_type: QuestionType,
    system: &'static str,
    template: &'static str,
    /// Human-readable name of the question shape, in the cell's language.
    shape: &'static str,
    example_context: &'static str,
    example_output: &'static str,
}

const PROMPTS: &[PromptCell] = &[
    PromptCell {
        locale: Locale::En,
        question_type: QuestionType::TrueOrFalse,
        system: SYSTEM_EN,
        template: TEMPLATE_EN,
        shape: "boolean",
        example_context: EXAMPLE_CONTEXT_EN,
        example_output: BOOLEAN_EXAMPLE_EN,
    },
    PromptCell {
        locale: Locale::En,
        question_type: QuestionType::SingleChoice,
        system: SYSTEM_EN,
        template: TEMPLATE_EN,
        shape: "multiple choice single answer (4 options)",
        example_context: EXAMPLE_CONTEXT_EN,
        example_output: SINGLE_EXAMPLE_EN,
    },
    PromptCell {
        locale: Locale::En,
        question_type: QuestionType::MultipleChoice,
        system: SYSTEM_EN,
        template: TEMPLATE_EN,
        shape: "multiple choice multiple answers (4 options)",
        example_context: EXAMPLE_CONTEXT_EN,
        example_output: MULTI_EXAMPLE_EN,
    },
    PromptCell {
        locale: Locale::Hu,
        question_type: QuestionType::TrueOrFalse,
        system: SYSTEM_HU,
        template: TEMPLATE_HU,
        shape: "igaz/hamis",
        example_context: EXAMPLE_CONTEXT_HU,
        example_output: BOOLEAN_EXAMPLE_HU,
    },
    PromptCell {
        locale: Locale::Hu,
        question_type: QuestionType::SingleChoice,
        system: SYSTEM_HU,
        template: TEMPLATE_HU,
        shape: "egy válaszlehetőséges (4 opciós)",
        example_context: EXAMPLE_CONTEXT_HU,
        example_output: SINGLE_EXAMPLE_HU,
    },
    PromptCell {
        locale: Locale::Hu,
        question_type: QuestionType::MultipleChoice,
        system: SYSTEM_HU,
        template: TEMPLATE_HU,
        shape: "több válaszlehetőséges (4 opciós)",
        example_context: EXAMPLE_CONTEXT_HU,
        example_output: MULTI_EXAMPLE_HU,
    },
];

/// Substitute the template's `{}` slots in order.
fn fill(template: &str, values: [&str; 4]) -> String {
    let extra: usize = values.iter().map(|v| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    for value in values {
        match rest.split_once("{}") {
            Some((head, tail)) => {
                out.push_str(head);
                out.push_str(value);
                rest = tail;
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Build the two-turn conversation asking for a question over `context`.
///
/// Returns [`QuizError::UnsupportedLocale`] when the catalogue has no
/// entry for the requested locale.
pub fn format(
    context: &str,
    question_type: QuestionType,
    locale: Locale,
) -> Result<Vec<Turn>> {
    let cell = PROMPTS
        .iter()
        .find(|c| c.locale == locale && c.question_type == question_type)
        .ok_or_else(|| QuizError::UnsupportedLocale(locale.to_string()))?;

    let prompt = fill(
        cell.template,
        [cell.shape, cell.example_context, cell.example_output, context],
    );

    Ok(vec![Turn::system(cell.system), Turn::user(prompt)])
}
