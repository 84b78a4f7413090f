use std::fmt::Write;

use colored::{ColoredString, Colorize};
use intervu_domain::{
    BestQna, CompanyReviews, EvaluationReport, InterviewRecord, Message, Page, Profile, Role,
    ScoreBand, SearchResult, StudyCategory, StudyContent,
};

fn band(score: f64) -> ColoredString {
    let text = format!("{score:.0}");
    match ScoreBand::of(score) {
        ScoreBand::Excellent => text.green().bold(),
        ScoreBand::Good => text.cyan().bold(),
        ScoreBand::Fair => text.yellow().bold(),
        ScoreBand::Poor => text.red().bold(),
    }
}

pub fn message(message: &Message) -> String {
    match message.role {
        Role::Assistant => format!("{} {}", "Interviewer:".cyan().bold(), message.content),
        Role::User => format!("{} {}", "You:".bold(), message.content),
        Role::Error => format!("{}", message.content.red()),
    }
}

pub fn profile(profile: &Profile) -> String {
    format!(
        "{}\n  username: {}\n  role:     {}",
        profile.nickname.bold(),
        profile.username,
        profile.role.dimmed()
    )
}

pub fn report(report: &EvaluationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Overall score:".bold(), band(report.overall_score));
    if !report.overall_feedback.is_empty() {
        let _ = writeln!(out, "{}", report.overall_feedback);
    }

    for turn in &report.turn_evaluations {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", format!("Turn {}", turn.turn).bold(), band(turn.score));
        if let Some(question) = &turn.question {
            let _ = writeln!(out, "  {} {}", "Q.".cyan(), question);
        }
        let _ = writeln!(out, "  {}", turn.feedback);
    }

    out.push_str(&keywords(&report.improvement_keywords));
    out
}

fn keywords(keywords: &[String]) -> String {
    if keywords.is_empty() {
        return String::new();
    }
    let list = keywords
        .iter()
        .map(|k| format!("#{k}").yellow().to_string())
        .collect::<Vec<_>>()
        .join("  ");
    format!("\n{}\n  {list}\n  {}\n", "Keywords to study:".bold(), "(intervu keyword <name>)".dimmed())
}

pub fn records(records: &[InterviewRecord]) -> String {
    if records.is_empty() {
        return "No interview records yet.".dimmed().to_string();
    }
    let mut out = String::new();
    for record in records {
        let score = record
            .overall_score
            .map(|s| band(s).to_string())
            .unwrap_or_else(|| "-".dimmed().to_string());
        let _ = writeln!(
            out,
            "{:>5}  {:<12} {:>4}  {}",
            record.id,
            record.interview_type,
            score,
            record.created_at.as_deref().unwrap_or_default().dimmed()
        );
    }
    out
}

pub fn record(record: &InterviewRecord) -> String {
    let transcript = record.transcript();
    let mut out = String::new();
    let _ = writeln!(out, "{} #{} ({})", "Interview".bold(), record.id, record.interview_type);
    if let Some(score) = record.overall_score {
        let _ = writeln!(out, "{} {}", "Overall score:".bold(), band(score));
    }
    if let Some(feedback) = &record.overall_feedback {
        let _ = writeln!(out, "{feedback}");
    }

    for turn in record.turns(&transcript) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}",
            format!("Turn {}", turn.evaluation.turn).bold(),
            band(turn.evaluation.score)
        );
        if let Some(question) = turn.question {
            let _ = writeln!(out, "  {}", message(question));
        }
        if let Some(answer) = turn.answer {
            let _ = writeln!(out, "  {}", message(answer));
        }
        let _ = writeln!(out, "  {}", turn.evaluation.feedback.italic());
    }

    out.push_str(&keywords(&record.keywords()));
    out
}

pub fn categories(categories: &[StudyCategory]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{}", category.first_category.bold());
        for second in &category.second_category {
            let _ = writeln!(out, "  - {second}");
        }
    }
    out
}

pub fn contents(contents: &[StudyContent]) -> String {
    if contents.is_empty() {
        return "No topics in this category.".dimmed().to_string();
    }
    contents
        .iter()
        .map(|content| format!("  - {}", content.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn best_answers(page: &Page<BestQna>) -> String {
    let mut out = String::new();
    for item in &page.items {
        let _ = writeln!(out, "{} {}", format!("[{}]", item.category).dimmed(), item.question.bold());
        let _ = writeln!(out, "  {}", item.answer);
        let _ = writeln!(out);
    }
    let _ = write!(out, "{}", format!("page {}/{}", page.number, page.total_pages.max(1)).dimmed());
    out
}

pub fn reviews(reviews: &CompanyReviews) -> String {
    let mut out = String::new();
    let questions = reviews.reviews.iter().flat_map(|review| &review.questions);
    for (idx, question) in questions.enumerate() {
        let _ = writeln!(out, "{} {}", format!("{}.", idx + 1).bold(), question.display_question());
        if let Some(answer) = &question.answer {
            let _ = writeln!(out, "   {answer}");
        }
        for pair in question.qna_pairs.iter().flatten() {
            let _ = writeln!(out, "   {} {}", "Q.".cyan(), pair.question);
            let _ = writeln!(out, "   {} {}", "A.".green(), pair.answer);
        }
    }
    if out.is_empty() {
        return "No reviews for this company yet.".dimmed().to_string();
    }
    out
}

pub fn search_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "Nothing found.".dimmed().to_string();
    }
    let mut out = String::new();
    for result in results {
        let _ = writeln!(out, "{}", result.title.bold());
        let _ = writeln!(out, "  {}", result.link.underline());
        if !result.snippet.is_empty() {
            let _ = writeln!(out, "  {}", result.snippet);
        }
        if let Some(thumbnail) = result.thumbnail() {
            let _ = writeln!(out, "  {}", thumbnail.dimmed());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use intervu_domain::TurnEvaluation;
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_report_lists_turns_and_keywords() {
        plain();
        let fixture = EvaluationReport {
            overall_score: 64.4,
            overall_feedback: "Good depth".to_string(),
            improvement_keywords: vec!["paging".to_string()],
            turn_evaluations: vec![TurnEvaluation {
                turn: 1,
                question: Some("What is a process?".to_string()),
                score: 70.0,
                feedback: "Clear".to_string(),
            }],
        };

        let actual = report(&fixture);

        let expected = "Overall score: 64\nGood depth\n\nTurn 1 70\n  Q. What is a process?\n  Clear\n\nKeywords to study:\n  #paging\n  (intervu keyword <name>)\n";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_error_message_is_shown_verbatim() {
        plain();
        let actual = message(&Message::error("Failed to send"));

        assert_eq!(actual, "Failed to send");
    }

    #[test]
    fn test_empty_records() {
        plain();
        assert_eq!(records(&[]), "No interview records yet.");
    }
}
