use std::fmt::Write;

use crate::browse::display::QuestionView;
use crate::catalog::Timeframe;

const RESET: &str = "\x1b[0m";
const BAR_CELLS: usize = 10;

pub fn result_summary(count: usize, term: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} result{} for \"{}\"", count, plural, term)
}

/// Company cards as text, one per line.
pub fn render_company_grid<T: AsRef<str>>(companies: &[&T], term: &str) -> String {
    let mut out = String::new();

    if !term.is_empty() {
        let _ = writeln!(out, "{}\n", result_summary(companies.len(), term));
    }

    if companies.is_empty() {
        out.push_str("No companies found\nTry adjusting your search terms\n");
        return out;
    }

    let width = companies
        .iter()
        .map(|c| c.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    for company in companies {
        let name = company.as_ref();
        let _ = writeln!(
            out,
            "{:<width$}  Practice problems curated for {}",
            name.to_uppercase(),
            name,
            width = width
        );
    }

    out
}

/// Header, counters and table for one company's sheet.
pub fn render_question_table(
    company: &str,
    timeframe: Timeframe,
    views: &[QuestionView<'_>],
    loading: bool,
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Questions ({})", company, timeframe.label());

    if loading {
        out.push_str("Loading questions...\n");
        return out;
    }

    let _ = writeln!(out, "{} questions available\n", views.len());

    if views.is_empty() {
        out.push_str("No questions found\nTry adjusting your search or filters\n");
        return out;
    }

    let title_width = views
        .iter()
        .map(|v| v.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Question Title".len());

    let _ = writeln!(
        out,
        "{:<tw$}  {:<10}  {:<10}  Frequency",
        "Question Title",
        "Difficulty",
        "Acceptance",
        tw = title_width
    );

    for view in views {
        let difficulty = paint(
            &format!("{:<10}", view.difficulty),
            view.class.ansi(),
            color,
        );
        let bar = paint(&view.bar.cells(BAR_CELLS), view.bar.tone.ansi(), color);

        let _ = writeln!(
            out,
            "{:<tw$}  {}  {:<10}  {} {}",
            view.title,
            difficulty,
            view.acceptance,
            bar,
            view.frequency_label,
            tw = title_width
        );
        if view.url != "#" {
            let _ = writeln!(out, "    {}", view.url);
        }
    }

    out
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}
