//! Line classification for plain resume text.
//!
//! Resume text arrives without any markup, so the semantic role of every line
//! (name, contact details, section heading, bullet, ...) is inferred from its
//! content.  The rules live in a single ordered table, [`RULES`], and the first
//! rule that claims a line decides its category.  Only the job-title rule looks
//! beyond the current line, and only at the line directly after it.

use std::fmt;
use std::sync::OnceLock;

use log::trace;
use regex::Regex;

/// A single input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    index: usize,
    content: String,
    blank: bool,
}

impl Line {
    /// Creates a line from its raw text, trimming surrounding whitespace.
    pub fn new(index: usize, raw: &str) -> Self {
        let content = raw.trim();
        Self {
            index,
            content: content.to_owned(),
            blank: content.is_empty(),
        }
    }

    /// Zero-based position of the line in the original text.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Trimmed content of the line.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the line was empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.blank
    }
}

/// Splits `text` on line boundaries (`\n` or `\r\n`).
///
/// A trailing newline does not produce an extra blank line.
pub fn split_lines(text: &str) -> Vec<Line> {
    text.lines()
        .enumerate()
        .map(|(index, raw)| Line::new(index, raw))
        .collect()
}

/// Semantic role assigned to a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineCategory {
    /// Candidate's name, only ever the first line.
    Name,
    /// Email, phone or location details.
    Contact,
    /// Heading that opens a resume section.
    SectionHeading,
    /// List item.
    Bullet,
    /// Position title directly followed by an employer line.
    JobTitle,
    /// Employer line.
    Company,
    /// Date or date range.
    Date,
    /// Empty line.
    Blank,
    /// Anything else.
    Paragraph,
}

impl LineCategory {
    /// Every category, in rule precedence order.
    pub const ALL: [LineCategory; 9] = [
        LineCategory::Blank,
        LineCategory::Name,
        LineCategory::Contact,
        LineCategory::SectionHeading,
        LineCategory::Bullet,
        LineCategory::JobTitle,
        LineCategory::Company,
        LineCategory::Date,
        LineCategory::Paragraph,
    ];

    /// Short lowercase label used in logs and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Contact => "contact",
            Self::SectionHeading => "section-heading",
            Self::Bullet => "bullet",
            Self::JobTitle => "job-title",
            Self::Company => "company",
            Self::Date => "date",
            Self::Blank => "blank",
            Self::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A line together with its category and the text that should be displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedLine {
    line: Line,
    category: LineCategory,
    text: String,
}

impl ClassifiedLine {
    /// The classified input line.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Category assigned by the rule table.
    pub fn category(&self) -> LineCategory {
        self.category
    }

    /// Display text after normalisation (upper-cased headings, canonical bullets).
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The line being classified plus the line that immediately follows it.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    /// Line under classification.
    pub current: &'a Line,
    /// The following line, if any.
    pub next: Option<&'a Line>,
}

/// A named entry of the rule table.
///
/// `apply` returns `Some(category)` when the rule claims the line.  A rule may
/// claim a line and still resolve it to a category other than its own, which
/// is how the job-title rule falls back to [`LineCategory::Paragraph`].
pub struct Rule {
    /// Category the rule is named after.
    pub category: LineCategory,
    /// Predicate evaluated over the classification window.
    pub apply: fn(&Window<'_>) -> Option<LineCategory>,
}

/// Classification rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        category: LineCategory::Blank,
        apply: blank_rule,
    },
    Rule {
        category: LineCategory::Name,
        apply: name_rule,
    },
    Rule {
        category: LineCategory::Contact,
        apply: contact_rule,
    },
    Rule {
        category: LineCategory::SectionHeading,
        apply: section_heading_rule,
    },
    Rule {
        category: LineCategory::Bullet,
        apply: bullet_rule,
    },
    Rule {
        category: LineCategory::JobTitle,
        apply: job_title_rule,
    },
    Rule {
        category: LineCategory::Company,
        apply: company_rule,
    },
    Rule {
        category: LineCategory::Date,
        apply: date_rule,
    },
];

const NAME_MAX_CHARS: usize = 50;
const MAX_SHORT_TOKENS: usize = 4;

const CONTACT_KEYWORDS: &[&str] = &["email", "phone", "address", "location"];

const SECTION_KEYWORDS: &[&str] = &[
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "PROJECTS",
    "SUMMARY",
    "OBJECTIVE",
    "ACHIEVEMENTS",
    "CERTIFICATIONS",
    "LANGUAGES",
];

const BULLET_GLYPHS: &[char] = &['•', '-', '*', '◦', '·'];

/// Canonical prefix of normalised bullet lines.
pub const BULLET_PREFIX: &str = "• ";

const JOB_TITLE_EXCLUDED: &[char] = &['@', '+', '|', '•', '-', '*'];

const EMPLOYER_HINTS: &[&str] = &["|", "at", "Company", "Inc", "LLC", "Corp"];

const COMPANY_KEYWORDS: &[&str] = &["at", "Company", "Inc", "LLC", "Corp", "Ltd"];

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn blank_rule(window: &Window<'_>) -> Option<LineCategory> {
    window.current.is_blank().then_some(LineCategory::Blank)
}

fn name_rule(window: &Window<'_>) -> Option<LineCategory> {
    let content = window.current.content();
    let matches = window.current.index() == 0
        && is_upper_case(content)
        && content.chars().count() < NAME_MAX_CHARS
        && token_count(content) <= MAX_SHORT_TOKENS;
    matches.then_some(LineCategory::Name)
}

fn contact_rule(window: &Window<'_>) -> Option<LineCategory> {
    let content = window.current.content();
    let lower = content.to_lowercase();
    let matches = content.contains('@')
        || content.contains('+')
        || CONTACT_KEYWORDS.iter().any(|keyword| lower.contains(keyword));
    matches.then_some(LineCategory::Contact)
}

fn section_heading_rule(window: &Window<'_>) -> Option<LineCategory> {
    let upper = window.current.content().to_uppercase();
    SECTION_KEYWORDS
        .iter()
        .any(|keyword| upper.contains(keyword))
        .then_some(LineCategory::SectionHeading)
}

fn bullet_rule(window: &Window<'_>) -> Option<LineCategory> {
    window
        .current
        .content()
        .starts_with(BULLET_GLYPHS)
        .then_some(LineCategory::Bullet)
}

fn job_title_rule(window: &Window<'_>) -> Option<LineCategory> {
    let content = window.current.content();
    if token_count(content) > MAX_SHORT_TOKENS || content.contains(JOB_TITLE_EXCLUDED) {
        return None;
    }

    let employer_follows = window.next.is_some_and(|next| {
        EMPLOYER_HINTS
            .iter()
            .any(|hint| next.content().contains(hint))
    });

    Some(if employer_follows {
        LineCategory::JobTitle
    } else {
        LineCategory::Paragraph
    })
}

fn company_rule(window: &Window<'_>) -> Option<LineCategory> {
    let content = window.current.content();
    let matches =
        content.contains('|') || COMPANY_KEYWORDS.iter().any(|keyword| content.contains(keyword));
    matches.then_some(LineCategory::Company)
}

fn date_rule(window: &Window<'_>) -> Option<LineCategory> {
    static YEAR_RE: OnceLock<Regex> = OnceLock::new();
    let year_re = YEAR_RE.get_or_init(|| {
        // 1900-2099 as a standalone four-digit number
        Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern is valid")
    });

    let content = window.current.content();
    let lower = content.to_lowercase();
    let matches = year_re.is_match(content) || MONTHS.iter().any(|month| lower.contains(month));
    matches.then_some(LineCategory::Date)
}

/// Mirrors "is upper case" for mixed scripts: at least one cased character and
/// no lower-case ones.
fn is_upper_case(text: &str) -> bool {
    let mut cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            cased = true;
        }
    }
    cased
}

fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Runs the rule table over a single window.
pub fn classify_window(window: &Window<'_>) -> LineCategory {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(window))
        .unwrap_or(LineCategory::Paragraph)
}

fn display_text(line: &Line, category: LineCategory) -> String {
    match category {
        LineCategory::SectionHeading => line.content().to_uppercase(),
        LineCategory::Bullet => {
            let rest = line
                .content()
                .strip_prefix(BULLET_GLYPHS)
                .unwrap_or(line.content())
                .trim_start();
            format!("{BULLET_PREFIX}{rest}")
        }
        _ => line.content().to_owned(),
    }
}

/// Classifies every line, preserving order.
pub fn classify(lines: &[Line]) -> Vec<ClassifiedLine> {
    lines
        .iter()
        .enumerate()
        .map(|(position, line)| {
            let window = Window {
                current: line,
                next: lines.get(position + 1),
            };
            let category = classify_window(&window);
            trace!("line {} -> {}", line.index(), category);
            ClassifiedLine {
                text: display_text(line, category),
                line: line.clone(),
                category,
            }
        })
        .collect()
}

/// Convenience wrapper that splits and classifies `text`.
pub fn classify_text(text: &str) -> Vec<ClassifiedLine> {
    classify(&split_lines(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(text: &str) -> Vec<LineCategory> {
        classify_text(text)
            .iter()
            .map(ClassifiedLine::category)
            .collect()
    }

    fn single(text: &str) -> ClassifiedLine {
        // Prefix a blank line so the name rule never applies.
        let mut lines = classify_text(&format!("\n{text}"));
        lines.remove(1)
    }

    #[test]
    fn rule_table_follows_precedence_order() {
        let order: Vec<_> = RULES.iter().map(|rule| rule.category).collect();
        assert_eq!(order, &LineCategory::ALL[..8]);
    }

    #[test]
    fn split_lines_handles_crlf_and_trailing_newline() {
        let lines = split_lines("A\r\n  b  \n\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].content(), "b");
        assert!(lines[2].is_blank());
        assert_eq!(lines[2].index(), 2);
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert_eq!(categories(" \t "), vec![LineCategory::Blank]);
    }

    #[test]
    fn upper_case_first_line_is_name() {
        assert_eq!(categories("JOHN SMITH"), vec![LineCategory::Name]);
    }

    #[test]
    fn name_only_applies_to_first_line() {
        let result = categories("\nJOHN SMITH");
        assert_eq!(result[1], LineCategory::Paragraph);
    }

    #[test]
    fn name_rejects_long_or_wordy_lines() {
        assert_ne!(categories("JOHN JACOB JINGLEHEIMER SCHMIDT JR")[0], LineCategory::Name);
        let long = "A".repeat(NAME_MAX_CHARS);
        assert_ne!(categories(&long)[0], LineCategory::Name);
        assert_ne!(categories("John Smith")[0], LineCategory::Name);
    }

    #[test]
    fn name_requires_a_cased_character() {
        assert_ne!(categories("2024")[0], LineCategory::Name);
    }

    #[test]
    fn email_line_is_contact() {
        let line = single("john@example.com | +1-555-0100");
        assert_eq!(line.category(), LineCategory::Contact);
        assert_eq!(line.text(), "john@example.com | +1-555-0100");
    }

    #[test]
    fn contact_keywords_are_case_insensitive() {
        assert_eq!(single("Phone: 555 0100").category(), LineCategory::Contact);
        assert_eq!(single("LOCATION Berlin").category(), LineCategory::Contact);
    }

    #[test]
    fn name_is_tried_before_contact() {
        // Name is tried first, so an all-caps first line wins even with '@'.
        assert_eq!(categories("JOHN@EXAMPLE.COM")[0], LineCategory::Name);
        assert_eq!(categories("john@example.com")[0], LineCategory::Contact);
    }

    #[test]
    fn section_heading_is_upper_cased() {
        let line = single("Professional Experience");
        assert_eq!(line.category(), LineCategory::SectionHeading);
        assert_eq!(line.text(), "PROFESSIONAL EXPERIENCE");

        let line = single("EXPERIENCE");
        assert_eq!(line.category(), LineCategory::SectionHeading);
        assert_eq!(line.text(), "EXPERIENCE");
    }

    #[test]
    fn bullets_are_normalised() {
        let line = single("- Led team of 5 engineers");
        assert_eq!(line.category(), LineCategory::Bullet);
        assert_eq!(line.text(), "• Led team of 5 engineers");

        for raw in ["•Shipped v2", "* Shipped v2", "◦   Shipped v2", "· Shipped v2"] {
            let line = single(raw);
            assert_eq!(line.category(), LineCategory::Bullet, "{raw}");
            assert_eq!(line.text(), "• Shipped v2", "{raw}");
        }
    }

    #[test]
    fn job_title_uses_next_line_lookahead() {
        let result = categories("\nSenior Engineer\nAcme Corp | 2019-2022");
        assert_eq!(result[1], LineCategory::JobTitle);
        assert_eq!(result[2], LineCategory::Company);
    }

    #[test]
    fn job_title_without_employer_falls_back_to_paragraph() {
        let result = categories("\nSenior Engineer\nBuilt things for customers");
        assert_eq!(result[1], LineCategory::Paragraph);
    }

    #[test]
    fn job_title_shape_claims_line_even_when_company_words_present() {
        // Short line containing "Corp" followed by a plain line: the job-title
        // rule claims it and resolves to paragraph, company is never tried.
        let result = categories("\nGlobex Corp\nShipped things");
        assert_eq!(result[1], LineCategory::Paragraph);
    }

    #[test]
    fn last_line_cannot_be_job_title() {
        let result = categories("\nSenior Engineer");
        assert_eq!(result[1], LineCategory::Paragraph);
    }

    #[test]
    fn blank_next_line_fails_lookahead() {
        let result = categories("\nSenior Engineer\n\nAcme Corp");
        assert_eq!(result[1], LineCategory::Paragraph);
    }

    #[test]
    fn lookahead_is_case_sensitive_substring() {
        // "at" inside "Data" satisfies the employer hint.
        let result = categories("\nAnalyst\nData Platform Team");
        assert_eq!(result[1], LineCategory::JobTitle);
    }

    #[test]
    fn lookahead_never_reads_previous_line() {
        let result = categories("\nAcme Corp\nSenior Engineer\nShipped things");
        assert_eq!(result[2], LineCategory::Paragraph);
    }

    #[test]
    fn company_wins_over_date_when_both_match() {
        let line = single("Worked at Initech from 2015 to 2019 in Austin");
        assert_eq!(line.category(), LineCategory::Company);
    }

    #[test]
    fn month_abbreviation_is_date() {
        assert_eq!(single("March 2020 - Present").category(), LineCategory::Date);
    }

    #[test]
    fn year_range_is_date() {
        assert_eq!(
            single("2019 - 2022 remote contract work").category(),
            LineCategory::Date
        );
        assert_ne!(
            single("Reduced costs by 12345 dollars overall").category(),
            LineCategory::Date
        );
    }

    #[test]
    fn unmatched_lines_are_paragraphs() {
        let line = single("Built a distributed build cache used by every team.");
        assert_eq!(line.category(), LineCategory::Paragraph);
    }

    #[test]
    fn section_keyword_beats_bullet_glyph() {
        assert_eq!(
            single("- Python and Rust skills").category(),
            LineCategory::SectionHeading
        );
    }

    #[test]
    fn contact_keyword_beats_section_keyword() {
        assert_eq!(
            single("Email me about projects").category(),
            LineCategory::Contact
        );
    }

    #[test]
    fn upper_case_heading_on_first_line_is_name() {
        assert_eq!(
            categories("EXPERIENCE
Staff Engineer"),
            vec![LineCategory::Name, LineCategory::Paragraph]
        );
    }

    #[test]
    fn pipe_skips_job_title_and_lands_on_company() {
        for next in ["Acme Corp", "Shipped things", ""] {
            let text = format!("\nLead | Platform\n{next}");
            assert_eq!(
                categories(&text)[1],
                LineCategory::Company,
                "followed by {next:?}"
            );
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "JANE DOE\njane@example.com\n\nSKILLS\n- Rust\nStaff Engineer\nInitech LLC\nJan 2020";
        assert_eq!(classify_text(text), classify_text(text));
    }

    #[test]
    fn every_line_is_classified_in_order() {
        let text = "JANE DOE\n\nSummary\nLine one\n\n- bullet";
        let classified = classify_text(text);
        assert_eq!(classified.len(), 6);
        for (position, line) in classified.iter().enumerate() {
            assert_eq!(line.line().index(), position);
        }
    }
}
