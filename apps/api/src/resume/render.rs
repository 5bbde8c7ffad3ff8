//! PDF rendering with printpdf's built-in Helvetica.
//!
//! Layout happens in two pure steps before any PDF object is created:
//! `layout_lines` flattens the content into wrapped, styled lines and
//! `place_lines` assigns each line a page and a baseline.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::resume::content::ResumeContent;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const BULLET_INDENT_MM: f32 = 5.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.35;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Name,
    Contact,
    Heading,
    Subheading,
    Body,
    Bullet,
    /// Wrapped continuation of a bullet.
    BulletCont,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            Self::Name => 18.0,
            Self::Heading => 12.0,
            Self::Subheading => 10.5,
            Self::Contact => 9.0,
            Self::Body | Self::Bullet | Self::BulletCont => 10.0,
        }
    }

    fn bold(self) -> bool {
        matches!(self, Self::Name | Self::Heading | Self::Subheading)
    }

    fn indent_mm(self) -> f32 {
        match self {
            Self::Bullet | Self::BulletCont => BULLET_INDENT_MM,
            _ => 0.0,
        }
    }

    /// Extra gap above the line, in mm.
    fn space_before(self) -> f32 {
        match self {
            Self::Heading => 5.0,
            Self::Subheading => 2.0,
            _ => 0.0,
        }
    }

    fn leading_mm(self) -> f32 {
        self.font_size() * PT_TO_MM * LINE_SPACING
    }

    fn max_chars(self) -> usize {
        let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - self.indent_mm();
        let glyph_mm = self.font_size() * PT_TO_MM * AVG_GLYPH_EM;
        (usable / glyph_mm).floor().max(10.0) as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub style: LineStyle,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub page: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub line: Line,
}

pub fn layout_lines(content: &ResumeContent) -> Vec<Line> {
    let mut out = Vec::new();
    push_wrapped(&mut out, LineStyle::Name, &content.name);
    if !content.contact.is_empty() {
        push_wrapped(&mut out, LineStyle::Contact, &content.contact.join("  |  "));
    }

    if let Some(summary) = &content.summary {
        push_heading(&mut out, "Professional Summary");
        push_wrapped(&mut out, LineStyle::Body, summary);
    }

    if !content.experience.is_empty() {
        push_heading(&mut out, "Experience");
        for job in &content.experience {
            let title = join_present(&[&job.title, &job.company], ", ");
            push_wrapped(&mut out, LineStyle::Subheading, &title);
            let meta = join_present(&[&job.location, &job.dates], "  |  ");
            if !meta.is_empty() {
                push_wrapped(&mut out, LineStyle::Body, &meta);
            }
            push_bullets(&mut out, &job.bullets);
        }
    }

    if !content.education.is_empty() {
        push_heading(&mut out, "Education");
        for school in &content.education {
            push_wrapped(&mut out, LineStyle::Subheading, &school.degree);
            let gpa = school.gpa.as_ref().map(|g| format!("GPA: {g}")).unwrap_or_default();
            let meta = join_present(&[&school.institution, &school.graduation_year, &gpa], "  |  ");
            if !meta.is_empty() {
                push_wrapped(&mut out, LineStyle::Body, &meta);
            }
            push_bullets(&mut out, &school.highlights);
        }
    }

    if !content.skills.is_empty() {
        push_heading(&mut out, "Skills");
        for group in &content.skills {
            push_wrapped(
                &mut out,
                LineStyle::Body,
                &format!("{}: {}", group.label, group.items.join(", ")),
            );
        }
    }

    if !content.projects.is_empty() {
        push_heading(&mut out, "Projects");
        for project in &content.projects {
            push_wrapped(&mut out, LineStyle::Subheading, &project.name);
            if !project.description.is_empty() {
                push_wrapped(&mut out, LineStyle::Body, &project.description);
            }
            if !project.technologies.is_empty() {
                push_wrapped(
                    &mut out,
                    LineStyle::Body,
                    &format!("Technologies: {}", project.technologies.join(", ")),
                );
            }
            if !project.links.is_empty() {
                push_wrapped(&mut out, LineStyle::Contact, &project.links.join("  |  "));
            }
            push_bullets(&mut out, &project.bullets);
        }
    }

    out
}

/// Assigns pages and baselines top-down, starting a new page whenever the
/// next line would cross the bottom margin.
pub fn place_lines(lines: Vec<Line>) -> Vec<PlacedLine> {
    let top = PAGE_HEIGHT_MM - MARGIN_MM;
    let mut page = 0;
    let mut y = top;
    let mut placed = Vec::with_capacity(lines.len());

    for line in lines {
        let mut next = y - line.style.space_before() - line.style.leading_mm();
        if next < MARGIN_MM {
            page += 1;
            next = top - line.style.leading_mm();
        }
        y = next;
        placed.push(PlacedLine {
            page,
            x_mm: MARGIN_MM + line.style.indent_mm(),
            y_mm: y,
            line,
        });
    }
    placed
}

/// Renders the whole document to PDF bytes. CPU-bound; call it off the async runtime.
pub fn render_pdf(content: &ResumeContent) -> Result<Vec<u8>, RenderError> {
    let placed = place_lines(layout_lines(content));

    let (doc, first_page, first_layer) = PdfDocument::new(
        sanitize_text(&content.name),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut current_page = 0;
    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for item in &placed {
        if item.page != current_page {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            current_page = item.page;
        }
        let font = if item.line.style.bold() { &bold } else { &regular };
        layer.use_text(
            sanitize_text(&item.line.text),
            item.line.style.font_size(),
            Mm(item.x_mm),
            Mm(item.y_mm),
            font,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Greedy word wrap. Words longer than `max_chars` are hard-split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(max_chars.max(1)) {
            let piece: String = chunk.iter().collect();
            let piece_len = chunk.len();
            if current_len > 0 && current_len + 1 + piece_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Built-in PDF fonts only cover a Latin-1 style charset; map the common
/// typographic characters and replace anything else.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2022}' => '-',
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}

fn push_heading(out: &mut Vec<Line>, title: &str) {
    out.push(Line {
        style: LineStyle::Heading,
        text: title.to_uppercase(),
    });
}

fn push_wrapped(out: &mut Vec<Line>, style: LineStyle, text: &str) {
    for piece in wrap_text(text, style.max_chars()) {
        out.push(Line { style, text: piece });
    }
}

fn push_bullets(out: &mut Vec<Line>, bullets: &[String]) {
    for bullet in bullets {
        // Two columns reserved for the "- " marker
        let pieces = wrap_text(bullet, LineStyle::Bullet.max_chars().saturating_sub(2));
        for (i, piece) in pieces.into_iter().enumerate() {
            if i == 0 {
                out.push(Line {
                    style: LineStyle::Bullet,
                    text: format!("- {piece}"),
                });
            } else {
                out.push(Line {
                    style: LineStyle::BulletCont,
                    text: format!("  {piece}"),
                });
            }
        }
    }
}

fn join_present(parts: &[&String], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceInput, ResumeRequest};
    use crate::resume::content::compose_resume;

    fn content_with_bullets(n: usize) -> ResumeContent {
        let achievements = (0..n)
            .map(|i| format!("Delivered feature number {i} to 1000 users"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut req = ResumeRequest::default();
        req.personal_info.full_name = "Jane Student".into();
        req.experience.push(ExperienceInput {
            job_title: "Intern".into(),
            company: "Acme".into(),
            achievements,
            ..Default::default()
        });
        compose_resume(&req)
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        let lines = wrap_text(&text, 30);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 30));
        assert_eq!(lines.join(" "), text.trim_end());
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap_text(&"x".repeat(25), 10);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_sanitize_maps_typography() {
        assert_eq!(sanitize_text("“Hi” – it’s • ok"), "\"Hi\" - it's - ok");
        assert_eq!(sanitize_text("Zoë"), "Zo?");
    }

    #[test]
    fn test_layout_orders_sections() {
        let lines = layout_lines(&content_with_bullets(2));
        assert_eq!(lines[0].style, LineStyle::Name);
        assert_eq!(lines[0].text, "Jane Student");
        assert!(lines.iter().any(|l| l.style == LineStyle::Heading && l.text == "EXPERIENCE"));
        assert_eq!(lines.iter().filter(|l| l.style == LineStyle::Bullet).count(), 2);
        assert!(lines.iter().all(|l| l.text.chars().count() <= l.style.max_chars()));
    }

    #[test]
    fn test_long_content_spills_onto_new_pages() {
        let placed = place_lines(layout_lines(&content_with_bullets(120)));
        let pages = placed.iter().map(|p| p.page).max().unwrap() + 1;
        assert!(pages >= 2);
        assert!(placed
            .iter()
            .all(|p| p.y_mm >= MARGIN_MM && p.y_mm <= PAGE_HEIGHT_MM - MARGIN_MM));
        // pages are monotonic
        assert!(placed.windows(2).all(|w| w[0].page <= w[1].page));
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_pdf(&content_with_bullets(80)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
