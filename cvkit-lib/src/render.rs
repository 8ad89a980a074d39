use crate::html::{escape_attr, escape_text, present, url_attr};
use crate::loader::parse_profile;
use crate::style::{Layout, Style};
use crate::types::*;
use crate::variant::Variant;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Embedded verbatim as `<meta name="generated">`. Rendering is
    /// byte-for-byte deterministic when this is `None`.
    pub generated_at: Option<String>,
}

impl RenderOptions {
    pub fn stamped(generated_at: impl Into<String>) -> Self {
        RenderOptions {
            generated_at: Some(generated_at.into()),
        }
    }
}

/// Renders a profile into a standalone HTML document.
pub fn render(profile: &Profile, variant: Variant, options: &RenderOptions) -> String {
    let style = Style::resolve(variant, &profile.meta);
    render_with_style(profile, variant, &style, options)
}

pub fn render_with_style(profile: &Profile, variant: Variant, style: &Style, options: &RenderOptions) -> String {
    tracing::debug!(
        variant = %variant,
        layout = %style.layout,
        accent = style.accent.color(),
        summary = %profile.summary(),
        "rendering profile"
    );

    let sections = Sections::build(profile);

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if let Some(stamp) = &options.generated_at {
        html.push_str(&format!("<meta name=\"generated\" content=\"{}\">\n", escape_attr(stamp)));
    }
    let title = match present(&profile.profile.name) {
        Some(name) => format!("{} - 简历", escape_text(name)),
        None => "简历".to_string(),
    };
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str("<style>\n");
    html.push_str(&stylesheet(style));
    html.push_str("</style>\n</head>\n");
    html.push_str(&format!(
        "<body class=\"layout-{} theme-{} font-{}\" data-variant=\"{}\">\n",
        style.layout,
        style.accent.name(),
        style.font.as_str(),
        variant
    ));
    html.push_str("<main class=\"page\">\n");
    html.push_str(&layout_body(style.layout, &sections));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Renders in memory, then writes the document to `path`.
pub fn render_to_file(
    profile: &Profile,
    variant: Variant,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<(), CvError> {
    let path = path.as_ref();
    let html = render(profile, variant, options);
    fs::write(path, html.as_bytes()).map_err(|e| CvError::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = html.len(), variant = %variant, "résumé written");
    Ok(())
}

/// Parses `json_str` and renders it to `path`. On a parse failure the
/// target file is never created or touched.
pub fn render_json_to_file(
    json_str: &str,
    variant: Variant,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<Profile, CvError> {
    let profile = parse_profile(json_str)?;
    render_to_file(&profile, variant, options, path)?;
    Ok(profile)
}

/// Pre-rendered regions. `None` means the region has no content and must
/// not appear in the output at all.
struct Sections {
    masthead: Option<String>,
    contact: Option<String>,
    education: Option<String>,
    experience: Option<String>,
    portfolio: Option<String>,
    skills: Option<String>,
    awards: Option<String>,
}

impl Sections {
    fn build(profile: &Profile) -> Sections {
        Sections {
            masthead: masthead(&profile.profile),
            contact: contact_list(&profile.profile),
            education: education_section(&profile.education),
            experience: experience_section(&profile.experience),
            portfolio: portfolio_section(&profile.portfolio),
            skills: skills_section(&profile.skills),
            awards: awards_section(&profile.awards),
        }
    }

    fn header(&self, class: &str) -> Option<String> {
        if self.masthead.is_none() && self.contact.is_none() {
            return None;
        }
        let mut out = format!("<header class=\"{}\">\n", class);
        push_opt(&mut out, &self.masthead);
        push_opt(&mut out, &self.contact);
        out.push_str("</header>\n");
        Some(out)
    }
}

fn layout_body(layout: Layout, s: &Sections) -> String {
    let mut body = String::new();
    match layout {
        Layout::Modern => {
            push_opt(&mut body, &s.header("masthead band"));
            push_content(&mut body, [&s.education, &s.experience, &s.portfolio, &s.skills, &s.awards]);
        }
        Layout::Classic => {
            push_opt(&mut body, &s.header("masthead centered"));
            push_content(&mut body, [&s.education, &s.experience, &s.portfolio, &s.skills, &s.awards]);
        }
        Layout::Agency => {
            let sidebar: String = [&s.masthead, &s.contact, &s.skills, &s.awards]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect();
            let main: String = [&s.experience, &s.education, &s.portfolio]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect();

            body.push_str("<div class=\"columns\">\n");
            if !sidebar.is_empty() {
                body.push_str("<aside class=\"sidebar\">\n");
                body.push_str(&sidebar);
                body.push_str("</aside>\n");
            }
            if !main.is_empty() {
                body.push_str("<div class=\"content\">\n");
                body.push_str(&main);
                body.push_str("</div>\n");
            }
            body.push_str("</div>\n");
        }
        Layout::Visual => {
            push_opt(&mut body, &s.header("hero"));
            push_content(&mut body, [&s.portfolio, &s.experience, &s.education, &s.skills, &s.awards]);
        }
    }
    body
}

fn push_opt(out: &mut String, fragment: &Option<String>) {
    if let Some(fragment) = fragment {
        out.push_str(fragment);
    }
}

fn push_content<'a>(out: &mut String, sections: impl IntoIterator<Item = &'a Option<String>>) {
    let inner: String = sections.into_iter().flatten().map(String::as_str).collect();
    if inner.is_empty() {
        return;
    }
    out.push_str("<div class=\"content\">\n");
    out.push_str(&inner);
    out.push_str("</div>\n");
}

fn section(id: &str, title: &str, inner: &str) -> String {
    format!(
        "<section class=\"section\" id=\"{}\">\n<h2 class=\"section-title\">{}</h2>\n{}</section>\n",
        id, title, inner
    )
}

fn masthead(contact: &Contact) -> Option<String> {
    let name = present(&contact.name);
    let title = present(&contact.title);
    let avatar = present(&contact.avatar_url).and_then(url_attr);
    if name.is_none() && title.is_none() && avatar.is_none() {
        return None;
    }

    let mut out = String::from("<div class=\"identity\">\n");
    if let Some(src) = avatar {
        out.push_str(&format!("<img class=\"avatar\" src=\"{}\" alt=\"\">\n", src));
    }
    if let Some(name) = name {
        out.push_str(&format!("<h1 class=\"name\">{}</h1>\n", escape_text(name)));
    }
    if let Some(title) = title {
        out.push_str(&format!("<p class=\"headline\">{}</p>\n", escape_text(title)));
    }
    out.push_str("</div>\n");
    Some(out)
}

fn contact_list(contact: &Contact) -> Option<String> {
    let mut items = Vec::new();

    if let Some(phone) = present(&contact.phone) {
        items.push(contact_item("电话", &escape_text(phone)));
    }
    if let Some(email) = present(&contact.email) {
        let value = match url_attr(&format!("mailto:{}", email.trim())) {
            Some(href) => format!("<a href=\"{}\">{}</a>", href, escape_text(email)),
            None => escape_text(email).into_owned(),
        };
        items.push(contact_item("邮箱", &value));
    }
    if let Some(wechat) = present(&contact.wechat) {
        items.push(contact_item("微信", &escape_text(wechat)));
    }
    if let Some(location) = present(&contact.location) {
        items.push(contact_item("意向城市", &escape_text(location)));
    }
    if let Some(url) = present(&contact.portfolio_url) {
        let value = match url_attr(url) {
            Some(href) => format!("<a href=\"{}\">{}</a>", href, escape_text(url)),
            None => escape_text(url).into_owned(),
        };
        items.push(contact_item("作品主页", &value));
    }

    if items.is_empty() {
        return None;
    }
    Some(format!("<ul class=\"contact\">\n{}</ul>\n", items.concat()))
}

fn contact_item(label: &str, value_html: &str) -> String {
    format!(
        "<li><span class=\"label\">{}</span><span class=\"value\">{}</span></li>\n",
        label, value_html
    )
}

fn details_list(details: &[String]) -> String {
    let items: String = details
        .iter()
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!("<li>{}</li>\n", escape_text(d)))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"details\">\n{}</ul>\n", items)
    }
}

/// One timeline entry: heading, time, subtitle and bullet details.
fn entry(heading: Option<&str>, time: Option<&str>, sub: Option<&str>, details: &[String]) -> Option<String> {
    let details = details_list(details);
    if heading.is_none() && time.is_none() && sub.is_none() && details.is_empty() {
        return None;
    }

    let mut out = String::from("<div class=\"entry\">\n<div class=\"entry-head\">");
    if let Some(heading) = heading {
        out.push_str(&format!("<span class=\"entry-title\">{}</span>", escape_text(heading)));
    }
    if let Some(time) = time {
        out.push_str(&format!("<span class=\"entry-time\">{}</span>", escape_text(time)));
    }
    out.push_str("</div>\n");
    if let Some(sub) = sub {
        out.push_str(&format!("<div class=\"entry-sub\">{}</div>\n", escape_text(sub)));
    }
    out.push_str(&details);
    out.push_str("</div>\n");
    Some(out)
}

fn education_section(education: &[Education]) -> Option<String> {
    let entries: String = education
        .iter()
        .filter_map(|e| entry(present(&e.school), present(&e.time), present(&e.degree), &e.details))
        .collect();
    (!entries.is_empty()).then(|| section("education", "教育背景", &entries))
}

fn experience_section(experience: &[Experience]) -> Option<String> {
    let entries: String = experience
        .iter()
        .filter_map(|e| entry(present(&e.company), present(&e.time), present(&e.role), &e.details))
        .collect();
    (!entries.is_empty()).then(|| section("experience", "实习经历", &entries))
}

fn portfolio_section(portfolio: &[PortfolioItem]) -> Option<String> {
    let works: String = portfolio.iter().filter_map(work).collect();
    (!works.is_empty()).then(|| section("portfolio", "作品集", &format!("<div class=\"works\">\n{}</div>\n", works)))
}

fn work(item: &PortfolioItem) -> Option<String> {
    let title = present(&item.title);
    let role = present(&item.role);
    let link = present(&item.link);
    let desc = present(&item.desc);
    if title.is_none() && role.is_none() && link.is_none() && desc.is_none() {
        return None;
    }

    let href = link.and_then(url_attr);
    let mut out = String::from("<article class=\"work\">\n");
    match (title, &href) {
        (Some(title), Some(href)) => {
            out.push_str(&format!("<h3 class=\"work-title\"><a href=\"{}\">{}</a></h3>\n", href, escape_text(title)))
        }
        (Some(title), None) => out.push_str(&format!("<h3 class=\"work-title\">{}</h3>\n", escape_text(title))),
        (None, _) => {}
    }
    if let Some(role) = role {
        out.push_str(&format!("<p class=\"work-role\">{}</p>\n", escape_text(role)));
    }
    if let Some(desc) = desc {
        out.push_str(&format!("<p class=\"work-desc\">{}</p>\n", escape_text(desc)));
    }
    if let (None, Some(href), Some(link)) = (title, &href, link) {
        out.push_str(&format!("<p class=\"work-link\"><a href=\"{}\">{}</a></p>\n", href, escape_text(link)));
    }
    out.push_str("</article>\n");
    Some(out)
}

fn skills_section(skills: &Skills) -> Option<String> {
    let groups: String = [
        ("专业技能", &skills.professional),
        ("软件工具", &skills.software),
        ("语言能力", &skills.languages),
    ]
    .into_iter()
    .filter_map(|(label, items)| skill_group(label, items))
    .collect();
    (!groups.is_empty()).then(|| section("skills", "专业技能", &groups))
}

fn skill_group(label: &str, items: &[String]) -> Option<String> {
    let tags: String = items
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("<li class=\"tag\">{}</li>", escape_text(s)))
        .collect();
    if tags.is_empty() {
        return None;
    }
    Some(format!(
        "<div class=\"skill-group\">\n<h3 class=\"skill-label\">{}</h3>\n<ul class=\"tags\">{}</ul>\n</div>\n",
        label, tags
    ))
}

fn awards_section(awards: &[String]) -> Option<String> {
    let items: String = awards
        .iter()
        .filter(|a| !a.trim().is_empty())
        .map(|a| format!("<li>{}</li>\n", escape_text(a)))
        .collect();
    (!items.is_empty()).then(|| section("awards", "荣誉奖项", &format!("<ul class=\"awards\">\n{}</ul>\n", items)))
}

const BASE_CSS: &str = r#"@page { size: A4; margin: 0; }
* { box-sizing: border-box; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
html, body { margin: 0; padding: 0; }
body { font-family: var(--font); color: #1f2937; font-size: 10.5pt; line-height: 1.55; }
.page { width: 210mm; min-height: 297mm; margin: 0 auto; background: #ffffff; overflow: hidden; }
a { color: var(--accent); text-decoration: none; }
h1, h2, h3, p, ul { margin: 0; }
ul { padding: 0; list-style: none; }
.identity .name { font-size: 24pt; letter-spacing: 0.04em; }
.identity .headline { margin-top: 2mm; font-size: 12pt; }
.avatar { width: 28mm; height: 28mm; border-radius: 50%; object-fit: cover; }
.contact { display: flex; flex-wrap: wrap; gap: 1.5mm 6mm; margin-top: 4mm; }
.contact .label { font-weight: 600; margin-right: 1.5mm; }
.content { padding: 8mm 14mm 12mm; }
.section { margin-bottom: 6mm; }
.section-title { font-size: 13pt; color: var(--accent); border-bottom: 0.6mm solid var(--accent); padding-bottom: 1mm; margin-bottom: 3mm; }
.entry { margin-bottom: 3.5mm; break-inside: avoid; }
.entry-head { display: flex; justify-content: space-between; gap: 4mm; font-weight: 600; }
.entry-time { color: #6b7280; font-weight: 400; white-space: nowrap; }
.entry-sub { color: #374151; font-style: italic; }
.details { margin-top: 1mm; padding-left: 4.5mm; list-style: disc; }
.details li::marker { color: var(--accent); }
.works { display: grid; grid-template-columns: repeat(2, 1fr); gap: 3mm; }
.work { background: var(--accent-tint); border-left: 1mm solid var(--accent); padding: 2.5mm 3mm; break-inside: avoid; }
.work-title { font-size: 11pt; }
.work-role { color: #6b7280; font-size: 9.5pt; }
.skill-group { display: flex; align-items: baseline; gap: 3mm; margin-bottom: 2mm; }
.skill-label { font-size: 10pt; min-width: 18mm; white-space: nowrap; }
.tags { display: flex; flex-wrap: wrap; gap: 1.5mm; }
.tag { background: var(--accent-tint); color: var(--accent); border-radius: 1mm; padding: 0.3mm 2mm; }
.awards { padding-left: 4.5mm; list-style: square; }
@media screen { body { background: #e5e7eb; } .page { margin: 8mm auto; box-shadow: 0 2mm 8mm rgba(0, 0, 0, 0.15); } }
@media print { .page { margin: 0; box-shadow: none; } }
"#;

fn layout_css(layout: Layout) -> &'static str {
    match layout {
        Layout::Modern => {
            r#".band { background: var(--accent); color: #ffffff; padding: 12mm 14mm 8mm; }
.band a { color: #ffffff; }
.band .identity { display: flex; align-items: center; gap: 6mm; }
"#
        }
        Layout::Classic => {
            r#".centered { text-align: center; padding: 14mm 16mm 4mm; border-bottom: 0.4mm solid #d1d5db; margin: 0 14mm; }
.centered .identity .name { color: var(--accent); }
.centered .contact { justify-content: center; }
.centered .avatar { display: block; margin: 0 auto 3mm; }
.layout-classic .section-title { border-bottom-width: 0.3mm; text-transform: uppercase; letter-spacing: 0.2em; }
"#
        }
        Layout::Agency => {
            r#".columns { display: flex; min-height: 297mm; }
.sidebar { width: 68mm; background: var(--accent); color: #ffffff; padding: 14mm 7mm; }
.sidebar a { color: #ffffff; }
.sidebar .contact { flex-direction: column; }
.sidebar .section-title { color: #ffffff; border-bottom-color: rgba(255, 255, 255, 0.6); }
.sidebar .skill-group { flex-direction: column; }
.sidebar .tag { background: rgba(255, 255, 255, 0.18); color: #ffffff; }
.columns .content { flex: 1; padding: 14mm 10mm; }
.columns .works { grid-template-columns: 1fr; }
"#
        }
        Layout::Visual => {
            r#".hero { background: linear-gradient(135deg, var(--accent), #111827); color: #ffffff; padding: 16mm 14mm 10mm; }
.hero a { color: #ffffff; }
.hero .identity { display: flex; align-items: center; gap: 6mm; }
.hero .identity .name { font-size: 28pt; }
.layout-visual .works { grid-template-columns: repeat(3, 1fr); }
.layout-visual .work { border-left: none; border-top: 1mm solid var(--accent); }
"#
        }
    }
}

fn stylesheet(style: &Style) -> String {
    format!(
        ":root {{ --accent: {}; --accent-tint: {}; --font: {}; }}\n{}{}",
        style.accent.color(),
        style.accent.tint(),
        style.font.stack(),
        BASE_CSS,
        layout_css(style.layout)
    )
}
