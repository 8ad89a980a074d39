mod config;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Arg, ArgAction, Command};
use config::{Endpoint, Mode, Settings};
use cvkit_lib::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VARIANTS: [&str; 4] = ["advertising", "journalism", "broadcasting", "new_media"];

fn cli() -> Command {
    Command::new("cvkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render JSON résumé profiles into print-ready A4 HTML")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Profile JSON to render ('-' reads stdin)")
                .default_value(config::DEFAULT_INPUT),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("HTML file to write ('-' writes stdout)")
                .default_value(config::DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .value_name("VARIANT")
                .help("Template variant; inferred from meta.layout when omitted")
                .env("CVKIT_TEMPLATE")
                .value_parser(VARIANTS),
        )
        .arg(
            Arg::new("demos")
                .long("demos")
                .value_name("DIR")
                .help("Render every built-in sample into DIR as cv_<variant>.html, plus the input as my_cv.html when it exists")
                .conflicts_with_all(["sample", "check"]),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .value_name("VARIANT")
                .help("Print the sample profile JSON for a variant")
                .value_parser(VARIANTS)
                .conflicts_with("check"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Parse the input and report its contents without writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stamp")
                .long("stamp")
                .help("Embed a UTC generation timestamp in the document")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("archive")
                .long("archive")
                .value_name("STUDENT_ID")
                .help("Also save the input as a new numbered version for this student"),
        )
        .arg(
            Arg::new("archive-dir")
                .long("archive-dir")
                .value_name("DIR")
                .help("Directory holding archived profile versions")
                .env("CVKIT_ARCHIVE_DIR")
                .default_value(config::DEFAULT_ARCHIVE_DIR),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level instead of warn")
                .action(ArgAction::Count),
        )
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let matches = cli().get_matches();
    let settings = Settings::from_matches(&matches)?;
    init_tracing(settings.log_level());
    debug!(?settings, "starting");

    match &settings.mode {
        Mode::Sample(variant) => {
            io::stdout()
                .write_all(variant.sample_json().as_bytes())
                .context("failed to write sample to stdout")?;
            Ok(())
        }
        Mode::Demos(dir) => render_demos(dir, &settings),
        Mode::Check | Mode::Render => render_input(&settings),
    }
}

fn render_options(settings: &Settings) -> RenderOptions {
    if settings.stamp {
        RenderOptions::stamped(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
    } else {
        RenderOptions::default()
    }
}

fn read_input(input: &Endpoint) -> Result<String> {
    match input {
        Endpoint::Std => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read profile from stdin")?;
            Ok(buffer)
        }
        Endpoint::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display())),
    }
}

fn render_input(settings: &Settings) -> Result<()> {
    let input_name = settings.input.describe();
    let json = read_input(&settings.input)?;
    let profile = parse_profile(&json).with_context(|| format!("invalid profile {}", input_name))?;

    let variant = settings.template.unwrap_or_else(|| Variant::infer(&profile));
    let style = Style::resolve(variant, &profile.meta);
    info!(input = %input_name, %variant, layout = %style.layout, summary = %profile.summary(), "profile loaded");

    if settings.mode == Mode::Check {
        let name = profile.profile.name.as_deref().unwrap_or("(unnamed)");
        println!("✅ {} is valid: {} [{}]", input_name, name, profile.summary());
        println!("🎨 Template: {} ({}), layout {}, accent {}", variant, variant.label(), style.layout, style.accent.color());
        println!("💡 {}", meta_hints());
        return Ok(());
    }

    let options = render_options(settings);
    match &settings.output {
        Endpoint::Std => {
            let html = render_with_style(&profile, variant, &style, &options);
            io::stdout()
                .write_all(html.as_bytes())
                .context("failed to write HTML to stdout")?;
        }
        Endpoint::File(path) => {
            render_to_file(&profile, variant, &options, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("🎨 Layout: {} ({} / {})", style.layout, variant, variant.label());
            eprintln!("✅ Résumé written: {}", path.display());
            print_hint();
        }
    }

    if let Some((student_id, dir)) = &settings.archive {
        let archive = Archive::new(dir);
        let version = archive
            .save_version(student_id, &profile)
            .with_context(|| format!("failed to archive profile for '{}'", student_id))?;
        eprintln!("💾 Archived as {} in {}", version, archive.root().display());
    }

    Ok(())
}

fn render_demos(dir: &Path, settings: &Settings) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let options = render_options(settings);

    eprintln!("🚀 Rendering {} sample résumés into {}", Variant::ALL.len(), dir.display());
    for variant in Variant::ALL {
        let profile = variant
            .sample_profile()
            .with_context(|| format!("built-in sample for {} is invalid", variant))?;
        let path = dir.join(format!("cv_{}.html", variant));
        render_to_file(&profile, variant, &options, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("✅ {} ({}): {}", variant, variant.label(), path.display());
    }

    match &settings.input {
        Endpoint::File(input) if input.exists() => {
            let json = read_input(&settings.input)?;
            let profile = parse_profile(&json).with_context(|| format!("invalid profile {}", input.display()))?;
            let variant = settings.template.unwrap_or_else(|| Variant::infer(&profile));
            let path = dir.join(config::DEFAULT_OUTPUT);
            render_to_file(&profile, variant, &options, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✅ {} ({}): {}", input.display(), variant, path.display());
        }
        Endpoint::File(input) => debug!(input = %input.display(), "no personal profile, skipping"),
        Endpoint::Std => {}
    }

    print_hint();
    Ok(())
}

/// Values `meta.layout` and `meta.theme_color` recognize.
fn meta_hints() -> String {
    let layouts: Vec<&str> = Layout::ALL.iter().map(Layout::as_str).collect();
    let themes: Vec<&str> = Theme::ALL.iter().map(Theme::as_str).collect();
    format!(
        "meta.layout: {}; meta.theme_color: {} or #rrggbb",
        layouts.join(", "),
        themes.join(", ")
    )
}

fn print_hint() {
    eprintln!("👉 Open the .html file in a browser and print it (Ctrl+P) to save as PDF.");
    eprintln!("💡 Enable 'Background graphics' in the print dialog so accent colors are kept.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(args: &[&str]) -> Settings {
        let matches = cli().try_get_matches_from(args).unwrap();
        Settings::from_matches(&matches).unwrap()
    }

    #[test]
    fn test_defaults_use_fixed_filenames() {
        let s = settings(&["cvkit"]);
        assert_eq!(s.mode, Mode::Render);
        assert_eq!(s.input, Endpoint::File(PathBuf::from("config.json")));
        assert_eq!(s.output, Endpoint::File(PathBuf::from("my_cv.html")));
        assert!(s.archive.is_none());
        assert_eq!(s.log_level(), "warn");
    }

    #[test]
    fn test_dash_selects_stdio() {
        let s = settings(&["cvkit", "-i", "-", "-o", "-", "-t", "journalism", "-vv"]);
        assert_eq!(s.input, Endpoint::Std);
        assert_eq!(s.output, Endpoint::Std);
        assert_eq!(s.template, Some(Variant::Journalism));
        assert_eq!(s.log_level(), "debug");
    }

    #[test]
    fn test_single_verbose_flag_enables_debug() {
        assert_eq!(settings(&["cvkit", "-v"]).log_level(), "debug");
    }

    #[test]
    fn test_modes() {
        assert_eq!(settings(&["cvkit", "--sample", "new_media"]).mode, Mode::Sample(Variant::NewMedia));
        assert_eq!(settings(&["cvkit", "--demos", "out"]).mode, Mode::Demos(PathBuf::from("out")));
        assert_eq!(settings(&["cvkit", "--check"]).mode, Mode::Check);
    }

    #[test]
    fn test_archive_uses_default_dir() {
        let s = settings(&["cvkit", "--archive", "zhang_san"]);
        let (id, dir) = s.archive.unwrap();
        assert_eq!(id, "zhang_san");
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_meta_hints_list_every_layout_and_theme() {
        let hints = meta_hints();
        assert!(hints.contains("modern, classic, agency, visual"));
        assert!(hints.contains("rose, teal, indigo, violet, academic, luxury"));
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        assert!(cli().try_get_matches_from(["cvkit", "-t", "physics"]).is_err());
    }
}
