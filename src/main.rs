//! `buho` command-line tool: check and summarize saved projects.

use std::env;
use std::path::Path;

use buho::config::{EditorConfig, LogLevel};
use buho::model::Project;
use buho::validation::{self, Severity};

fn main() {
    init_logging();
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let level = EditorConfig::load_from_default_path()
        .map(|config| config.preferences.log_level)
        .unwrap_or(LogLevel::Warn);
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
}

fn usage() -> String {
    "usage:\n  buho validate <project.json>\n  buho summary <project.json>".to_string()
}

fn real_main() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let [cmd, path] = args.as_slice() else {
        return Err(usage());
    };
    let project = read_project(Path::new(path))?;
    match cmd.as_str() {
        "validate" => cmd_validate(&project),
        "summary" => {
            cmd_summary(&project);
            Ok(())
        }
        _ => Err(usage()),
    }
}

fn read_project(path: &Path) -> Result<Project, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let mut project: Project = serde_json::from_str(&json)
        .map_err(|e| format!("invalid project {}: {e}", path.display()))?;
    project.refresh_totals();
    log::debug!("Read project {} from {:?}", project.id, path);
    Ok(project)
}

fn cmd_validate(project: &Project) -> Result<(), String> {
    let report = validation::validate_all(project);
    for finding in &report.findings {
        println!(
            "{:<7} [{}] {}: {}",
            finding.severity.name(),
            finding.id,
            finding.title,
            finding.description
        );
    }
    println!(
        "{} errors, {} warnings, {} infos",
        report.count(Severity::Error),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    );
    if report.has_errors() {
        return Err(format!("project '{}' has errors", project.name));
    }
    Ok(())
}

fn cmd_summary(project: &Project) {
    println!("{} ({})", project.name, project.category.name());
    if !project.location.is_empty() {
        println!("  location: {}", project.location);
    }
    println!(
        "  grades:   {}-{}",
        project.difficulty.min, project.difficulty.max
    );
    println!(
        "  {} tours, {} scenes, {} routes",
        project.tours.len(),
        project.metadata.total_scenes,
        project.metadata.total_routes
    );
    for tour in &project.tours {
        println!("  tour {}: {}", tour.id, tour.title);
        for scene in &tour.scenes {
            println!(
                "    {} {:<24} {:>3} hotspots {:>3} routes",
                scene.id,
                scene.name,
                scene.hotspots.len(),
                scene.routes.len()
            );
        }
    }
}
