use crate::config::{AnimationConfig, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::lottie::{Document, render_document};
use crate::parser::parse_architecture;
use crate::preview::{preview_path, render_preview_html};
use crate::validate::validate;
use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "arch-lottie",
    version,
    about = "Render Mermaid-style architecture diagrams as animated Lottie JSON"
)]
pub struct Args {
    /// Architecture source (.mmd, or Markdown with a mermaid block)
    pub input: PathBuf,

    /// Output Lottie JSON. Defaults to the input path with a .json extension.
    pub output: Option<PathBuf>,

    /// Also write preview-<name>.html next to the output
    #[arg(long)]
    pub preview: bool,

    /// Canvas width
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Loop duration in seconds
    #[arg(long)]
    pub duration: Option<f32>,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Reject dangling edges, unknown icons, duplicate ids and unknown parents
    #[arg(long)]
    pub strict: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

pub fn run(args: &Args) -> Result<()> {
    if !args.input.exists() {
        bail!("input file not found: {}", args.input.display());
    }

    let mut config = load_config(args.config.as_deref())?;
    apply_animation_flags(&mut config.animation, args);

    let source = read_source(&args.input)?;
    let mut diagram = parse_architecture(&source);
    info!(
        groups = diagram.groups.len(),
        services = diagram.services.len(),
        junctions = diagram.junctions.len(),
        layers = diagram.layers.len(),
        edges = diagram.edges.len();
        "Parsed diagram"
    );
    if args.strict {
        validate(&diagram)?;
    }

    let report = compute_layout(&mut diagram, &config.layout);
    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &diagram, &report)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
        debug!(path = path.display().to_string(); "Wrote layout dump");
    }

    let document = render_document(&diagram, &config.theme, &config.animation);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("json"));
    write_document(&output, &document)?;
    info!(path = output.display().to_string(), layers = document.layers.len(); "Saved animation");

    if args.preview {
        let page = preview_path(&output);
        let file_name = output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        std::fs::write(&page, render_preview_html(&file_name, &config.animation))
            .with_context(|| format!("failed to write preview {}", page.display()))?;
        info!(path = page.display().to_string(); "Saved preview");
    }

    Ok(())
}

fn apply_animation_flags(animation: &mut AnimationConfig, args: &Args) {
    if let Some(width) = args.width {
        animation.width = width;
    }
    if let Some(height) = args.height {
        animation.height = height;
    }
    if let Some(fps) = args.fps {
        animation.fps = fps;
    }
    if let Some(duration) = args.duration {
        animation.duration_seconds = duration;
    }
}

fn read_source(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_markdown = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| matches!(ext, "md" | "markdown"))
        .unwrap_or(false);
    if !is_markdown {
        return Ok(content);
    }
    let blocks = extract_mermaid_blocks(&content);
    let architecture = blocks
        .iter()
        .find(|block| {
            block
                .lines()
                .any(|line| line.trim_start().starts_with("architecture"))
        })
        .or_else(|| blocks.first());
    Ok(architecture.cloned().unwrap_or(content))
}

fn write_document(path: &Path, document: &Document) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn extract_mermaid_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut current = Vec::new();
    let mut fence = String::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if !in_block {
            if let Some(start_fence) = detect_mermaid_fence(trimmed) {
                in_block = true;
                fence = start_fence;
            }
            continue;
        }
        if is_fence_end(trimmed, &fence) {
            in_block = false;
            blocks.push(current.join("\n"));
            current.clear();
            continue;
        }
        current.push(line.to_string());
    }

    blocks
}

fn detect_mermaid_fence(line: &str) -> Option<String> {
    for fence in ["```", "~~~"] {
        if let Some(rest) = line.strip_prefix(fence) {
            let rest = rest.trim_start_matches(&fence[..1]).trim();
            if rest.starts_with("mermaid") {
                return Some(fence.to_string());
            }
        }
    }
    None
}

fn is_fence_end(line: &str, fence: &str) -> bool {
    line.strip_prefix(fence)
        .is_some_and(|rest| rest.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    const API_SAMPLE: &str = "\
architecture
    group api(cloud)[API]
    service db(database)[Database] in api
    service disk1(disk)[Storage] in api
    service disk2(disk)[Storage] in api
    service server(server)[Server] in api
    db:L -- R:server
    disk1:T -- B:server
    disk2:T -- B:db
";

    fn args_for(input: PathBuf) -> Args {
        Args {
            input,
            output: None,
            preview: false,
            width: None,
            height: None,
            fps: None,
            duration: None,
            config: None,
            strict: false,
            dump_layout: None,
            log_level: "warn".to_string(),
        }
    }

    fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_document_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "arch.mmd", API_SAMPLE);
        run(&args_for(input)).unwrap();

        let document = read_json(&dir.path().join("arch.json"));
        assert_eq!(document["layers"].as_array().unwrap().len(), 18);
        assert_eq!(document["op"], 120);
        assert!(!dir.path().join("preview-arch.html").exists());
    }

    #[test]
    fn flags_override_animation_settings() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "arch.mmd", API_SAMPLE);
        let output = dir.path().join("out.json");
        let mut args = args_for(input);
        args.output = Some(output.clone());
        args.width = Some(1280);
        args.fps = Some(30);
        args.duration = Some(4.0);
        args.preview = true;
        run(&args).unwrap();

        let document = read_json(&output);
        assert_eq!(document["w"], 1280);
        assert_eq!(document["h"], 600);
        assert_eq!(document["fr"], 30);
        assert_eq!(document["op"], 120);

        let preview = std::fs::read_to_string(dir.path().join("preview-out.html")).unwrap();
        assert!(preview.contains("path: 'out.json'"));
        assert!(preview.contains("width: 1280px;"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = run(&args_for(dir.path().join("absent.mmd"))).unwrap_err();
        assert!(err.to_string().contains("input file not found"));
    }

    #[test]
    fn strict_mode_rejects_dangling_edges() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "bad.mmd", "service a\na:R --> L:ghost\n");
        let mut args = args_for(input.clone());
        args.strict = true;
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert!(!dir.path().join("bad.json").exists());

        run(&args_for(input)).unwrap();
        let document = read_json(&dir.path().join("bad.json"));
        assert_eq!(document["layers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn dump_layout_is_written() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "arch.mmd", API_SAMPLE);
        let dump = dir.path().join("layout.json");
        let mut args = args_for(input);
        args.dump_layout = Some(dump.clone());
        run(&args).unwrap();

        let value = read_json(&dump);
        assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(value["groups"][0]["id"], "api");
    }

    #[test]
    fn markdown_input_uses_architecture_block() {
        let dir = TempDir::new().unwrap();
        let markdown = format!(
            "# Notes\nservice stray\n\n```mermaid\nflowchart LR\n  A --> B\n```\n\n``` mermaid\n{API_SAMPLE}```\n"
        );
        let input = write_input(&dir, "arch.md", &markdown);
        let source = read_source(&input).unwrap();
        assert!(source.starts_with("architecture"));
        assert!(!source.contains("stray"));
    }

    #[test]
    fn extracts_mermaid_blocks() {
        let input = "text\n```mermaid\narchitecture\n```\nmore\n~~~mermaid\nservice a\n~~~\n";
        let blocks = extract_mermaid_blocks(input);
        assert_eq!(blocks, vec!["architecture", "service a"]);
    }
}
